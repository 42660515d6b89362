mod codechef;
mod codeforces;
mod leetcode;
mod stats;

pub use codechef::*;
pub use codeforces::*;
pub use leetcode::*;
pub use stats::*;
