pub use client::StatsClient;
pub use config::{FailurePolicy, StatsConfig};
pub use error::{ErrorKind, Result, StatsError};
pub use model::*;
pub use scraper::leetcode::{CALENDAR_QUERY, PROFILE_QUERY};
pub use session::{SearchOutcome, SearchSession};

mod aggregate;
pub mod browser;
mod client;
mod config;
mod error;
mod model;
pub(crate) mod scraper;
pub mod server;
mod session;
pub mod summary;
#[cfg(test)]
pub(crate) mod testing;
