//! Derived, display-oriented views of a [`UserStats`].
//!
//! Nothing here is authoritative: raw scraped text stays untouched on the
//! model and numbers are pulled out of it only for charts and cards.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Result, StatsError};
use crate::model::UserStats;

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

const TREND_MONTHS: u32 = 6;

/// The first run of ASCII digits in `text`, if any.
pub fn first_integer(text: &str) -> Option<u64> {
    FIRST_INTEGER
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Problems and rating of one platform, as plotted side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSummary {
    pub name: &'static str,
    pub problems: u64,
    pub rating: u64,
}

/// One bar per platform. LeetCode has no rating, so its weekly progress is
/// plotted in that slot. Absent platforms and unparseable text count as 0.
pub fn platform_summaries(stats: &UserStats) -> Vec<PlatformSummary> {
    let number = |text: Option<&str>| text.and_then(first_integer).unwrap_or(0);

    let codechef = stats.codechef.as_ref();
    let codeforces = stats.codeforces.as_ref();

    vec![
        PlatformSummary {
            name: "LeetCode",
            problems: stats.leetcode.total_solved,
            rating: stats.leetcode.weekly_progress,
        },
        PlatformSummary {
            name: "CodeChef",
            problems: number(codechef.map(|c| c.problems_solved.as_str())),
            rating: number(codechef.map(|c| c.rating.as_str())),
        },
        PlatformSummary {
            name: "Codeforces",
            problems: number(codeforces.and_then(|c| c.problems_solved.as_deref())),
            rating: number(codeforces.and_then(|c| c.rating.as_deref())),
        },
    ]
}

/// A headline number on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

/// Dashboard cards in display order. Platforms that failed get no cards.
pub fn stat_cards(stats: &UserStats) -> Vec<StatCard> {
    let card = |title, value: String| StatCard { title, value };
    let mut cards = vec![
        card("LeetCode Problems", stats.leetcode.total_solved.to_string()),
        card("LeetCode Weekly", stats.leetcode.weekly_progress.to_string()),
    ];

    if let Some(codechef) = &stats.codechef {
        cards.push(card("CodeChef Rating", codechef.rating.clone()));
        cards.push(card("CodeChef Problems", codechef.problems_solved.clone()));
    }

    if let Some(codeforces) = &stats.codeforces {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        cards.push(card("Codeforces Rating", text(&codeforces.rating)));
        cards.push(card("Codeforces Max Rating", text(&codeforces.max_rating)));
        cards.push(card("Codeforces Problems", text(&codeforces.problems_solved)));
    }

    cards
}

/// Submissions per platform in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub leetcode: u64,
    pub codechef: u64,
    pub codeforces: u64,
}

/// Bucket a LeetCode `submissionCalendar` into the six months ending with
/// the month of `today`, oldest first.
///
/// The calendar is a JSON object mapping unix seconds (as strings) to
/// submission counts; days are attributed to months in UTC. No calendar
/// yields six empty months. Only LeetCode publishes a calendar, so the other
/// series are always zero.
pub fn monthly_trend(calendar: Option<&str>, today: NaiveDate) -> Result<Vec<TrendPoint>> {
    let per_month = match calendar {
        Some(raw) => submissions_per_month(raw)?,
        None => HashMap::new(),
    };

    let this_month = today.with_day(1).unwrap_or(today);
    let points = (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| this_month.checked_sub_months(Months::new(back)))
        .map(|month| TrendPoint {
            date: month.format("%b %Y").to_string(),
            leetcode: per_month
                .get(&(month.year(), month.month()))
                .copied()
                .unwrap_or(0),
            codechef: 0,
            codeforces: 0,
        })
        .collect();

    Ok(points)
}

fn submissions_per_month(raw: &str) -> Result<HashMap<(i32, u32), u64>> {
    let days: BTreeMap<String, u64> = serde_json::from_str(raw)?;

    let mut per_month = HashMap::new();
    for (timestamp, count) in days {
        let seconds: i64 = timestamp
            .parse()
            .map_err(|_| StatsError::payload("submission calendar", timestamp.clone()))?;
        let day = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| StatsError::payload("submission calendar", timestamp.clone()))?;
        *per_month.entry((day.year(), day.month())).or_insert(0) += count;
    }
    Ok(per_month)
}
