//! Profit/loss statistics: the running all-time aggregate and the
//! timeframes windowed queries recompute over.

use crate::tip::Outcome;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One bets/wins/losses/profit aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    /// Number of settled bets counted.
    pub bets: u64,
    /// Winning selections.
    pub wins: u64,
    /// Losing selections.
    pub losses: u64,
    /// Total profit/loss.
    pub profit: f64,
}

impl StatLine {
    /// Folds one settlement into the aggregate.
    pub fn record(&mut self, outcome: Outcome, profit: f64) {
        self.bets += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.profit += profit;
    }
}

/// Persisted statistics block of the ledger document.
///
/// Only the all-time line is stored; windowed figures are recomputed
/// from the published tips on every query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    /// Monotonically accumulating all-time aggregate, updated only by
    /// settlement.
    pub all_time: StatLine,
}

/// Timeframe for a statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    /// The stored all-time aggregate, returned verbatim.
    AllTime,
    /// Recomputed over tips published in the last 30 days.
    Last30Days,
    /// Recomputed over tips published in the last 7 days.
    Last7Days,
}

impl Timeframe {
    /// Window start for recomputed timeframes; `None` for all-time.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::AllTime => None,
            Self::Last30Days => Some(now - Duration::days(30)),
            Self::Last7Days => Some(now - Duration::days(7)),
        }
    }

    /// Label used in the stats embed title.
    pub fn label(self) -> &'static str {
        match self {
            Self::AllTime => "allTime",
            Self::Last30Days => "30 Days",
            Self::Last7Days => "7 Days",
        }
    }
}
