//! Tip and multi-tip data model.
//!
//! A tip is either a single bet or a multi-tip composed of several legs
//! sharing one combined odds value. The two kinds are a tagged union so
//! every operation site handles them exhaustively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tipbot_common::ChannelId;

/// Lifecycle status of a tip or an individual leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipStatus {
    /// Not yet settled.
    Pending,
    /// Settled as a win.
    Win,
    /// Settled as a loss.
    Loss,
}

impl TipStatus {
    /// Whether the tip is still awaiting settlement.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Capitalized form used in embed fields.
    pub fn title_case(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Win => "Win",
            Self::Loss => "Loss",
        }
    }
}

impl fmt::Display for TipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Win => "win",
            Self::Loss => "loss",
        };
        write!(f, "{s}")
    }
}

/// Settlement result supplied by the moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tip won.
    Win,
    /// The tip lost.
    Loss,
}

impl Outcome {
    /// The status a settled tip ends up with.
    pub fn status(self) -> TipStatus {
        match self {
            Self::Win => TipStatus::Win,
            Self::Loss => TipStatus::Loss,
        }
    }

    /// Profit for this outcome given a stake and decimal odds.
    pub fn profit(self, stake: f64, odds: f64) -> f64 {
        match self {
            Self::Win => stake * (odds - 1.0),
            Self::Loss => -stake,
        }
    }
}

/// One selection within a multi-tip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    /// Match details, e.g. "Team A v Team B".
    #[serde(rename = "match")]
    pub match_up: String,
    /// Betting market, e.g. "1X2".
    pub market: String,
    /// Market selection.
    pub selection: String,
    /// Decimal odds for this leg.
    pub odds: f64,
    /// Per-leg status; set uniformly across all legs at settlement.
    pub status: TipStatus,
}

impl Leg {
    /// Creates a new pending leg.
    pub fn new(
        match_up: impl Into<String>,
        market: impl Into<String>,
        selection: impl Into<String>,
        odds: f64,
    ) -> Self {
        Self {
            match_up: match_up.into(),
            market: market.into(),
            selection: selection.into(),
            odds,
            status: TipStatus::Pending,
        }
    }
}

/// Publication details stamped when a draft is sent to a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    /// Channel the tip message lives in.
    pub channel_id: ChannelId,
    /// When the tip was published.
    pub created_at: DateTime<Utc>,
    /// Stake amount, set only at settlement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake: Option<f64>,
}

/// A betting tip: either a single bet or a multi-tip with several legs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Tip {
    /// A single-leg bet.
    Single {
        /// Tip title shown as the embed title.
        title: String,
        /// Match details.
        #[serde(rename = "match")]
        match_up: String,
        /// Betting market.
        market: String,
        /// Market selection.
        selection: String,
        /// Decimal odds.
        odds: f64,
        /// Settlement status.
        status: TipStatus,
        /// Set once the draft has been sent to a channel.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        published: Option<Publication>,
    },
    /// A multi-tip composed of several legs.
    Multi {
        /// Tip title shown as the embed title.
        title: String,
        /// Ordered legs; empty until `/tips add` appends some.
        legs: Vec<Leg>,
        /// Top-level settlement status.
        status: TipStatus,
        /// Set once the draft has been sent to a channel.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        published: Option<Publication>,
    },
}

impl Tip {
    /// Creates a single-leg draft.
    pub fn single(
        title: impl Into<String>,
        match_up: impl Into<String>,
        market: impl Into<String>,
        selection: impl Into<String>,
        odds: f64,
    ) -> Self {
        Self::Single {
            title: title.into(),
            match_up: match_up.into(),
            market: market.into(),
            selection: selection.into(),
            odds,
            status: TipStatus::Pending,
            published: None,
        }
    }

    /// Creates a multi-tip draft with no legs yet.
    pub fn multi(title: impl Into<String>) -> Self {
        Self::Multi {
            title: title.into(),
            legs: Vec::new(),
            status: TipStatus::Pending,
            published: None,
        }
    }

    /// Tip title.
    pub fn title(&self) -> &str {
        match self {
            Self::Single { title, .. } | Self::Multi { title, .. } => title,
        }
    }

    /// Whether this is a multi-tip.
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Combined decimal odds: the stored odds for a single tip, the
    /// product of all leg odds for a multi-tip.
    pub fn odds(&self) -> f64 {
        match self {
            Self::Single { odds, .. } => *odds,
            Self::Multi { legs, .. } => legs.iter().map(|leg| leg.odds).product(),
        }
    }

    /// Top-level settlement status.
    pub fn status(&self) -> TipStatus {
        match self {
            Self::Single { status, .. } | Self::Multi { status, .. } => *status,
        }
    }

    /// Publication details, if the tip has been sent to a channel.
    pub fn publication(&self) -> Option<&Publication> {
        match self {
            Self::Single { published, .. } | Self::Multi { published, .. } => published.as_ref(),
        }
    }

    /// Stamps publication details when the draft has been sent.
    pub fn mark_published(&mut self, channel_id: ChannelId, created_at: DateTime<Utc>) {
        let publication = Publication {
            channel_id,
            created_at,
            stake: None,
        };
        match self {
            Self::Single { published, .. } | Self::Multi { published, .. } => {
                *published = Some(publication);
            }
        }
    }

    /// Applies a settlement outcome: sets the top-level status (and every
    /// leg's status for a multi-tip) and records the stake.
    pub fn apply_outcome(&mut self, outcome: Outcome, stake: f64) {
        match self {
            Self::Single {
                status, published, ..
            } => {
                *status = outcome.status();
                if let Some(publication) = published {
                    publication.stake = Some(stake);
                }
            }
            Self::Multi {
                legs,
                status,
                published,
                ..
            } => {
                for leg in legs.iter_mut() {
                    leg.status = outcome.status();
                }
                *status = outcome.status();
                if let Some(publication) = published {
                    publication.stake = Some(stake);
                }
            }
        }
    }
}
