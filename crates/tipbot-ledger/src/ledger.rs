//! The ledger document: drafts awaiting publication, published tips keyed
//! by Discord message id, and the running all-time statistics.

use crate::stats::{StatLine, Stats, Timeframe};
use crate::tip::{Leg, Outcome, Tip, TipStatus};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tipbot_common::{ChannelId, DraftId, MessageId, Result, TipBotError};
use tracing::debug;

/// Length of generated draft-id tokens.
const DRAFT_ID_LEN: usize = 9;

/// The full ledger document, persisted as one JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ledger {
    /// Drafts awaiting publication, keyed by generated draft id.
    pending_tips: BTreeMap<DraftId, Tip>,
    /// Published tips, keyed by the Discord message id assigned at send.
    tips: BTreeMap<MessageId, Tip>,
    /// Running statistics, updated only by settlement.
    stats: Stats,
}

/// Result of settling a tip, used for the reply and for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    /// Combined odds the profit was computed against.
    pub odds: f64,
    /// Profit/loss folded into the all-time stats.
    pub profit: f64,
}

impl Ledger {
    /// Inserts a new draft and returns its generated id.
    ///
    /// Token collisions are not checked; at nine random alphanumeric
    /// characters the pending map would have to grow absurdly first.
    pub fn create_draft(&mut self, tip: Tip) -> DraftId {
        let id = generate_draft_id();
        debug!(draft_id = %id, multi = tip.is_multi(), "created draft");
        self.pending_tips.insert(id.clone(), tip);
        id
    }

    /// Looks up a draft by id.
    pub fn draft(&self, id: &DraftId) -> Option<&Tip> {
        self.pending_tips.get(id)
    }

    /// Appends a leg to a multi-tip draft.
    ///
    /// A missing draft and a single-kind draft both fail with the same
    /// invalid-id condition; neither mutates the document.
    pub fn add_leg(&mut self, id: &DraftId, leg: Leg) -> Result<()> {
        match self.pending_tips.get_mut(id) {
            Some(Tip::Multi { legs, .. }) => {
                legs.push(leg);
                Ok(())
            }
            _ => Err(TipBotError::invalid_multi_tip_id()),
        }
    }

    /// Moves a draft into the published tips under the message id the
    /// platform assigned, stamping status, channel, and creation time.
    ///
    /// Called only after the channel send succeeded, so a failed send
    /// leaves the draft in place.
    pub fn publish(
        &mut self,
        id: &DraftId,
        message_id: MessageId,
        channel_id: ChannelId,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut tip = self
            .pending_tips
            .remove(id)
            .ok_or_else(TipBotError::invalid_tip_id)?;
        tip.mark_published(channel_id, now);
        debug!(draft_id = %id, message_id = %message_id, "published draft");
        self.tips.insert(message_id, tip);
        Ok(())
    }

    /// Looks up a published tip by message id.
    pub fn tip(&self, id: MessageId) -> Option<&Tip> {
        self.tips.get(&id)
    }

    /// Settles a published tip: sets its status (and every leg's status
    /// for a multi), records the stake, and folds the profit into the
    /// all-time statistics.
    ///
    /// Re-settling an already settled tip is rejected so the running
    /// aggregate can never double-count.
    pub fn settle(&mut self, id: MessageId, outcome: Outcome, stake: f64) -> Result<Settlement> {
        let tip = self
            .tips
            .get_mut(&id)
            .ok_or_else(TipBotError::invalid_message_id)?;
        if !tip.status().is_pending() {
            return Err(TipBotError::AlreadySettled);
        }

        let odds = tip.odds();
        let profit = outcome.profit(stake, odds);
        tip.apply_outcome(outcome, stake);
        self.stats.all_time.record(outcome, profit);
        debug!(message_id = %id, odds, profit, "settled tip");
        Ok(Settlement { odds, profit })
    }

    /// Statistics for a timeframe.
    ///
    /// All-time returns the stored aggregate verbatim; windowed variants
    /// recompute from scratch over published, non-pending tips created
    /// within the window. The two can legitimately diverge: the stored
    /// line only ever accumulates.
    pub fn stats_for(&self, timeframe: Timeframe, now: DateTime<Utc>) -> StatLine {
        match timeframe.cutoff(now) {
            None => self.stats.all_time.clone(),
            Some(cutoff) => self.recompute_window(cutoff),
        }
    }

    /// The stored all-time aggregate.
    pub fn all_time(&self) -> &StatLine {
        &self.stats.all_time
    }

    fn recompute_window(&self, cutoff: DateTime<Utc>) -> StatLine {
        let mut line = StatLine::default();
        for tip in self.tips.values() {
            let Some(publication) = tip.publication() else {
                continue;
            };
            if publication.created_at < cutoff {
                continue;
            }
            let outcome = match tip.status() {
                TipStatus::Pending => continue,
                TipStatus::Win => Outcome::Win,
                TipStatus::Loss => Outcome::Loss,
            };
            let stake = publication.stake.unwrap_or_default();
            line.record(outcome, outcome.profit(stake, tip.odds()));
        }
        line
    }

    /// Number of drafts awaiting publication.
    pub fn pending_count(&self) -> usize {
        self.pending_tips.len()
    }

    /// Number of published tips.
    pub fn published_count(&self) -> usize {
        self.tips.len()
    }
}

fn generate_draft_id() -> DraftId {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DRAFT_ID_LEN)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect();
    DraftId(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tip::TipStatus;

    fn published_single(ledger: &mut Ledger, odds: f64, message_id: u64) -> MessageId {
        let id = ledger.create_draft(Tip::single("T1", "A v B", "1X2", "A", odds));
        let message_id = MessageId(message_id);
        ledger
            .publish(&id, message_id, ChannelId(1), Utc::now())
            .unwrap();
        message_id
    }

    #[test]
    fn draft_ids_are_short_tokens() {
        let id = generate_draft_id();
        assert_eq!(id.as_str().len(), DRAFT_ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!id.as_str().chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn add_leg_rejects_missing_and_single_drafts() {
        let mut ledger = Ledger::default();
        let single = ledger.create_draft(Tip::single("T1", "A v B", "1X2", "A", 2.0));

        let err = ledger
            .add_leg(&DraftId::from("nosuchid1"), Leg::new("A v B", "1X2", "A", 1.5))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid multi-tip ID");

        let err = ledger
            .add_leg(&single, Leg::new("A v B", "1X2", "A", 1.5))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid multi-tip ID");

        // Neither failure mutated the document.
        assert_eq!(ledger.pending_count(), 1);
        assert!(!ledger.draft(&single).unwrap().is_multi());
    }

    #[test]
    fn add_leg_appends_pending_legs() {
        let mut ledger = Ledger::default();
        let id = ledger.create_draft(Tip::multi("M1"));
        ledger
            .add_leg(&id, Leg::new("A v B", "1X2", "A", 1.5))
            .unwrap();
        ledger
            .add_leg(&id, Leg::new("C v D", "1X2", "D", 2.0))
            .unwrap();

        let tip = ledger.draft(&id).unwrap();
        assert!((tip.odds() - 3.0).abs() < f64::EPSILON);
        let Tip::Multi { legs, .. } = tip else {
            panic!("expected a multi draft");
        };
        assert_eq!(legs.len(), 2);
        assert!(legs.iter().all(|leg| leg.status == TipStatus::Pending));
    }

    #[test]
    fn publish_moves_the_draft_exactly_once() {
        let mut ledger = Ledger::default();
        let id = ledger.create_draft(Tip::single("T1", "A v B", "1X2", "A", 2.5));

        ledger
            .publish(&id, MessageId(100), ChannelId(7), Utc::now())
            .unwrap();
        assert!(ledger.draft(&id).is_none());
        let tip = ledger.tip(MessageId(100)).unwrap();
        assert_eq!(tip.status(), TipStatus::Pending);
        assert_eq!(tip.publication().unwrap().channel_id, ChannelId(7));

        // The draft is gone, so a second publish is an invalid id.
        let err = ledger
            .publish(&id, MessageId(101), ChannelId(7), Utc::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid tip ID");
    }

    #[test]
    fn settlement_updates_entry_and_stats() {
        let mut ledger = Ledger::default();
        let message_id = published_single(&mut ledger, 2.5, 100);

        let settlement = ledger.settle(message_id, Outcome::Win, 10.0).unwrap();
        assert!((settlement.profit - 15.0).abs() < f64::EPSILON);

        let tip = ledger.tip(message_id).unwrap();
        assert_eq!(tip.status(), TipStatus::Win);
        assert_eq!(tip.publication().unwrap().stake, Some(10.0));

        let all_time = ledger.all_time();
        assert_eq!(all_time.bets, 1);
        assert_eq!(all_time.wins, 1);
        assert_eq!(all_time.losses, 0);
        assert!((all_time.profit - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn settlement_of_unknown_message_fails() {
        let mut ledger = Ledger::default();
        let err = ledger.settle(MessageId(404), Outcome::Win, 10.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid message ID");
    }

    #[test]
    fn re_settlement_is_rejected_and_does_not_double_count() {
        let mut ledger = Ledger::default();
        let message_id = published_single(&mut ledger, 2.5, 100);
        ledger.settle(message_id, Outcome::Win, 10.0).unwrap();

        let err = ledger.settle(message_id, Outcome::Loss, 10.0).unwrap_err();
        assert!(matches!(err, TipBotError::AlreadySettled));

        let all_time = ledger.all_time();
        assert_eq!(all_time.bets, 1);
        assert!((all_time.profit - 15.0).abs() < f64::EPSILON);
        assert_eq!(ledger.tip(message_id).unwrap().status(), TipStatus::Win);
    }

    #[test]
    fn multi_settlement_uses_the_leg_product() {
        let mut ledger = Ledger::default();
        let id = ledger.create_draft(Tip::multi("M1"));
        ledger
            .add_leg(&id, Leg::new("A v B", "1X2", "A", 1.5))
            .unwrap();
        ledger
            .add_leg(&id, Leg::new("C v D", "1X2", "D", 2.0))
            .unwrap();
        ledger
            .publish(&id, MessageId(200), ChannelId(1), Utc::now())
            .unwrap();

        let settlement = ledger.settle(MessageId(200), Outcome::Loss, 5.0).unwrap();
        assert!((settlement.odds - 3.0).abs() < f64::EPSILON);
        assert!((settlement.profit - (-5.0)).abs() < f64::EPSILON);

        let Tip::Multi { legs, .. } = ledger.tip(MessageId(200)).unwrap() else {
            panic!("expected a multi tip");
        };
        assert!(legs.iter().all(|leg| leg.status == TipStatus::Loss));
    }

    #[test]
    fn all_time_query_returns_the_stored_aggregate_verbatim() {
        let mut ledger = Ledger::default();
        let message_id = published_single(&mut ledger, 2.0, 100);
        ledger.settle(message_id, Outcome::Win, 10.0).unwrap();

        let line = ledger.stats_for(Timeframe::AllTime, Utc::now());
        assert_eq!(&line, ledger.all_time());
    }

    #[test]
    fn windowed_stats_exclude_pending_and_out_of_window_tips() {
        let now = Utc::now();
        let mut ledger = Ledger::default();

        // Settled inside the window.
        let recent = ledger.create_draft(Tip::single("T1", "A v B", "1X2", "A", 2.0));
        ledger
            .publish(&recent, MessageId(1), ChannelId(1), now - chrono::Duration::days(2))
            .unwrap();
        ledger.settle(MessageId(1), Outcome::Win, 10.0).unwrap();

        // Settled, but published before the 7-day cutoff.
        let old = ledger.create_draft(Tip::single("T2", "C v D", "1X2", "C", 3.0));
        ledger
            .publish(&old, MessageId(2), ChannelId(1), now - chrono::Duration::days(10))
            .unwrap();
        ledger.settle(MessageId(2), Outcome::Loss, 4.0).unwrap();

        // In the window but still pending.
        let pending = ledger.create_draft(Tip::single("T3", "E v F", "1X2", "E", 1.8));
        ledger
            .publish(&pending, MessageId(3), ChannelId(1), now - chrono::Duration::days(1))
            .unwrap();

        let week = ledger.stats_for(Timeframe::Last7Days, now);
        assert_eq!(week.bets, 1);
        assert_eq!(week.wins, 1);
        assert_eq!(week.losses, 0);
        assert!((week.profit - 10.0).abs() < f64::EPSILON);

        // The 30-day window picks up the older loss too.
        let month = ledger.stats_for(Timeframe::Last30Days, now);
        assert_eq!(month.bets, 2);
        assert!((month.profit - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn windowed_stats_include_tips_published_exactly_at_the_cutoff() {
        let now = Utc::now();
        let mut ledger = Ledger::default();
        let id = ledger.create_draft(Tip::single("T1", "A v B", "1X2", "A", 2.0));
        ledger
            .publish(&id, MessageId(1), ChannelId(1), now - chrono::Duration::days(7))
            .unwrap();
        ledger.settle(MessageId(1), Outcome::Win, 10.0).unwrap();

        let week = ledger.stats_for(Timeframe::Last7Days, now);
        assert_eq!(week.bets, 1);
        assert_eq!(week.wins, 1);
        assert!((week.profit - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn windowed_stats_can_diverge_from_the_stored_aggregate() {
        let now = Utc::now();
        let mut ledger = Ledger::default();
        let old = ledger.create_draft(Tip::single("T1", "A v B", "1X2", "A", 2.0));
        ledger
            .publish(&old, MessageId(1), ChannelId(1), now - chrono::Duration::days(60))
            .unwrap();
        ledger.settle(MessageId(1), Outcome::Win, 10.0).unwrap();

        assert_eq!(ledger.all_time().bets, 1);
        assert_eq!(ledger.stats_for(Timeframe::Last30Days, now).bets, 0);
    }
}
