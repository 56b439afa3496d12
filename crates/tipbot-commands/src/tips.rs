//! The `/tips` command family: author, publish, and settle betting tips,
//! and query profit/loss statistics.

use crate::framework::{Context, Error};
use crate::render;
use poise::serenity_prelude as serenity;
use tipbot_common::{ChannelId, DraftId, MessageId, TipBotError};
use tipbot_ledger::{Leg, Outcome, Timeframe, Tip};
use tracing::{info, warn};

/// Settlement result choices for `/tips update`.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum SettleResult {
    /// The tip won.
    #[name = "Win"]
    Win,
    /// The tip lost.
    #[name = "Loss"]
    Loss,
}

impl SettleResult {
    fn outcome(self) -> Outcome {
        match self {
            Self::Win => Outcome::Win,
            Self::Loss => Outcome::Loss,
        }
    }
}

/// Timeframe choices for `/tips stats`.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum TimeframeChoice {
    /// The stored all-time aggregate.
    #[name = "All Time"]
    AllTime,
    /// Recomputed over the last 30 days.
    #[name = "Last 30 Days"]
    Last30Days,
    /// Recomputed over the last 7 days.
    #[name = "Last 7 Days"]
    Last7Days,
}

impl TimeframeChoice {
    fn timeframe(self) -> Timeframe {
        match self {
            Self::AllTime => Timeframe::AllTime,
            Self::Last30Days => Timeframe::Last30Days,
            Self::Last7Days => Timeframe::Last7Days,
        }
    }
}

/// Manage betting tips.
#[poise::command(
    slash_command,
    subcommands("create", "add", "send", "send_multi", "update", "stats")
)]
pub async fn tips(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Create a new tip or multi-tip.
#[poise::command(slash_command)]
pub async fn create(
    ctx: Context<'_>,
    #[description = "Title of the tip"] title: String,
    #[rename = "match"]
    #[description = "Match details"]
    match_up: Option<String>,
    #[description = "Betting market"] market: Option<String>,
    #[description = "Market selection"] selection: Option<String>,
    #[description = "Betting odds"] odds: Option<f64>,
) -> Result<(), Error> {
    let tip = draft_from_options(title, match_up, market, selection, odds);
    let kind = if tip.is_multi() { "Multi-tip" } else { "Tip" };

    let id = ctx
        .data()
        .ledger
        .update(|ledger| Ok(ledger.create_draft(tip)))
        .await?;

    info!(draft_id = %id, kind, "draft created");
    reply_ephemeral(ctx, format!("{kind} created with ID: {id}")).await
}

/// Add a tip to a multi-tip.
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Multi-tip ID"] id: String,
    #[rename = "match"]
    #[description = "Match details"]
    match_up: String,
    #[description = "Betting market"] market: String,
    #[description = "Market selection"] selection: String,
    #[description = "Betting odds"] odds: f64,
) -> Result<(), Error> {
    let draft_id = DraftId(id);
    let leg = Leg::new(match_up, market, selection, odds);

    match ctx
        .data()
        .ledger
        .update(|ledger| ledger.add_leg(&draft_id, leg))
        .await
    {
        Ok(()) => reply_ephemeral(ctx, "Tip added to multi-tip successfully!").await,
        Err(e) if e.is_user_facing() => reply_ephemeral(ctx, e.to_string()).await,
        Err(e) => Err(e.into()),
    }
}

/// Send a tip to a channel using an ID.
#[poise::command(slash_command)]
pub async fn send(
    ctx: Context<'_>,
    #[description = "The channel to send the tip to"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
    #[description = "Tip ID from /tips create"] id: String,
) -> Result<(), Error> {
    publish_draft(ctx, channel, DraftId(id), false).await
}

/// Send a multi-tip to a channel.
#[poise::command(slash_command, rename = "send-multi")]
pub async fn send_multi(
    ctx: Context<'_>,
    #[description = "The channel to send the multi-tip to"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
    #[description = "Multi-tip ID"] id: String,
) -> Result<(), Error> {
    publish_draft(ctx, channel, DraftId(id), true).await
}

/// Update tip result.
#[poise::command(slash_command)]
pub async fn update(
    ctx: Context<'_>,
    #[description = "Message ID of the tip"] message_id: String,
    #[description = "Result of the tip"] result: SettleResult,
    #[description = "Stake amount for P/L calculation"] stake: f64,
) -> Result<(), Error> {
    let Ok(raw_id) = message_id.parse::<u64>() else {
        return reply_ephemeral(ctx, "Invalid message ID").await;
    };
    let message_id = MessageId(raw_id);
    let data = ctx.data();

    // Snapshot the entry; the Discord edit happens outside the store lock
    // and nothing is persisted until it succeeds.
    let ledger = data.ledger.read().await?;
    let Some(tip) = ledger.tip(message_id) else {
        return reply_ephemeral(ctx, "Invalid message ID").await;
    };
    if !tip.status().is_pending() {
        return reply_ephemeral(ctx, TipBotError::AlreadySettled.to_string()).await;
    }
    let Some(publication) = tip.publication() else {
        return reply_ephemeral(ctx, "Invalid message ID").await;
    };
    let channel_id = publication.channel_id;
    let mut settled_view = tip.clone();
    drop(ledger);

    let outcome = result.outcome();
    settled_view.apply_outcome(outcome, stake);

    if let Err(e) = edit_published_message(&ctx, channel_id, message_id, &settled_view).await {
        warn!(message_id = %message_id, error = %e, "settlement edit failed");
        return reply_ephemeral(ctx, format!("Error updating tip: {e}")).await;
    }

    match data
        .ledger
        .update(|ledger| ledger.settle(message_id, outcome, stake))
        .await
    {
        Ok(settlement) => {
            info!(
                message_id = %message_id,
                odds = settlement.odds,
                profit = settlement.profit,
                "tip settled"
            );
            reply_ephemeral(ctx, "Tip updated successfully!").await
        }
        Err(e) if e.is_user_facing() => reply_ephemeral(ctx, e.to_string()).await,
        Err(e) => Err(e.into()),
    }
}

/// Show betting statistics.
#[poise::command(slash_command)]
pub async fn stats(
    ctx: Context<'_>,
    #[description = "Timeframe for stats"] timeframe: TimeframeChoice,
) -> Result<(), Error> {
    let timeframe = timeframe.timeframe();
    let ledger = ctx.data().ledger.read().await?;
    let line = ledger.stats_for(timeframe, chrono::Utc::now());

    let embed = render::stats_embed(timeframe.label(), &line);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Single-leg drafts require the whole match/market/selection/odds group;
/// any omission silently starts a multi-tip instead.
fn draft_from_options(
    title: String,
    match_up: Option<String>,
    market: Option<String>,
    selection: Option<String>,
    odds: Option<f64>,
) -> Tip {
    match (match_up, market, selection, odds) {
        (Some(match_up), Some(market), Some(selection), Some(odds)) => {
            Tip::single(title, match_up, market, selection, odds)
        }
        _ => Tip::multi(title),
    }
}

async fn publish_draft(
    ctx: Context<'_>,
    channel: serenity::GuildChannel,
    id: DraftId,
    require_multi: bool,
) -> Result<(), Error> {
    let data = ctx.data();
    let invalid_id_reply = if require_multi {
        TipBotError::invalid_multi_tip_id()
    } else {
        TipBotError::invalid_tip_id()
    };

    // Snapshot the draft for rendering; it is only removed from the
    // pending map after the channel send succeeded.
    let draft = {
        let ledger = data.ledger.read().await?;
        match ledger.draft(&id) {
            Some(tip) if !require_multi || tip.is_multi() => Some(tip.clone()),
            _ => None,
        }
    };
    let Some(tip) = draft else {
        return reply_ephemeral(ctx, invalid_id_reply.to_string()).await;
    };

    let embed = render::tip_embed(&tip, serenity::Timestamp::now());
    let message = channel
        .id
        .send_message(ctx.serenity_context(), serenity::CreateMessage::new().embed(embed))
        .await?;

    let message_id = MessageId(message.id.get());
    let channel_id = ChannelId(channel.id.get());
    let published = data
        .ledger
        .update(|ledger| ledger.publish(&id, message_id, channel_id, chrono::Utc::now()))
        .await;

    match published {
        Ok(()) => {
            info!(draft_id = %id, message_id = %message_id, channel_id = %channel_id, "tip published");
            let kind = if tip.is_multi() { "Multi-tip" } else { "Tip" };
            reply_ephemeral(ctx, format!("{kind} sent successfully!")).await
        }
        // The draft vanished between the send and the move, e.g. a
        // concurrent publish of the same id.
        Err(e) if e.is_user_facing() => reply_ephemeral(ctx, e.to_string()).await,
        Err(e) => Err(e.into()),
    }
}

async fn edit_published_message(
    ctx: &Context<'_>,
    channel_id: ChannelId,
    message_id: MessageId,
    tip: &Tip,
) -> Result<(), serenity::Error> {
    let channel = serenity::ChannelId::new(channel_id.0);
    let mut message = channel
        .message(ctx.serenity_context(), serenity::MessageId::new(message_id.0))
        .await?;

    // Keep the original publish timestamp on the edited embed.
    let timestamp = message
        .embeds
        .first()
        .and_then(|embed| embed.timestamp)
        .unwrap_or_else(serenity::Timestamp::now);
    let embed = render::tip_embed(tip, timestamp);

    message
        .edit(ctx.serenity_context(), serenity::EditMessage::new().embed(embed))
        .await
}

async fn reply_ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(content.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_single_leg_group_creates_a_single_draft() {
        let tip = draft_from_options(
            "T1".into(),
            Some("A v B".into()),
            Some("1X2".into()),
            Some("A".into()),
            Some(2.5),
        );
        assert!(!tip.is_multi());
        assert!((tip.odds() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn any_omission_starts_a_multi_tip() {
        // Missing odds.
        let tip = draft_from_options(
            "M1".into(),
            Some("A v B".into()),
            Some("1X2".into()),
            Some("A".into()),
            None,
        );
        assert!(tip.is_multi());

        // Missing everything.
        let tip = draft_from_options("M2".into(), None, None, None, None);
        assert!(tip.is_multi());
        let Tip::Multi { legs, .. } = &tip else {
            panic!("expected a multi draft");
        };
        assert!(legs.is_empty());
    }

    #[test]
    fn choice_mappings_line_up() {
        assert_eq!(SettleResult::Win.outcome(), Outcome::Win);
        assert_eq!(SettleResult::Loss.outcome(), Outcome::Loss);
        assert_eq!(TimeframeChoice::AllTime.timeframe(), Timeframe::AllTime);
        assert_eq!(
            TimeframeChoice::Last7Days.timeframe(),
            Timeframe::Last7Days
        );
        assert_eq!(
            TimeframeChoice::Last30Days.timeframe(),
            Timeframe::Last30Days
        );
    }
}
