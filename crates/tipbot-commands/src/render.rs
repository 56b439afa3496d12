//! Embed rendering for tips and statistics.
//!
//! Field layout is built as plain name/value/inline triples so the exact
//! rendering can be unit tested without a Discord connection.

use poise::serenity_prelude as serenity;
use serenity::{Colour, CreateEmbed, Timestamp};
use tipbot_ledger::{StatLine, Tip};

/// Embed accent colour for every tip and stats message.
pub const TIP_COLOUR: Colour = Colour(0x0000FF);

/// Embed description line for a tip of the given kind.
pub fn tip_description(tip: &Tip) -> &'static str {
    if tip.is_multi() {
        "Multi-Tip"
    } else {
        "New Betting Tip"
    }
}

/// Field triples for a tip embed.
///
/// A single tip renders five fixed fields; a multi-tip renders one field
/// per leg with the leg details stacked in the value.
pub fn tip_fields(tip: &Tip) -> Vec<(String, String, bool)> {
    match tip {
        Tip::Single {
            match_up,
            market,
            selection,
            odds,
            status,
            ..
        } => vec![
            ("Match".to_string(), match_up.clone(), true),
            ("Market".to_string(), market.clone(), true),
            ("Selection".to_string(), selection.clone(), true),
            ("Odds".to_string(), odds.to_string(), true),
            ("Status".to_string(), status.title_case().to_string(), true),
        ],
        Tip::Multi { legs, .. } => legs
            .iter()
            .enumerate()
            .map(|(index, leg)| {
                (
                    format!("Tip {}", index + 1),
                    format!(
                        "**Match**: {}\n**Market**: {}\n**Selection**: {}\n**Odds**: {}\n**Status**: {}",
                        leg.match_up, leg.market, leg.selection, leg.odds, leg.status
                    ),
                    true,
                )
            })
            .collect(),
    }
}

/// Builds the full tip embed, used both for the initial publish and for
/// the settlement edit (which rebuilds all fields from current statuses).
pub fn tip_embed(tip: &Tip, timestamp: Timestamp) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(tip.title())
        .description(tip_description(tip))
        .colour(TIP_COLOUR)
        .timestamp(timestamp);
    for (name, value, inline) in tip_fields(tip) {
        embed = embed.field(name, value, inline);
    }
    embed
}

/// Field triples for a statistics embed.
pub fn stats_fields(line: &StatLine) -> Vec<(String, String, bool)> {
    vec![
        ("Total Bets".to_string(), line.bets.to_string(), true),
        ("Winning Selections".to_string(), line.wins.to_string(), true),
        ("Losing Selections".to_string(), line.losses.to_string(), true),
        ("Total P/L".to_string(), format!("{:.2}", line.profit), true),
    ]
}

/// Builds the statistics summary embed.
pub fn stats_embed(timeframe_label: &str, line: &StatLine) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("Betting Stats ({timeframe_label})"))
        .colour(TIP_COLOUR)
        .timestamp(Timestamp::now());
    for (name, value, inline) in stats_fields(line) {
        embed = embed.field(name, value, inline);
    }
    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipbot_ledger::{Leg, Outcome, Tip};

    #[test]
    fn single_tip_renders_five_fixed_fields() {
        let tip = Tip::single("T1", "A v B", "1X2", "A", 2.5);
        assert_eq!(tip_description(&tip), "New Betting Tip");

        let fields = tip_fields(&tip);
        let names: Vec<&str> = fields.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, ["Match", "Market", "Selection", "Odds", "Status"]);
        assert_eq!(fields[0].1, "A v B");
        assert_eq!(fields[3].1, "2.5");
        assert_eq!(fields[4].1, "Pending");
        assert!(fields.iter().all(|(_, _, inline)| *inline));
    }

    #[test]
    fn settled_single_tip_capitalizes_the_result() {
        let mut tip = Tip::single("T1", "A v B", "1X2", "A", 2.5);
        tip.apply_outcome(Outcome::Win, 10.0);

        let fields = tip_fields(&tip);
        assert_eq!(fields[4].1, "Win");
    }

    #[test]
    fn multi_tip_renders_one_field_per_leg() {
        let mut tip = Tip::multi("M1");
        if let Tip::Multi { legs, .. } = &mut tip {
            legs.push(Leg::new("A v B", "1X2", "A", 1.5));
            legs.push(Leg::new("C v D", "O/U 2.5", "Over", 2.0));
        }
        assert_eq!(tip_description(&tip), "Multi-Tip");

        let fields = tip_fields(&tip);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "Tip 1");
        assert_eq!(fields[1].0, "Tip 2");
        assert!(fields[0].1.contains("**Match**: A v B"));
        assert!(fields[0].1.contains("**Status**: pending"));
        assert!(fields[1].1.contains("**Odds**: 2"));
    }

    #[test]
    fn settled_multi_tip_rebuilds_every_leg_field() {
        let mut tip = Tip::multi("M1");
        if let Tip::Multi { legs, .. } = &mut tip {
            legs.push(Leg::new("A v B", "1X2", "A", 1.5));
            legs.push(Leg::new("C v D", "1X2", "D", 2.0));
        }
        tip.apply_outcome(Outcome::Loss, 5.0);

        for (_, value, _) in tip_fields(&tip) {
            assert!(value.contains("**Status**: loss"));
        }
    }

    #[test]
    fn stats_fields_round_profit_to_two_decimals() {
        let line = StatLine {
            bets: 3,
            wins: 2,
            losses: 1,
            profit: 12.345,
        };
        let fields = stats_fields(&line);
        assert_eq!(fields[0].1, "3");
        assert_eq!(fields[1].1, "2");
        assert_eq!(fields[2].1, "1");
        assert_eq!(fields[3].1, "12.35");
    }

    #[test]
    fn empty_stats_render_zeroes() {
        let fields = stats_fields(&StatLine::default());
        assert_eq!(fields[3].1, "0.00");
    }
}
