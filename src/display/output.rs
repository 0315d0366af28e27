use crate::analysis::profile::StatProfile;
use crate::analysis::shot_zones::{ShotInsights, ZoneSummary};
use crate::analysis::similarity::StatDelta;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Stat")]
    stat: String,
    player: String,
    target: String,
}

#[derive(Tabled)]
struct ZoneRow {
    zone: String,
    attempts: String,
    makes: String,
    #[tabled(rename = "FG%")]
    fg_pct: String,
    rating: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

fn count(value: f64) -> String {
    format!("{:.1}", value)
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn display_profile_comparison(
    player_name: &str,
    target_name: &str,
    player: &StatProfile,
    target: &StatProfile,
) {
    println!(
        "\n{}",
        format!("🏀 {} vs {}", player_name, target_name).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let rows = vec![
        ComparisonRow { stat: "PPG".to_string(), player: count(player.ppg), target: count(target.ppg) },
        ComparisonRow { stat: "RPG".to_string(), player: count(player.rpg), target: count(target.rpg) },
        ComparisonRow { stat: "APG".to_string(), player: count(player.apg), target: count(target.apg) },
        ComparisonRow { stat: "FG%".to_string(), player: pct(player.fg_pct), target: pct(target.fg_pct) },
        ComparisonRow { stat: "3P%".to_string(), player: pct(player.three_pct), target: pct(target.three_pct) },
        ComparisonRow { stat: "FT%".to_string(), player: pct(player.ft_pct), target: pct(target.ft_pct) },
        ComparisonRow { stat: "Paint FG%".to_string(), player: pct(player.paint_fg), target: pct(target.paint_fg) },
        ComparisonRow { stat: "Mid-Range FG%".to_string(), player: pct(player.midrange_fg), target: pct(target.midrange_fg) },
        ComparisonRow { stat: "Corner 3%".to_string(), player: pct(player.corner_three), target: pct(target.corner_three) },
        ComparisonRow { stat: "Clutch FG%".to_string(), player: pct(player.clutch_fg), target: pct(target.clutch_fg) },
        ComparisonRow { stat: "Fast Break FG%".to_string(), player: pct(player.fast_break_fg), target: pct(target.fast_break_fg) },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!(
        "\n{} {:.0} games, {:.1} minutes per game\n",
        "Workload:".bold(),
        player.games_played,
        player.minutes_per_game
    );
}

pub fn display_similarity(player_name: &str, target_name: &str, score: f64) {
    println!("{}", "Similarity".bold().yellow());
    let verdict = if score >= 85.0 {
        "Near-identical production".green()
    } else if score >= 70.0 {
        "Strong stylistic match".green()
    } else if score >= 50.0 {
        "Partial overlap".yellow()
    } else {
        "Different player profile".red()
    };
    println!(
        "  {} is {} similar to {} — {}\n",
        player_name,
        format!("{:.1}%", score).bold(),
        target_name,
        verdict
    );
}

pub fn display_strengths_weaknesses(strengths: &[StatDelta], weaknesses: &[StatDelta]) {
    println!("{}", "💪 Relative Strengths".bold().green());
    if strengths.is_empty() {
        println!("  No significant statistical advantages identified");
    }
    for delta in strengths {
        println!("  • {}: +{:.1}% vs target", delta.label, delta.pct_diff);
    }

    println!("\n{}", "⚠️  Areas for Improvement".bold().red());
    if weaknesses.is_empty() {
        println!("  No significant statistical disadvantages identified");
    }
    for delta in weaknesses {
        println!("  • {}: -{:.1}% vs target", delta.label, delta.pct_diff);
    }
    println!();
}

pub fn display_zone_summary(player_name: &str, zones: &[ZoneSummary]) {
    println!(
        "\n{}",
        format!("🎯 {} — Zone Efficiency", player_name).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if zones.is_empty() {
        println!("{}", "No shot data available".yellow());
        return;
    }

    let rows: Vec<ZoneRow> = zones
        .iter()
        .map(|summary| {
            let rating = summary.rating();
            ZoneRow {
                zone: summary.zone.label().to_string(),
                attempts: summary.attempts.to_string(),
                makes: summary.makes.to_string(),
                fg_pct: pct(summary.fg_pct()),
                rating: rating.label().to_string(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_shot_insights(player_name: &str, insights: &ShotInsights, tendencies: &[&str]) {
    println!("\n{}", format!("📈 {} Shooting Insights", player_name).bold().cyan());
    println!(
        "  {} shots, {} overall, {:.1} ft average distance",
        insights.total_shots,
        pct(insights.overall_fg_pct),
        insights.avg_distance
    );
    println!(
        "  3PT: {} attempts at {} | 2PT: {} attempts at {}",
        insights.three_point_attempts,
        pct(insights.three_point_pct),
        insights.two_point_attempts,
        pct(insights.two_point_pct)
    );
    println!(
        "  Close range: {} of attempts at {}",
        pct(insights.close_shot_frequency),
        pct(insights.close_shot_pct)
    );
    if let Some((zone, fg)) = insights.best_zone {
        println!("  Best zone: {} at {}", zone.label().bold(), pct(fg));
    }

    if !tendencies.is_empty() {
        println!("\n{}", "Tendencies".bold().yellow());
        for label in tendencies {
            println!("  • {}", label);
        }
    }
    println!();
}
