use clap::Parser;
use indicatif::ProgressBar;
use nba_evaluate::analysis::profile::{career_row_for_season, StatProfile};
use nba_evaluate::analysis::shot_zones;
use nba_evaluate::analysis::similarity::{self, find_archetype, Archetype};
use nba_evaluate::api::client::StatsApiClient;
use nba_evaluate::api::models::ShotChartRow;
use nba_evaluate::api::params::{PerMode, Season, SeasonType, ALL_TEAMS};
use nba_evaluate::api::static_data::{Player, PlayerIndex};
use nba_evaluate::config::Config;
use nba_evaluate::display::output::{
    display_error, display_info, display_profile_comparison, display_shot_insights,
    display_similarity, display_strengths_weaknesses, display_success, display_warning,
    display_zone_summary,
};
use nba_evaluate::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "NBA Evaluate")]
#[command(about = "Evaluate an NBA player against another player or an archetype", long_about = None)]
struct Args {
    /// Player to evaluate, by full name (e.g. "Nikola Jokic")
    #[arg(required_unless_present = "clear_cache")]
    player: Option<String>,

    /// Compare against another player, by full name
    #[arg(short, long, conflicts_with = "archetype")]
    target: Option<String>,

    /// Compare against a predefined archetype (e.g. "Elite Scorer")
    #[arg(short, long)]
    archetype: Option<String>,

    /// Season to evaluate, e.g. 2023-24 (default: season in progress)
    #[arg(short, long)]
    season: Option<String>,

    /// Season segment
    #[arg(long, value_enum, default_value_t = SeasonType::Regular)]
    season_type: SeasonType,

    /// Fetch measured shooting-zone and clutch dashboards (slower)
    #[arg(long)]
    advanced: bool,

    /// Include shot-chart zone analysis
    #[arg(long)]
    shot_chart: bool,

    /// Ignore cached responses for this run
    #[arg(long)]
    refresh: bool,

    /// Drop every cached response and exit
    #[arg(long)]
    clear_cache: bool,
}

enum TargetSpec {
    Player(Player),
    Archetype(&'static Archetype),
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = Config::from_env()?;
    let season = match &args.season {
        Some(value) => Season::parse(value)?,
        None => Season::current(),
    };

    let client = StatsApiClient::new(config)?.force_refresh(args.refresh);

    if args.clear_cache {
        let removed = client.clear_cache()?;
        display_success(&format!("Cleared {} cached responses", removed));
        return Ok(());
    }

    let player_name = args
        .player
        .as_deref()
        .ok_or_else(|| AppError::ConfigError("player name is required".to_string()))?;

    if !client.can_make_request() {
        client.display_usage();
        return Err(AppError::RateLimited);
    }

    display_info(&format!(
        "Evaluating {} — {} ({})",
        player_name,
        season,
        args.season_type.as_str()
    ));

    // Step 1: resolve identities through the player index
    display_info("Step 1: Loading player index...");
    let index = PlayerIndex::from_response(&client.all_players(&season)?)?;
    let active = index.active_players(season.start_year()).len();
    display_success(&format!("Loaded {} players ({} active)", index.len(), active));

    let player = resolve_player(&index, player_name)?.clone();

    let spec = match (&args.target, &args.archetype) {
        (Some(name), _) => TargetSpec::Player(resolve_player(&index, name)?.clone()),
        (None, Some(name)) => TargetSpec::Archetype(find_archetype(name).ok_or_else(|| {
            AppError::ConfigError(format!(
                "unknown archetype '{}' (available: {})",
                name,
                similarity::archetype_names().join(", ")
            ))
        })?),
        (None, None) => {
            return Err(AppError::ConfigError(format!(
                "specify --target <player> or --archetype <name> (archetypes: {})",
                similarity::archetype_names().join(", ")
            )))
        }
    };

    // Step 2: season stat lines
    display_info("Step 2: Fetching career stats...");
    let mut player_profile = season_profile(&client, &player, &season)?;
    display_success(&format!(
        "{}: {:.1} ppg / {:.1} rpg / {:.1} apg",
        player.full_name, player_profile.ppg, player_profile.rpg, player_profile.apg
    ));

    let (target_name, mut target_profile) = match &spec {
        TargetSpec::Player(target_player) => {
            let profile = season_profile(&client, target_player, &season)?;
            display_success(&format!(
                "{}: {:.1} ppg / {:.1} rpg / {:.1} apg",
                target_player.full_name, profile.ppg, profile.rpg, profile.apg
            ));
            (target_player.full_name.clone(), profile)
        }
        TargetSpec::Archetype(archetype) => {
            (format!("{} Archetype", archetype.name), archetype.profile)
        }
    };

    // Step 3: measured zone + clutch numbers replace the estimates
    if args.advanced {
        display_info("Step 3: Fetching advanced dashboards...");
        let requests = match &spec {
            TargetSpec::Player(_) => 4,
            TargetSpec::Archetype(_) => 2,
        };
        let pb = ProgressBar::new(requests);
        pb.set_message("Fetching advanced dashboards");

        apply_advanced(&client, &player, &season, args.season_type, &mut player_profile, &pb)?;
        if let TargetSpec::Player(target_player) = &spec {
            apply_advanced(&client, target_player, &season, args.season_type, &mut target_profile, &pb)?;
        }
        pb.finish_with_message("✓ Advanced stats fetched");
    }

    // Step 4: evaluate and render
    display_profile_comparison(&player.full_name, &target_name, &player_profile, &target_profile);

    let score = similarity::similarity_score(&player_profile, &target_profile);
    display_similarity(&player.full_name, &target_name, score);

    let strengths = similarity::relative_strengths(&player_profile, &target_profile);
    let weaknesses = similarity::relative_weaknesses(&player_profile, &target_profile);
    display_strengths_weaknesses(&strengths, &weaknesses);

    if args.shot_chart {
        display_info("Fetching shot chart...");
        let response = client.shot_chart_detail(player.id, ALL_TEAMS, &season, args.season_type)?;
        let set = response
            .result_set("Shot_Chart_Detail")
            .or_else(|_| response.first_result_set())?;
        let shots = ShotChartRow::collect(set)?;

        if shots.is_empty() {
            display_warning(&format!("No shot chart data available for {}", player.full_name));
        } else {
            let zones = shot_zones::summarize(&shots);
            display_zone_summary(&player.full_name, &zones);
            if let Some(insights) = shot_zones::analyze(&shots) {
                let tendencies = shot_zones::tendency_labels(&insights);
                display_shot_insights(&player.full_name, &insights, &tendencies);
            }
        }
    }

    client.display_usage();

    Ok(())
}

fn resolve_player<'a>(index: &'a PlayerIndex, name: &str) -> Result<&'a Player, AppError> {
    if let Some(player) = index.find_by_name(name) {
        return Ok(player);
    }

    let suggestions: Vec<String> = index
        .search(name)
        .into_iter()
        .take(5)
        .map(|p| p.full_name.clone())
        .collect();

    if suggestions.is_empty() {
        Err(AppError::PlayerNotFound(name.to_string()))
    } else {
        Err(AppError::PlayerNotFound(format!(
            "{} (did you mean: {}?)",
            name,
            suggestions.join(", ")
        )))
    }
}

fn season_profile(
    client: &StatsApiClient,
    player: &Player,
    season: &Season,
) -> Result<StatProfile, AppError> {
    let career = client.player_career_stats(player.id, PerMode::Totals)?;
    let row = career_row_for_season(&career, season)
        .map_err(|_| AppError::NoStatsAvailable(format!("{} in {}", player.full_name, season)))?;
    Ok(StatProfile::from_career_row(&row))
}

fn apply_advanced(
    client: &StatsApiClient,
    player: &Player,
    season: &Season,
    season_type: SeasonType,
    profile: &mut StatProfile,
    pb: &ProgressBar,
) -> Result<(), AppError> {
    let splits = client.dashboard_shooting_splits(player.id, season, season_type)?;
    profile.apply_shooting_splits(&splits)?;
    pb.inc(1);

    let clutch = client.dashboard_clutch(player.id, season, season_type)?;
    profile.apply_clutch(&clutch)?;
    pb.inc(1);

    Ok(())
}
