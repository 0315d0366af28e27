use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::AppError;
use governor::{Quota, RateLimiter, state::{InMemoryState, NotKeyed}, clock::DefaultClock};
use serde_json::Value;
use std::cell::RefCell;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::StatsResponse;
use super::params::*;
use crate::rate_limit::RequestLog;

const MAX_RETRIES: u32 = 3;

pub struct StatsApiClient {
    config: Config,
    agent: ureq::Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    cache: ResponseCache,
    ledger: RefCell<RequestLog>,
    refresh: bool,
}

impl StatsApiClient {
    pub fn new(config: Config) -> Result<Self, AppError> {
        // 60 per minute keeps the steady rate at the 600 req / 10 min budget
        let rate_limiter = RateLimiter::direct(Quota::per_minute(NonZeroU32::new(60).unwrap()));
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build();
        let cache = ResponseCache::open(config.cache_ttl_hours);
        let ledger = RefCell::new(RequestLog::load()?);

        Ok(StatsApiClient {
            config,
            agent,
            rate_limiter,
            cache,
            ledger,
            refresh: false,
        })
    }

    /// Bypass cache reads for this run (responses are still written back).
    pub fn force_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn can_make_request(&self) -> bool {
        self.ledger.borrow_mut().can_make_request()
    }

    pub fn display_usage(&self) {
        self.ledger.borrow().display_status();
    }

    pub fn clear_cache(&self) -> Result<usize, AppError> {
        self.cache.clear()
    }

    fn cache_key(resource: &str, params: &[(&str, String)]) -> String {
        let mut key = resource.to_string();
        for (name, value) in params {
            key.push('_');
            key.push_str(name);
            key.push('_');
            key.push_str(value);
        }
        key
    }

    /// Cache-first fetch of one endpoint; all endpoint methods funnel here.
    fn get_stats(&self, resource: &str, params: &[(&str, String)]) -> Result<StatsResponse, AppError> {
        let key = Self::cache_key(resource, params);

        if !self.refresh {
            if let Some(payload) = self.cache.get(&key) {
                return serde_json::from_value(payload)
                    .map_err(|e| AppError::JsonError(e.to_string()));
            }
        }

        if !self.ledger.borrow_mut().can_make_request() {
            return Err(AppError::RateLimited);
        }

        let payload = self.execute_request(resource, params)?;
        self.cache.put(&key, &payload).ok();

        serde_json::from_value(payload).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn execute_request(&self, resource: &str, params: &[(&str, String)]) -> Result<Value, AppError> {
        let url = format!("{}/{}", self.config.base_url, resource);
        let mut retry_count = 0;

        loop {
            while self.rate_limiter.check().is_err() {
                thread::sleep(Duration::from_millis(50));
            }
            // Fixed pacing between sequential requests (provider guidance ~0.6s)
            thread::sleep(Duration::from_millis(self.config.request_delay_ms));

            let mut request = self
                .agent
                .get(&url)
                .set("User-Agent", "Mozilla/5.0 (compatible; nba_evaluate/0.1.0)")
                .set("Accept", "application/json, text/plain, */*")
                .set("Referer", "https://stats.nba.com/")
                .set("x-nba-stats-origin", "stats")
                .set("x-nba-stats-token", "true");
            for (name, value) in params {
                request = request.query(name, value);
            }

            {
                let mut ledger = self.ledger.borrow_mut();
                ledger.record_request();
                ledger.save().ok();
            }

            let error = match request.call() {
                Ok(response) => {
                    let body = response
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()))?;
                    return serde_json::from_str(&body)
                        .map_err(|e| AppError::JsonError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => AppError::RateLimited,
                Err(ureq::Error::Status(code, _)) => AppError::HttpStatus(code),
                Err(ureq::Error::Transport(transport)) => {
                    let text = transport.to_string();
                    if text.contains("timed out") {
                        AppError::Timeout
                    } else {
                        AppError::HttpError(text)
                    }
                }
            };

            if !error.is_transient() || retry_count >= MAX_RETRIES {
                return Err(error);
            }
            retry_count += 1;
            thread::sleep(Duration::from_millis(2000 * u64::from(retry_count)));
        }
    }

    // Common filter block the player dashboards share.
    fn dashboard_params(
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("PlayerID", player_id.to_string()),
            ("Season", season.to_string()),
            ("SeasonType", season_type.as_str().to_string()),
            ("MeasureType", MeasureType::Base.as_str().to_string()),
            ("PerMode", PerMode::PerGame.as_str().to_string()),
            ("LeagueID", LEAGUE_ID.to_string()),
            ("LastNGames", "0".to_string()),
            ("Month", "0".to_string()),
            ("OpponentTeamID", "0".to_string()),
            ("Period", "0".to_string()),
            ("PaceAdjust", "N".to_string()),
            ("PlusMinus", "N".to_string()),
            ("Rank", "N".to_string()),
        ]
    }

    fn league_dash_params(
        season: &Season,
        season_type: SeasonType,
        per_mode: PerMode,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("Season", season.to_string()),
            ("SeasonType", season_type.as_str().to_string()),
            ("MeasureType", MeasureType::Base.as_str().to_string()),
            ("PerMode", per_mode.as_str().to_string()),
            ("LeagueID", LEAGUE_ID.to_string()),
            ("LastNGames", "0".to_string()),
            ("Month", "0".to_string()),
            ("OpponentTeamID", "0".to_string()),
            ("Period", "0".to_string()),
            ("PaceAdjust", "N".to_string()),
            ("PlusMinus", "N".to_string()),
            ("Rank", "N".to_string()),
        ]
    }

    // ---- static-lookup backing call ----

    /// Full player roster; feeds `static_data::PlayerIndex`.
    pub fn all_players(&self, season: &Season) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::COMMON_ALL_PLAYERS,
            &[
                ("LeagueID", LEAGUE_ID.to_string()),
                ("Season", season.to_string()),
                ("IsOnlyCurrentSeason", "0".to_string()),
            ],
        )
    }

    // ---- player endpoints ----

    pub fn player_career_stats(
        &self,
        player_id: PlayerId,
        per_mode: PerMode,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::PLAYER_CAREER_STATS,
            &[
                ("PlayerID", player_id.to_string()),
                ("PerMode", per_mode.as_str().to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )
    }

    pub fn player_profile(
        &self,
        player_id: PlayerId,
        per_mode: PerMode,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::PLAYER_PROFILE,
            &[
                ("PlayerID", player_id.to_string()),
                ("PerMode", per_mode.as_str().to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )
    }

    pub fn common_player_info(&self, player_id: PlayerId) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::COMMON_PLAYER_INFO,
            &[
                ("PlayerID", player_id.to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )
    }

    pub fn player_game_log(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::PLAYER_GAME_LOG,
            &[
                ("PlayerID", player_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonType", season_type.as_str().to_string()),
            ],
        )
    }

    pub fn player_awards(&self, player_id: PlayerId) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::PLAYER_AWARDS,
            &[("PlayerID", player_id.to_string())],
        )
    }

    pub fn player_vs_player(
        &self,
        player_id: PlayerId,
        vs_player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        let mut params = Self::dashboard_params(player_id, season, season_type);
        params.push(("VsPlayerID", vs_player_id.to_string()));
        self.get_stats(endpoints::PLAYER_VS_PLAYER, &params)
    }

    // ---- player dashboards ----

    pub fn dashboard_general_splits(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::DASHBOARD_GENERAL_SPLITS,
            &Self::dashboard_params(player_id, season, season_type),
        )
    }

    pub fn dashboard_shooting_splits(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::DASHBOARD_SHOOTING_SPLITS,
            &Self::dashboard_params(player_id, season, season_type),
        )
    }

    pub fn dashboard_clutch(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::DASHBOARD_CLUTCH,
            &Self::dashboard_params(player_id, season, season_type),
        )
    }

    pub fn dashboard_year_over_year(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::DASHBOARD_YEAR_OVER_YEAR,
            &Self::dashboard_params(player_id, season, season_type),
        )
    }

    pub fn dashboard_by_opponent(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::DASHBOARD_BY_OPPONENT,
            &Self::dashboard_params(player_id, season, season_type),
        )
    }

    pub fn dashboard_last_n_games(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::DASHBOARD_LAST_N_GAMES,
            &Self::dashboard_params(player_id, season, season_type),
        )
    }

    pub fn dashboard_game_splits(
        &self,
        player_id: PlayerId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::DASHBOARD_GAME_SPLITS,
            &Self::dashboard_params(player_id, season, season_type),
        )
    }

    // ---- shot tracking ----

    pub fn shot_chart_detail(
        &self,
        player_id: PlayerId,
        team_id: TeamId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::SHOT_CHART_DETAIL,
            &[
                ("PlayerID", player_id.to_string()),
                ("TeamID", team_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonType", season_type.as_str().to_string()),
                ("ContextMeasure", "FGA".to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
                ("LastNGames", "0".to_string()),
                ("Month", "0".to_string()),
                ("OpponentTeamID", "0".to_string()),
                ("Period", "0".to_string()),
            ],
        )
    }

    pub fn tracking_shots(
        &self,
        player_id: PlayerId,
        team_id: TeamId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.tracking(endpoints::TRACKING_SHOTS, player_id, team_id, season, season_type)
    }

    pub fn tracking_rebounds(
        &self,
        player_id: PlayerId,
        team_id: TeamId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.tracking(endpoints::TRACKING_REBOUNDS, player_id, team_id, season, season_type)
    }

    pub fn tracking_passes(
        &self,
        player_id: PlayerId,
        team_id: TeamId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.tracking(endpoints::TRACKING_PASSES, player_id, team_id, season, season_type)
    }

    fn tracking(
        &self,
        resource: &str,
        player_id: PlayerId,
        team_id: TeamId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            resource,
            &[
                ("PlayerID", player_id.to_string()),
                ("TeamID", team_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonType", season_type.as_str().to_string()),
                ("PerMode", PerMode::PerGame.as_str().to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
                ("LastNGames", "0".to_string()),
                ("Month", "0".to_string()),
                ("OpponentTeamID", "0".to_string()),
                ("Period", "0".to_string()),
            ],
        )
    }

    // ---- league-wide endpoints ----

    pub fn hustle_stats(
        &self,
        season: &Season,
        season_type: SeasonType,
        per_mode: PerMode,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::HUSTLE_STATS_PLAYER,
            &[
                ("Season", season.to_string()),
                ("SeasonType", season_type.as_str().to_string()),
                ("PerMode", per_mode.as_str().to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )
    }

    pub fn league_player_stats(
        &self,
        season: &Season,
        season_type: SeasonType,
        per_mode: PerMode,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::LEAGUE_DASH_PLAYER_STATS,
            &Self::league_dash_params(season, season_type, per_mode),
        )
    }

    pub fn league_team_stats(
        &self,
        season: &Season,
        season_type: SeasonType,
        per_mode: PerMode,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::LEAGUE_DASH_TEAM_STATS,
            &Self::league_dash_params(season, season_type, per_mode),
        )
    }

    pub fn league_lineups(
        &self,
        season: &Season,
        season_type: SeasonType,
        group_quantity: u8,
    ) -> Result<StatsResponse, AppError> {
        let mut params = Self::league_dash_params(season, season_type, PerMode::PerGame);
        params.push(("GroupQuantity", group_quantity.to_string()));
        self.get_stats(endpoints::LEAGUE_DASH_LINEUPS, &params)
    }

    pub fn defense_dashboard(
        &self,
        season: &Season,
        season_type: SeasonType,
        category: DefenseCategory,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::LEAGUE_DASH_PT_DEFEND,
            &[
                ("Season", season.to_string()),
                ("SeasonType", season_type.as_str().to_string()),
                ("DefenseCategory", category.as_str().to_string()),
                ("PerMode", PerMode::PerGame.as_str().to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )
    }

    pub fn league_leaders(
        &self,
        season: &Season,
        season_type: SeasonType,
        stat_category: &str,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::LEAGUE_LEADERS,
            &[
                ("Season", season.to_string()),
                ("SeasonType", season_type.as_str().to_string()),
                ("StatCategory", stat_category.to_string()),
                ("PerMode", PerMode::PerGame.as_str().to_string()),
                ("Scope", "S".to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )
    }

    // ---- team endpoints ----

    pub fn team_game_log(
        &self,
        team_id: TeamId,
        season: &Season,
        season_type: SeasonType,
    ) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::TEAM_GAME_LOG,
            &[
                ("TeamID", team_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonType", season_type.as_str().to_string()),
            ],
        )
    }

    pub fn team_roster(&self, team_id: TeamId, season: &Season) -> Result<StatsResponse, AppError> {
        self.get_stats(
            endpoints::COMMON_TEAM_ROSTER,
            &[
                ("TeamID", team_id.to_string()),
                ("Season", season.to_string()),
                ("LeagueID", LEAGUE_ID.to_string()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_distinguish_params() {
        let a = StatsApiClient::cache_key(
            "playercareerstats",
            &[("PlayerID", "2544".to_string()), ("PerMode", "Totals".to_string())],
        );
        let b = StatsApiClient::cache_key(
            "playercareerstats",
            &[("PlayerID", "2544".to_string()), ("PerMode", "PerGame".to_string())],
        );
        assert_ne!(a, b);
        assert!(a.starts_with("playercareerstats_PlayerID_2544"));
    }

    #[test]
    fn dashboard_params_carry_required_filters() {
        let season = Season::parse("2023-24").unwrap();
        let params = StatsApiClient::dashboard_params(2544, &season, SeasonType::Regular);
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("PlayerID"), Some("2544"));
        assert_eq!(get("Season"), Some("2023-24"));
        assert_eq!(get("SeasonType"), Some("Regular Season"));
        assert_eq!(get("MeasureType"), Some("Base"));
        assert_eq!(get("OpponentTeamID"), Some("0"));
        assert_eq!(get("Rank"), Some("N"));
    }

    #[test]
    fn league_dash_params_respect_per_mode() {
        let season = Season::parse("2023-24").unwrap();
        let params = StatsApiClient::league_dash_params(&season, SeasonType::Playoffs, PerMode::Totals);
        assert!(params.contains(&("PerMode", "Totals".to_string())));
        assert!(params.contains(&("SeasonType", "Playoffs".to_string())));
    }
}
