use crate::api::models::{CareerSeasonRow, StatsResponse};
use crate::api::params::Season;
use crate::error::AppError;

/// The per-player stat line the evaluator scores. Counting stats are
/// per-game; the rest are fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatProfile {
    pub ppg: f64,
    pub rpg: f64,
    pub apg: f64,
    pub fg_pct: f64,
    pub three_pct: f64,
    pub ft_pct: f64,
    pub paint_fg: f64,
    pub midrange_fg: f64,
    pub corner_three: f64,
    pub clutch_fg: f64,
    pub fast_break_fg: f64,
    pub games_played: f64,
    pub minutes_per_game: f64,
}

impl StatProfile {
    /// Build from a season line of career totals. Zone and clutch numbers
    /// start as estimates off the overall percentages; the dashboard
    /// endpoints overwrite them with measured values when available.
    pub fn from_career_row(row: &CareerSeasonRow) -> Self {
        let games = row.games_played.max(1.0);
        let mut profile = StatProfile {
            ppg: row.points / games,
            rpg: row.rebounds / games,
            apg: row.assists / games,
            fg_pct: row.fg_pct,
            three_pct: row.fg3_pct,
            ft_pct: row.ft_pct,
            paint_fg: if row.fg_pct > 0.0 { row.fg_pct * 1.15 } else { 0.5 },
            midrange_fg: if row.fg_pct > 0.0 { row.fg_pct * 0.85 } else { 0.4 },
            corner_three: if row.fg3_pct > 0.0 { row.fg3_pct * 1.1 } else { 0.35 },
            clutch_fg: if row.fg_pct > 0.0 { row.fg_pct * 0.9 } else { 0.45 },
            fast_break_fg: if row.fg_pct > 0.0 { row.fg_pct * 1.2 } else { 0.6 },
            games_played: row.games_played,
            minutes_per_game: row.minutes / games,
        };
        profile.cap_percentages();
        profile
    }

    /// Overwrite zone estimates with measured values from the shot-area
    /// result set of the shooting-splits dashboard.
    pub fn apply_shooting_splits(&mut self, response: &StatsResponse) -> Result<(), AppError> {
        let set = match response
            .result_set("ShotAreaPlayerDashboard")
            .ok()
            .or_else(|| response.result_sets.get(1))
        {
            Some(set) => set,
            None => return Ok(()),
        };

        for row in set.rows() {
            let zone = row.str("GROUP_VALUE")?.to_lowercase();
            let fg_pct = row.f64("FG_PCT")?;
            if zone.contains("paint") {
                self.paint_fg = fg_pct;
            } else if zone.contains("mid-range") || zone.contains("midrange") {
                self.midrange_fg = fg_pct;
            } else if zone.contains("corner 3") {
                self.corner_three = fg_pct;
            }
        }
        self.cap_percentages();
        Ok(())
    }

    /// Overwrite the clutch estimate with the overall clutch dashboard line.
    pub fn apply_clutch(&mut self, response: &StatsResponse) -> Result<(), AppError> {
        let set = response.first_result_set()?;
        if let Some(row) = set.rows().next() {
            self.clutch_fg = row.f64("FG_PCT")?;
            self.cap_percentages();
        }
        Ok(())
    }

    fn cap_percentages(&mut self) {
        for pct in [
            &mut self.fg_pct,
            &mut self.three_pct,
            &mut self.ft_pct,
            &mut self.paint_fg,
            &mut self.midrange_fg,
            &mut self.corner_three,
            &mut self.clutch_fg,
            &mut self.fast_break_fg,
        ] {
            if *pct > 1.0 {
                *pct = 1.0;
            }
        }
    }
}

/// Pick the requested season's line from the career response, falling back
/// to the most recent season the player actually has.
pub fn career_row_for_season(
    response: &StatsResponse,
    season: &Season,
) -> Result<CareerSeasonRow, AppError> {
    let set = response
        .result_set("SeasonTotalsRegularSeason")
        .or_else(|_| response.first_result_set())?;

    let mut fallback = None;
    for row in set.rows() {
        let parsed = CareerSeasonRow::from_row(&row)?;
        if parsed.season_id.contains(season.as_str()) {
            return Ok(parsed);
        }
        fallback = Some(parsed);
    }
    fallback.ok_or_else(|| AppError::NoStatsAvailable(season.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pts: f64, gp: f64, fg: f64, fg3: f64) -> CareerSeasonRow {
        CareerSeasonRow {
            season_id: "2023-24".to_string(),
            team_abbreviation: "DEN".to_string(),
            games_played: gp,
            minutes: gp * 34.0,
            points: pts,
            rebounds: gp * 9.0,
            assists: gp * 7.0,
            fg_pct: fg,
            fg3_pct: fg3,
            ft_pct: 0.8,
        }
    }

    #[test]
    fn per_game_division_and_estimates() {
        let profile = StatProfile::from_career_row(&row(2085.0, 79.0, 0.583, 0.359));
        assert!((profile.ppg - 2085.0 / 79.0).abs() < 1e-9);
        assert!((profile.rpg - 9.0).abs() < 1e-9);
        assert!((profile.minutes_per_game - 34.0).abs() < 1e-9);
        assert!((profile.paint_fg - 0.583 * 1.15).abs() < 1e-9);
        assert!((profile.corner_three - 0.359 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn zero_games_does_not_divide_by_zero() {
        let profile = StatProfile::from_career_row(&row(0.0, 0.0, 0.0, 0.0));
        assert_eq!(profile.ppg, 0.0);
        assert_eq!(profile.games_played, 0.0);
        // no measured percentages, so the neutral estimates apply
        assert_eq!(profile.paint_fg, 0.5);
        assert_eq!(profile.fast_break_fg, 0.6);
    }

    #[test]
    fn estimates_are_capped_at_one() {
        let profile = StatProfile::from_career_row(&row(100.0, 10.0, 0.95, 0.95));
        assert_eq!(profile.paint_fg, 1.0);
        assert_eq!(profile.fast_break_fg, 1.0);
        assert_eq!(profile.corner_three, 1.0);
    }

    #[test]
    fn shooting_splits_overwrite_estimates() {
        let mut profile = StatProfile::from_career_row(&row(2085.0, 79.0, 0.583, 0.359));
        let resp: StatsResponse = serde_json::from_value(json!({
            "resultSets": [
                {"name": "OverallPlayerDashboard", "headers": ["FG_PCT"], "rowSet": [[0.58]]},
                {"name": "ShotAreaPlayerDashboard",
                 "headers": ["GROUP_VALUE", "FG_PCT"],
                 "rowSet": [
                    ["Restricted Area", 0.75],
                    ["In The Paint (Non-RA)", 0.61],
                    ["Mid-Range", 0.47],
                    ["Left Corner 3", 0.42],
                    ["Corner 3", 0.44]
                 ]}
            ]
        }))
        .unwrap();

        profile.apply_shooting_splits(&resp).unwrap();
        assert!((profile.paint_fg - 0.61).abs() < 1e-9);
        assert!((profile.midrange_fg - 0.47).abs() < 1e-9);
        assert!((profile.corner_three - 0.44).abs() < 1e-9);
    }

    #[test]
    fn clutch_dashboard_overwrites_estimate() {
        let mut profile = StatProfile::from_career_row(&row(2085.0, 79.0, 0.583, 0.359));
        let resp: StatsResponse = serde_json::from_value(json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["GROUP_VALUE", "FG_PCT"],
                "rowSet": [["2023-24", 0.512]]
            }]
        }))
        .unwrap();
        profile.apply_clutch(&resp).unwrap();
        assert!((profile.clutch_fg - 0.512).abs() < 1e-9);
    }

    #[test]
    fn season_selection_prefers_requested_then_latest() {
        let resp: StatsResponse = serde_json::from_value(json!({
            "resultSets": [{
                "name": "SeasonTotalsRegularSeason",
                "headers": ["SEASON_ID", "TEAM_ABBREVIATION", "GP", "MIN",
                            "PTS", "REB", "AST", "FG_PCT", "FG3_PCT", "FT_PCT"],
                "rowSet": [
                    ["2022-23", "DEN", 69, 2323.0, 1690, 817, 678, 0.632, 0.383, 0.822],
                    ["2023-24", "DEN", 79, 2737.0, 2085, 976, 708, 0.583, 0.359, 0.817]
                ]
            }]
        }))
        .unwrap();

        let requested = Season::parse("2022-23").unwrap();
        assert_eq!(career_row_for_season(&resp, &requested).unwrap().season_id, "2022-23");

        let absent = Season::parse("2019-20").unwrap();
        assert_eq!(career_row_for_season(&resp, &absent).unwrap().season_id, "2023-24");
    }

    #[test]
    fn empty_career_is_an_error() {
        let resp: StatsResponse = serde_json::from_value(json!({
            "resultSets": [{
                "name": "SeasonTotalsRegularSeason",
                "headers": ["SEASON_ID"],
                "rowSet": []
            }]
        }))
        .unwrap();
        let season = Season::parse("2023-24").unwrap();
        assert!(matches!(
            career_row_for_season(&resp, &season),
            Err(AppError::NoStatsAvailable(_))
        ));
    }
}
