// Resource names under the stats base URL. Parameter assembly lives with
// the matching client method.

pub const COMMON_ALL_PLAYERS: &str = "commonallplayers";
pub const COMMON_PLAYER_INFO: &str = "commonplayerinfo";
pub const COMMON_TEAM_ROSTER: &str = "commonteamroster";

pub const PLAYER_CAREER_STATS: &str = "playercareerstats";
pub const PLAYER_PROFILE: &str = "playerprofilev2";
pub const PLAYER_GAME_LOG: &str = "playergamelog";
pub const PLAYER_AWARDS: &str = "playerawards";
pub const PLAYER_VS_PLAYER: &str = "playervsplayer";

pub const DASHBOARD_GENERAL_SPLITS: &str = "playerdashboardbygeneralsplits";
pub const DASHBOARD_SHOOTING_SPLITS: &str = "playerdashboardbyshootingsplits";
pub const DASHBOARD_CLUTCH: &str = "playerdashboardbyclutch";
pub const DASHBOARD_YEAR_OVER_YEAR: &str = "playerdashboardbyyearoveryear";
pub const DASHBOARD_BY_OPPONENT: &str = "playerdashboardbyopponent";
pub const DASHBOARD_LAST_N_GAMES: &str = "playerdashboardbylastngames";
pub const DASHBOARD_GAME_SPLITS: &str = "playerdashboardbygamesplits";

pub const SHOT_CHART_DETAIL: &str = "shotchartdetail";
pub const TRACKING_SHOTS: &str = "playerdashptshots";
pub const TRACKING_REBOUNDS: &str = "playerdashptreb";
pub const TRACKING_PASSES: &str = "playerdashptpass";

pub const HUSTLE_STATS_PLAYER: &str = "leaguehustlestatsplayer";
pub const LEAGUE_DASH_PLAYER_STATS: &str = "leaguedashplayerstats";
pub const LEAGUE_DASH_TEAM_STATS: &str = "leaguedashteamstats";
pub const LEAGUE_DASH_LINEUPS: &str = "leaguedashlineups";
pub const LEAGUE_DASH_PT_DEFEND: &str = "leaguedashptdefend";
pub const LEAGUE_LEADERS: &str = "leagueleaders";

pub const TEAM_GAME_LOG: &str = "teamgamelog";
