use crate::api::models::StatsResponse;
use crate::api::params::{PlayerId, TeamId};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Franchise entry. The team list never changes mid-season, so it ships
/// embedded rather than over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub abbreviation: &'static str,
    pub nickname: &'static str,
    pub city: &'static str,
}

impl Team {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }
}

pub const TEAMS: [Team; 30] = [
    Team { id: 1610612737, abbreviation: "ATL", nickname: "Hawks", city: "Atlanta" },
    Team { id: 1610612738, abbreviation: "BOS", nickname: "Celtics", city: "Boston" },
    Team { id: 1610612751, abbreviation: "BKN", nickname: "Nets", city: "Brooklyn" },
    Team { id: 1610612766, abbreviation: "CHA", nickname: "Hornets", city: "Charlotte" },
    Team { id: 1610612741, abbreviation: "CHI", nickname: "Bulls", city: "Chicago" },
    Team { id: 1610612739, abbreviation: "CLE", nickname: "Cavaliers", city: "Cleveland" },
    Team { id: 1610612742, abbreviation: "DAL", nickname: "Mavericks", city: "Dallas" },
    Team { id: 1610612743, abbreviation: "DEN", nickname: "Nuggets", city: "Denver" },
    Team { id: 1610612765, abbreviation: "DET", nickname: "Pistons", city: "Detroit" },
    Team { id: 1610612744, abbreviation: "GSW", nickname: "Warriors", city: "Golden State" },
    Team { id: 1610612745, abbreviation: "HOU", nickname: "Rockets", city: "Houston" },
    Team { id: 1610612754, abbreviation: "IND", nickname: "Pacers", city: "Indiana" },
    Team { id: 1610612746, abbreviation: "LAC", nickname: "Clippers", city: "LA" },
    Team { id: 1610612747, abbreviation: "LAL", nickname: "Lakers", city: "Los Angeles" },
    Team { id: 1610612763, abbreviation: "MEM", nickname: "Grizzlies", city: "Memphis" },
    Team { id: 1610612748, abbreviation: "MIA", nickname: "Heat", city: "Miami" },
    Team { id: 1610612749, abbreviation: "MIL", nickname: "Bucks", city: "Milwaukee" },
    Team { id: 1610612750, abbreviation: "MIN", nickname: "Timberwolves", city: "Minnesota" },
    Team { id: 1610612740, abbreviation: "NOP", nickname: "Pelicans", city: "New Orleans" },
    Team { id: 1610612752, abbreviation: "NYK", nickname: "Knicks", city: "New York" },
    Team { id: 1610612760, abbreviation: "OKC", nickname: "Thunder", city: "Oklahoma City" },
    Team { id: 1610612753, abbreviation: "ORL", nickname: "Magic", city: "Orlando" },
    Team { id: 1610612755, abbreviation: "PHI", nickname: "76ers", city: "Philadelphia" },
    Team { id: 1610612756, abbreviation: "PHX", nickname: "Suns", city: "Phoenix" },
    Team { id: 1610612757, abbreviation: "POR", nickname: "Trail Blazers", city: "Portland" },
    Team { id: 1610612758, abbreviation: "SAC", nickname: "Kings", city: "Sacramento" },
    Team { id: 1610612759, abbreviation: "SAS", nickname: "Spurs", city: "San Antonio" },
    Team { id: 1610612761, abbreviation: "TOR", nickname: "Raptors", city: "Toronto" },
    Team { id: 1610612762, abbreviation: "UTA", nickname: "Jazz", city: "Utah" },
    Team { id: 1610612764, abbreviation: "WAS", nickname: "Wizards", city: "Washington" },
];

pub fn all_teams() -> &'static [Team] {
    &TEAMS
}

pub fn find_team_by_id(id: TeamId) -> Option<&'static Team> {
    TEAMS.iter().find(|team| team.id == id)
}

pub fn find_team_by_abbreviation(abbr: &str) -> Option<&'static Team> {
    TEAMS
        .iter()
        .find(|team| team.abbreviation.eq_ignore_ascii_case(abbr))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
    pub team_id: TeamId,
    pub team_abbreviation: String,
    pub from_year: i64,
    pub to_year: i64,
    pub on_roster: bool,
}

impl Player {
    /// On a roster now, or played within a year of the given season start.
    pub fn is_active(&self, season_start_year: i32) -> bool {
        self.on_roster || self.to_year >= i64::from(season_start_year) - 1
    }
}

/// Full player roster, hydrated once per cache TTL from the all-players
/// endpoint and queried locally after that.
#[derive(Debug, Clone)]
pub struct PlayerIndex {
    players: Vec<Player>,
}

impl PlayerIndex {
    pub fn from_response(response: &StatsResponse) -> Result<Self, AppError> {
        let set = response
            .result_set("CommonAllPlayers")
            .or_else(|_| response.first_result_set())?;

        let mut players = Vec::with_capacity(set.row_set.len());
        for row in set.rows() {
            players.push(Player {
                id: row.u64("PERSON_ID")?,
                full_name: row.str("DISPLAY_FIRST_LAST")?,
                team_id: row.u64("TEAM_ID")?,
                team_abbreviation: row.str("TEAM_ABBREVIATION")?,
                from_year: row.i64("FROM_YEAR")?,
                to_year: row.i64("TO_YEAR")?,
                on_roster: row.i64("ROSTERSTATUS")? == 1,
            });
        }
        players.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        Ok(PlayerIndex { players })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn find_by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.full_name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive substring search, for "did you mean" suggestions.
    pub fn search(&self, term: &str) -> Vec<&Player> {
        let needle = term.to_lowercase();
        self.players
            .iter()
            .filter(|p| p.full_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Active players only, deduplicated by name (the roster list carries
    /// the occasional duplicate entry).
    pub fn active_players(&self, season_start_year: i32) -> Vec<&Player> {
        let mut seen = std::collections::HashSet::new();
        self.players
            .iter()
            .filter(|p| p.is_active(season_start_year))
            .filter(|p| seen.insert(p.full_name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn index() -> PlayerIndex {
        let resp: StatsResponse = serde_json::from_value(json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_FIRST_LAST", "ROSTERSTATUS",
                            "FROM_YEAR", "TO_YEAR", "TEAM_ID", "TEAM_ABBREVIATION"],
                "rowSet": [
                    [2544, "LeBron James", 1, "2003", "2024", 1610612747, "LAL"],
                    [201939, "Stephen Curry", 1, "2009", "2024", 1610612744, "GSW"],
                    [893, "Michael Jordan", 0, "1984", "2002", 0, ""],
                    [201939, "Stephen Curry", 1, "2009", "2024", 1610612744, "GSW"]
                ]
            }]
        }))
        .unwrap();
        PlayerIndex::from_response(&resp).unwrap()
    }

    #[test]
    fn thirty_teams_with_unique_ids() {
        assert_eq!(TEAMS.len(), 30);
        let mut ids: Vec<_> = TEAMS.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn team_lookups() {
        let nuggets = find_team_by_abbreviation("den").unwrap();
        assert_eq!(nuggets.id, 1610612743);
        assert_eq!(nuggets.full_name(), "Denver Nuggets");
        assert_eq!(find_team_by_id(1610612738).unwrap().abbreviation, "BOS");
        assert!(find_team_by_abbreviation("SEA").is_none());
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        let index = index();
        assert_eq!(index.find_by_name("stephen curry").unwrap().id, 201939);
        assert!(index.find_by_name("Steph").is_none());
    }

    #[test]
    fn search_matches_substrings() {
        let index = index();
        let hits = index.search("james");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].full_name, "LeBron James");
    }

    #[test]
    fn active_filter_drops_retired_and_dedupes() {
        let index = index();
        let active = index.active_players(2023);
        let names: Vec<_> = active.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["LeBron James", "Stephen Curry"]);
    }

    #[test]
    fn recently_active_counts_without_roster_flag() {
        let player = Player {
            id: 1,
            full_name: "Recent Retiree".to_string(),
            team_id: 0,
            team_abbreviation: String::new(),
            from_year: 2015,
            to_year: 2022,
            on_roster: false,
        };
        assert!(player.is_active(2023));
        assert!(!player.is_active(2024));
    }
}
