use crate::error::AppError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Table-shaped envelope every stats endpoint returns: one or more named
/// result sets, each a header row plus loosely-typed cells.
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub resource: String,
    #[serde(
        rename = "resultSets",
        alias = "resultSet",
        deserialize_with = "one_or_many",
        default
    )]
    pub result_sets: Vec<ResultSet>,
}

// A few endpoints (league leaders among them) return a bare "resultSet"
// object instead of the usual array.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ResultSet>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ResultSet>),
        One(ResultSet),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(sets) => sets,
        OneOrMany::One(set) => vec![set],
    })
}

impl StatsResponse {
    pub fn result_set(&self, name: &str) -> Result<&ResultSet, AppError> {
        self.result_sets
            .iter()
            .find(|set| set.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::MissingResultSet(name.to_string()))
    }

    pub fn first_result_set(&self) -> Result<&ResultSet, AppError> {
        self.result_sets
            .first()
            .ok_or_else(|| AppError::MissingResultSet("<first>".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    #[serde(default)]
    pub name: String,
    pub headers: Vec<String>,
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn column(&self, header: &str) -> Result<usize, AppError> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(header))
            .ok_or_else(|| AppError::MissingColumn {
                result_set: self.name.clone(),
                column: header.to_string(),
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.row_set.iter().map(move |cells| Row { set: self, cells })
    }

    pub fn is_empty(&self) -> bool {
        self.row_set.is_empty()
    }
}

/// One row of a result set, with cell access by header name. The provider
/// emits nulls freely, so absent values decode as defaults.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    set: &'a ResultSet,
    cells: &'a [Value],
}

impl Row<'_> {
    fn cell(&self, header: &str) -> Result<&Value, AppError> {
        let idx = self.set.column(header)?;
        Ok(self.cells.get(idx).unwrap_or(&Value::Null))
    }

    pub fn str(&self, header: &str) -> Result<String, AppError> {
        Ok(match self.cell(header)? {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn f64(&self, header: &str) -> Result<f64, AppError> {
        Ok(match self.cell(header)? {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.parse().unwrap_or(0.0),
            _ => 0.0,
        })
    }

    pub fn i64(&self, header: &str) -> Result<i64, AppError> {
        Ok(match self.cell(header)? {
            Value::Number(n) => n.as_i64().unwrap_or(0),
            Value::String(s) => s.parse().unwrap_or(0),
            _ => 0,
        })
    }

    pub fn u64(&self, header: &str) -> Result<u64, AppError> {
        Ok(self.i64(header)?.max(0) as u64)
    }
}

/// One season line from the career-stats endpoint.
#[derive(Debug, Clone)]
pub struct CareerSeasonRow {
    pub season_id: String,
    pub team_abbreviation: String,
    pub games_played: f64,
    pub minutes: f64,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
}

impl CareerSeasonRow {
    pub fn from_row(row: &Row<'_>) -> Result<Self, AppError> {
        Ok(CareerSeasonRow {
            season_id: row.str("SEASON_ID")?,
            team_abbreviation: row.str("TEAM_ABBREVIATION")?,
            games_played: row.f64("GP")?,
            minutes: row.f64("MIN")?,
            points: row.f64("PTS")?,
            rebounds: row.f64("REB")?,
            assists: row.f64("AST")?,
            fg_pct: row.f64("FG_PCT")?,
            fg3_pct: row.f64("FG3_PCT")?,
            ft_pct: row.f64("FT_PCT")?,
        })
    }
}

/// One attempt from the shot-chart endpoint. Coordinates are tenth-feet
/// with the origin at the basket.
#[derive(Debug, Clone)]
pub struct ShotChartRow {
    pub loc_x: f64,
    pub loc_y: f64,
    pub shot_distance: f64,
    pub made: bool,
    pub shot_type: String,
    pub action_type: String,
}

impl ShotChartRow {
    pub fn from_row(row: &Row<'_>) -> Result<Self, AppError> {
        Ok(ShotChartRow {
            loc_x: row.f64("LOC_X")?,
            loc_y: row.f64("LOC_Y")?,
            shot_distance: row.f64("SHOT_DISTANCE")?,
            made: row.i64("SHOT_MADE_FLAG")? == 1,
            shot_type: row.str("SHOT_TYPE")?,
            action_type: row.str("ACTION_TYPE")?,
        })
    }

    pub fn collect(set: &ResultSet) -> Result<Vec<Self>, AppError> {
        set.rows().map(|row| Self::from_row(&row)).collect()
    }
}
