//! Loading of historical game records.

use std::fmt::{Display, Formatter};
use std::io;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::csv::{CsvReader, Header};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u64);

impl Display for TeamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TeamId)
    }
}

/// One historical game. Points are `None` where the source cell was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_points: Option<f64>,
    pub away_points: Option<f64>,
}

/// Names of the columns holding each field of a [GameRecord].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Columns {
    pub home_team: String,
    pub away_team: String,
    pub home_points: String,
    pub away_points: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            home_team: "HOME_TEAM_ID".into(),
            away_team: "VISITOR_TEAM_ID".into(),
            home_points: "PTS_home".into(),
            away_points: "PTS_away".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("dataset has no header row")]
    MissingHeader,

    #[error("dataset has no column named '{0}'")]
    MissingColumn(String),

    #[error("line {line}: expected {expected} fields, saw {actual}")]
    FieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },
}

struct Ordinals {
    home_team: usize,
    away_team: usize,
    home_points: usize,
    away_points: usize,
}
impl Ordinals {
    fn locate(header: &Header, columns: &Columns) -> Result<Self, DataError> {
        let locate = |name: &String| {
            header
                .position(name)
                .ok_or_else(|| DataError::MissingColumn(name.clone()))
        };
        Ok(Self {
            home_team: locate(&columns.home_team)?,
            away_team: locate(&columns.away_team)?,
            home_points: locate(&columns.home_points)?,
            away_points: locate(&columns.away_points)?,
        })
    }
}

pub fn read_from_file(path: impl AsRef<Path>, columns: &Columns) -> Result<Vec<GameRecord>, DataError> {
    let path = path.as_ref();
    debug!("reading games from {}", path.display());
    read_games(CsvReader::open(path)?, columns)
}

/// Reads every game from a CSV source whose first record is the header. Columns other than
/// those named in `columns` are ignored. A row whose team cell is empty is skipped. Every row
/// must have as many fields as the header.
pub fn read_games<R: BufRead>(mut csv: CsvReader<R>, columns: &Columns) -> Result<Vec<GameRecord>, DataError> {
    let header = Header::from(csv.read().ok_or(DataError::MissingHeader)??);
    let ordinals = Ordinals::locate(&header, columns)?;

    let mut games = vec![];
    let mut skipped = 0;
    while let Some(record) = csv.read() {
        let record = record?;
        let line = csv.line();
        if record.len() != header.len() {
            return Err(DataError::FieldCount {
                line,
                expected: header.len(),
                actual: record.len(),
            });
        }
        let field = |ordinal: usize| record[ordinal].as_str();

        let (home_team, away_team) = (field(ordinals.home_team), field(ordinals.away_team));
        if home_team.is_empty() || away_team.is_empty() {
            skipped += 1;
            continue;
        }
        games.push(GameRecord {
            home_team: parse_team(home_team, line, &columns.home_team)?,
            away_team: parse_team(away_team, line, &columns.away_team)?,
            home_points: parse_points(field(ordinals.home_points), line, &columns.home_points)?,
            away_points: parse_points(field(ordinals.away_points), line, &columns.away_points)?,
        });
    }
    debug!("read {} games, skipped {skipped} without teams", games.len());
    Ok(games)
}

fn invalid_value(value: &str, line: usize, column: &str) -> DataError {
    DataError::InvalidValue {
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_team(value: &str, line: usize, column: &str) -> Result<TeamId, DataError> {
    value.parse().map_err(|_| invalid_value(value, line, column))
}

fn parse_points(value: &str, line: usize, column: &str) -> Result<Option<f64>, DataError> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(points) if points.is_finite() && points >= 0.0 => Ok(Some(points)),
        _ => Err(invalid_value(value, line, column)),
    }
}
