//! Per-team scoring rates, aggregated over historical games.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::debug;

use crate::data::{GameRecord, TeamId};

/// Which of a team's four averages is being looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, EnumIter)]
pub enum Rate {
    #[strum(serialize = "home scored")]
    HomeScored,
    #[strum(serialize = "home conceded")]
    HomeConceded,
    #[strum(serialize = "away scored")]
    AwayScored,
    #[strum(serialize = "away conceded")]
    AwayConceded,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown team {team}: no games with a recorded {rate} average")]
pub struct UnknownTeam {
    pub team: TeamId,
    pub rate: Rate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Mean {
    sum: f64,
    count: usize,
}
impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn get(&self) -> Option<f64> {
        match self.count {
            0 => None,
            count => Some(self.sum / count as f64),
        }
    }
}

/// The four averages of a single team. A rate is `None` if the team has no game with a
/// recorded score in that role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateProfile {
    pub home_scored: Option<f64>,
    pub home_conceded: Option<f64>,
    pub away_scored: Option<f64>,
    pub away_conceded: Option<f64>,
}

impl Display for RateProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn fmt_rate(rate: Option<f64>) -> String {
            rate.map(|rate| format!("{rate:.3}")).unwrap_or_else(|| "-".into())
        }
        write!(
            f,
            "home {}:{}, away {}:{}",
            fmt_rate(self.home_scored),
            fmt_rate(self.home_conceded),
            fmt_rate(self.away_scored),
            fmt_rate(self.away_conceded)
        )
    }
}

/// Mean points scored and conceded by every team, at home and away. Built once from a
/// dataset; rebuild to reflect a changed dataset.
#[derive(Debug, Default)]
pub struct TeamRates {
    home_scored: FxHashMap<TeamId, Mean>,
    home_conceded: FxHashMap<TeamId, Mean>,
    away_scored: FxHashMap<TeamId, Mean>,
    away_conceded: FxHashMap<TeamId, Mean>,
}
impl TeamRates {
    pub fn aggregate(games: &[GameRecord]) -> Self {
        let mut rates = Self::default();
        for game in games {
            rates.home_scored.entry(game.home_team).or_default().add(game.home_points);
            rates.home_conceded.entry(game.home_team).or_default().add(game.away_points);
            rates.away_scored.entry(game.away_team).or_default().add(game.away_points);
            rates.away_conceded.entry(game.away_team).or_default().add(game.home_points);
        }
        debug!(
            "aggregated rates from {} games: {} home teams, {} away teams",
            games.len(),
            rates.home_scored.len(),
            rates.away_scored.len()
        );
        rates
    }

    pub fn get(&self, team: TeamId, rate: Rate) -> Result<f64, UnknownTeam> {
        let means = match rate {
            Rate::HomeScored => &self.home_scored,
            Rate::HomeConceded => &self.home_conceded,
            Rate::AwayScored => &self.away_scored,
            Rate::AwayConceded => &self.away_conceded,
        };
        means
            .get(&team)
            .and_then(Mean::get)
            .ok_or(UnknownTeam { team, rate })
    }

    pub fn home_scored(&self, team: TeamId) -> Result<f64, UnknownTeam> {
        self.get(team, Rate::HomeScored)
    }

    pub fn home_conceded(&self, team: TeamId) -> Result<f64, UnknownTeam> {
        self.get(team, Rate::HomeConceded)
    }

    pub fn away_scored(&self, team: TeamId) -> Result<f64, UnknownTeam> {
        self.get(team, Rate::AwayScored)
    }

    pub fn away_conceded(&self, team: TeamId) -> Result<f64, UnknownTeam> {
        self.get(team, Rate::AwayConceded)
    }

    pub fn profile(&self, team: TeamId) -> RateProfile {
        RateProfile {
            home_scored: self.home_scored(team).ok(),
            home_conceded: self.home_conceded(team).ok(),
            away_scored: self.away_scored(team).ok(),
            away_conceded: self.away_conceded(team).ok(),
        }
    }

    /// Every team that appears in the dataset, in ascending order.
    pub fn teams(&self) -> Vec<TeamId> {
        let mut teams: Vec<_> = self
            .home_scored
            .keys()
            .chain(self.away_scored.keys())
            .copied()
            .collect();
        teams.sort();
        teams.dedup();
        teams
    }
}
