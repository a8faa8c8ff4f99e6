//! Expected goals (the Poisson rates) for a home/away matchup.

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use thiserror::Error;
use tracing::debug;

use crate::data::TeamId;
use crate::rates::{Rate, TeamRates, UnknownTeam};

/// How the expected away goals are derived.
///
/// The home expectation is always `home_scored[home] × away_conceded[away] ÷ home_conceded[home]`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum LambdaFormula {
    /// `away_scored[away] × home_conceded[home] ÷ away_scored[home]`. The divisor is looked up
    /// against the home team, reproducing the historical model.
    #[default]
    Literal,

    /// `away_scored[away] × home_conceded[home] ÷ away_conceded[away]`, the mirror image of the
    /// home expectation.
    Corrected,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("team {0} cannot play itself")]
    SameTeam(TeamId),

    #[error("{0}")]
    UnknownTeam(#[from] UnknownTeam),

    #[error("team {team} has a zero {rate} average")]
    ZeroRate { team: TeamId, rate: Rate },

    #[error("invalid {side} expectation {value}")]
    InvalidExpectation { side: &'static str, value: f64 },
}

pub fn estimate(
    rates: &TeamRates,
    home: TeamId,
    away: TeamId,
    formula: LambdaFormula,
) -> Result<Expectation, EstimateError> {
    if home == away {
        return Err(EstimateError::SameTeam(home));
    }

    let home_lambda = rates.home_scored(home)? * rates.away_conceded(away)?
        / divisor(rates, home, Rate::HomeConceded)?;
    let away_lambda = rates.away_scored(away)? * rates.home_conceded(home)?
        / match formula {
            LambdaFormula::Literal => divisor(rates, home, Rate::AwayScored)?,
            LambdaFormula::Corrected => divisor(rates, away, Rate::AwayConceded)?,
        };

    let expectation = Expectation {
        home: validate("home", home_lambda)?,
        away: validate("away", away_lambda)?,
    };
    debug!("{formula} expectation for {home} v {away}: {expectation:?}");
    Ok(expectation)
}

fn divisor(rates: &TeamRates, team: TeamId, rate: Rate) -> Result<f64, EstimateError> {
    let value = rates.get(team, rate)?;
    if value == 0.0 {
        Err(EstimateError::ZeroRate { team, rate })
    } else {
        Ok(value)
    }
}

fn validate(side: &'static str, value: f64) -> Result<f64, EstimateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EstimateError::InvalidExpectation { side, value })
    }
}
