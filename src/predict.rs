//! Match outcome prediction: expected goals, scoregrid, head-to-head probabilities and a
//! predicted result.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::TeamId;
use crate::expectation::{estimate, EstimateError, Expectation, LambdaFormula};
use crate::linear::Matrix;
use crate::rates::TeamRates;
use crate::scoregrid;
use crate::scoregrid::{Outcome, Side};

pub const DEFAULT_MAX_GOALS: usize = 150;

/// The scoregrid holds `max_goals²` cells, so the cutoff is bounded.
pub const MAX_GOALS_LIMIT: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Goals in `0..max_goals` are modelled for each side; the rest of the tail is discarded.
    pub max_goals: usize,
    pub formula: LambdaFormula,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_goals: DEFAULT_MAX_GOALS,
            formula: LambdaFormula::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("max goals must be in 1..={}, got {0}", MAX_GOALS_LIMIT)]
    InvalidCutoff(usize),

    #[error("{0}")]
    Estimate(#[from] EstimateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    #[strum(serialize = "Home Win")]
    HomeWin,
    #[strum(serialize = "Away Win")]
    AwayWin,
    #[strum(serialize = "Draw")]
    Draw,
}
impl Prediction {
    /// A win is predicted only when its probability strictly exceeds both others; every tie
    /// resolves to a draw.
    pub fn from_probs(home_win_prob: f64, draw_prob: f64, away_win_prob: f64) -> Self {
        if home_win_prob > draw_prob && home_win_prob > away_win_prob {
            Prediction::HomeWin
        } else if away_win_prob > home_win_prob && away_win_prob > draw_prob {
            Prediction::AwayWin
        } else {
            Prediction::Draw
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub prediction: Prediction,
    pub home_win_prob: f64,
    pub draw_prob: f64,
    pub away_win_prob: f64,
    pub expectation: Expectation,
    /// Probability mass retained by the scoregrid.
    pub coverage: f64,
}
impl Verdict {
    pub fn gather(expectation: Expectation, scoregrid: &Matrix) -> Self {
        let home_win_prob = Outcome::Win(Side::Home).gather(scoregrid);
        let draw_prob = Outcome::Draw.gather(scoregrid);
        let away_win_prob = Outcome::Win(Side::Away).gather(scoregrid);
        Self {
            prediction: Prediction::from_probs(home_win_prob, draw_prob, away_win_prob),
            home_win_prob,
            draw_prob,
            away_win_prob,
            expectation,
            coverage: scoregrid::coverage(scoregrid),
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prediction: {}", self.prediction)?;
        writeln!(f, "Home Win Probability: {:.2}", self.home_win_prob)?;
        writeln!(f, "Draw Probability: {:.2}", self.draw_prob)?;
        write!(f, "Away Win Probability: {:.2}", self.away_win_prob)
    }
}

/// Probabilities of the combined score finishing over or under `line + 0.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalGoals {
    pub line: u32,
    pub over_prob: f64,
    pub under_prob: f64,
}
impl TotalGoals {
    pub fn gather(line: u32, scoregrid: &Matrix) -> Self {
        Self {
            line,
            over_prob: Outcome::GoalsOver(line).gather(scoregrid),
            under_prob: Outcome::GoalsUnder(line.saturating_add(1)).gather(scoregrid),
        }
    }
}

pub struct Predictor {
    rates: TeamRates,
    config: Config,
}
impl Predictor {
    pub fn new(rates: TeamRates, config: Config) -> Result<Self, PredictError> {
        if !(1..=MAX_GOALS_LIMIT).contains(&config.max_goals) {
            return Err(PredictError::InvalidCutoff(config.max_goals));
        }
        Ok(Self { rates, config })
    }

    pub fn rates(&self) -> &TeamRates {
        &self.rates
    }

    pub fn expectation(&self, home: TeamId, away: TeamId) -> Result<Expectation, PredictError> {
        Ok(estimate(&self.rates, home, away, self.config.formula)?)
    }

    pub fn scoregrid(&self, expectation: &Expectation) -> Matrix {
        scoregrid::from_univariate_poisson(expectation.home, expectation.away, self.config.max_goals)
    }

    pub fn predict(&self, home: TeamId, away: TeamId) -> Result<Verdict, PredictError> {
        let expectation = self.expectation(home, away)?;
        let scoregrid = self.scoregrid(&expectation);
        let verdict = Verdict::gather(expectation, &scoregrid);
        let (home_goals, away_goals) = scoregrid::home_away_expectations(&scoregrid);
        debug!("expectations recovered from scoregrid: ({home_goals:.6}, {away_goals:.6})");
        debug!("verdict for {home} v {away}: {verdict:?}");
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::CsvReader;
    use crate::data::{read_games, Columns};
    use crate::rates::{Rate, UnknownTeam};
    use crate::testing::assert_probability;
    use assert_float_eq::*;
    use std::io::Cursor;

    const TWO_TEAMS: &str = "\
GAME_DATE_EST,HOME_TEAM_ID,VISITOR_TEAM_ID,PTS_home,PTS_away
2022-12-01,1,2,4,1
2022-12-02,1,2,2,1
2022-12-03,2,1,3,2
2022-12-04,2,1,2,1
";

    fn two_team_predictor(config: Config) -> Predictor {
        let games = read_games(CsvReader::new(Cursor::new(TWO_TEAMS)), &Columns::default()).unwrap();
        Predictor::new(TeamRates::aggregate(&games), config).unwrap()
    }

    #[test]
    fn prediction_precedence() {
        assert_eq!(Prediction::HomeWin, Prediction::from_probs(0.5, 0.3, 0.2));
        assert_eq!(Prediction::AwayWin, Prediction::from_probs(0.2, 0.3, 0.5));
        assert_eq!(Prediction::Draw, Prediction::from_probs(0.3, 0.4, 0.3));
        assert_eq!(Prediction::Draw, Prediction::from_probs(0.4, 0.2, 0.4));
        assert_eq!(Prediction::Draw, Prediction::from_probs(0.4, 0.4, 0.2));
        assert_eq!(Prediction::Draw, Prediction::from_probs(0.2, 0.4, 0.4));
        assert_eq!(Prediction::Draw, Prediction::from_probs(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0));
    }

    #[test]
    fn prediction_labels() {
        assert_eq!("Home Win", Prediction::HomeWin.to_string());
        assert_eq!("Away Win", Prediction::AwayWin.to_string());
        assert_eq!("Draw", Prediction::Draw.to_string());
    }

    #[test]
    fn equal_win_probs_predict_draw() {
        let expectation = Expectation { home: 5.0, away: 5.0 };
        let scoregrid = scoregrid::from_univariate_poisson(expectation.home, expectation.away, 150);
        let verdict = Verdict::gather(expectation, &scoregrid);
        assert_eq!(verdict.home_win_prob, verdict.away_win_prob);
        assert!(verdict.home_win_prob > verdict.draw_prob);
        assert_eq!(Prediction::Draw, verdict.prediction);
        assert_float_absolute_eq!(0.4360833314182849, verdict.home_win_prob, 1e-9);
        assert_float_absolute_eq!(0.1278333371634284, verdict.draw_prob, 1e-9);
    }

    #[test]
    fn predict_literal() {
        let predictor = two_team_predictor(Config::default());
        let verdict = predictor.predict(TeamId(1), TeamId(2)).unwrap();
        assert_eq!(9.0, verdict.expectation.home);
        assert_float_relative_eq!(1.0 / 1.5, verdict.expectation.away, 1e-15);
        assert_eq!(Prediction::HomeWin, verdict.prediction);
        assert_float_absolute_eq!(0.9979524460028135, verdict.home_win_prob, 1e-9);
        assert_float_absolute_eq!(0.0015771832449571338, verdict.draw_prob, 1e-9);
        assert_float_absolute_eq!(0.0004703707522298764, verdict.away_win_prob, 1e-9);
        assert_float_absolute_eq!(1.0, verdict.coverage, 1e-9);
    }

    #[test]
    fn predict_corrected() {
        let predictor = two_team_predictor(Config {
            formula: LambdaFormula::Corrected,
            ..Config::default()
        });
        let verdict = predictor.predict(TeamId(1), TeamId(2)).unwrap();
        assert_float_relative_eq!(1.0 / 3.0, verdict.expectation.away, 1e-15);
        assert_float_absolute_eq!(0.9992514378474474, verdict.home_win_prob, 1e-9);
        assert_float_absolute_eq!(0.0006330485055761442, verdict.draw_prob, 1e-9);
        assert_float_absolute_eq!(0.00011551364697750367, verdict.away_win_prob, 1e-9);
    }

    #[test]
    fn predict_swapped() {
        let predictor = two_team_predictor(Config::default());
        let verdict = predictor.predict(TeamId(2), TeamId(1)).unwrap();
        assert_float_relative_eq!(2.5 * 2.5 / 1.5, verdict.expectation.home, 1e-15);
        assert_float_relative_eq!(2.25, verdict.expectation.away, 1e-15);
        assert_eq!(Prediction::HomeWin, verdict.prediction);
        assert_float_absolute_eq!(0.7117049108990553, verdict.home_win_prob, 1e-9);
        assert_float_absolute_eq!(0.12301078223799668, verdict.draw_prob, 1e-9);
        assert_float_absolute_eq!(0.1652843068629478, verdict.away_win_prob, 1e-9);
    }

    #[test]
    fn predict_with_small_cutoff() {
        let predictor = two_team_predictor(Config {
            max_goals: 4,
            ..Config::default()
        });
        let verdict = predictor.predict(TeamId(1), TeamId(2)).unwrap();
        for prob in [verdict.home_win_prob, verdict.draw_prob, verdict.away_win_prob] {
            assert_probability(prob);
        }
        assert!(verdict.coverage < 0.1);
        assert_float_absolute_eq!(
            verdict.coverage,
            verdict.home_win_prob + verdict.draw_prob + verdict.away_win_prob,
            1e-12
        );
    }

    #[test]
    fn predict_unknown_team() {
        let predictor = two_team_predictor(Config::default());
        assert_eq!(
            Err(PredictError::Estimate(EstimateError::UnknownTeam(UnknownTeam {
                team: TeamId(3),
                rate: Rate::AwayConceded
            }))),
            predictor.predict(TeamId(1), TeamId(3))
        );
    }

    #[test]
    fn invalid_cutoff() {
        for max_goals in [0, MAX_GOALS_LIMIT + 1] {
            let result = Predictor::new(TeamRates::default(), Config { max_goals, ..Config::default() });
            assert!(matches!(result, Err(PredictError::InvalidCutoff(goals)) if goals == max_goals));
        }
    }

    #[test]
    fn verdict_lines() {
        let verdict = Verdict {
            prediction: Prediction::HomeWin,
            home_win_prob: 0.994,
            draw_prob: 0.005,
            away_win_prob: 0.001,
            expectation: Expectation { home: 9.0, away: 0.5 },
            coverage: 1.0,
        };
        assert_eq!(
            "Prediction: Home Win\n\
             Home Win Probability: 0.99\n\
             Draw Probability: 0.01\n\
             Away Win Probability: 0.00",
            verdict.to_string()
        );
    }

    #[test]
    fn verdict_lines_for_draw() {
        let expectation = Expectation { home: 5.0, away: 5.0 };
        let scoregrid = scoregrid::from_univariate_poisson(expectation.home, expectation.away, 150);
        let verdict = Verdict::gather(expectation, &scoregrid);
        let lines: Vec<_> = verdict.to_string().lines().map(ToString::to_string).collect();
        assert_eq!(
            vec![
                "Prediction: Draw",
                "Home Win Probability: 0.44",
                "Draw Probability: 0.13",
                "Away Win Probability: 0.44"
            ],
            lines
        );
    }

    #[test]
    fn total_goals() {
        let scoregrid = scoregrid::from_univariate_poisson(2.0, 1.0, 150);
        let totals = TotalGoals::gather(2, &scoregrid);
        assert_eq!(2, totals.line);
        assert_float_absolute_eq!(0.5768099188731554, totals.over_prob, 1e-9);
        assert_float_absolute_eq!(0.4231900811268436, totals.under_prob, 1e-9);
        assert_float_absolute_eq!(1.0, totals.over_prob + totals.under_prob, 1e-9);

        let totals = TotalGoals::gather(0, &scoregrid);
        assert_float_absolute_eq!((-3.0f64).exp(), totals.under_prob, 1e-12);
    }

    #[test]
    fn verdict_to_json() {
        let verdict = Verdict {
            prediction: Prediction::AwayWin,
            home_win_prob: 0.25,
            draw_prob: 0.25,
            away_win_prob: 0.5,
            expectation: Expectation { home: 1.0, away: 2.0 },
            coverage: 1.0,
        };
        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(
            r#"{"prediction":"away_win","home_win_prob":0.25,"draw_prob":0.25,"away_win_prob":0.5,"expectation":{"home":1.0,"away":2.0},"coverage":1.0}"#,
            json
        );
    }
}
