//! The scoregrid: a joint probability table over `(home goals, away goals)`, with home goals
//! along the rows and away goals along the columns.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::linear::Matrix;
use crate::poisson;

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}
impl Score {
    pub fn new(home: u16, away: u16) -> Self {
        Self { home, away }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbableScore {
    pub score: Score,
    pub probability: f64,
}

/// Builds a `cutoff × cutoff` scoregrid from two independent Poisson-distributed goal counts.
pub fn from_univariate_poisson(home_rate: f64, away_rate: f64, cutoff: usize) -> Matrix {
    let home_probs = poisson::truncated(home_rate, cutoff);
    let away_probs = poisson::truncated(away_rate, cutoff);
    Matrix::outer(&home_probs, &away_probs)
}

/// Total probability mass retained in the grid. The shortfall from 1 is the tail lost to
/// truncation.
pub fn coverage(scoregrid: &Matrix) -> f64 {
    scoregrid.flatten().iter().sum()
}

/// Expected home and away goals recovered from the grid. These fall short of the Poisson rates
/// by whatever the truncated tail held.
pub fn home_away_expectations(scoregrid: &Matrix) -> (f64, f64) {
    let (mut home_expectation, mut away_expectation) = (0.0, 0.0);
    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            home_expectation += home_goals as f64 * prob;
            away_expectation += away_goals as f64 * prob;
        }
    }
    (home_expectation, away_expectation)
}

/// The `n` most probable scorelines, in descending order of probability. Equiprobable
/// scorelines are ordered by score.
pub fn most_likely(scoregrid: &Matrix, n: usize) -> Vec<ProbableScore> {
    let mut scores = Vec::with_capacity(scoregrid.rows() * scoregrid.cols());
    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            scores.push(ProbableScore {
                score: Score::new(home_goals as u16, away_goals as u16),
                probability: scoregrid[(home_goals, away_goals)],
            });
        }
    }
    scores.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.score.cmp(&b.score))
    });
    scores.truncate(n);
    scores
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
    GoalsUnder(u32),
    GoalsOver(u32),
}
impl Outcome {
    pub fn gather(&self, scoregrid: &Matrix) -> f64 {
        match self {
            Outcome::Win(side) => Self::gather_win(side, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::GoalsUnder(goals) => Self::gather_goals_under(*goals, scoregrid),
            Outcome::GoalsOver(goals) => Self::gather_goals_over(*goals, scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &Matrix) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.rows() {
                    for col in 0..usize::min(row, scoregrid.cols()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.cols() {
                    for row in 0..usize::min(col, scoregrid.rows()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &Matrix) -> f64 {
        let mut prob = 0.0;
        for index in 0..usize::min(scoregrid.rows(), scoregrid.cols()) {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    fn gather_goals_over(goals: u32, scoregrid: &Matrix) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col > goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_goals_under(goals: u32, scoregrid: &Matrix) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col < goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }
}
