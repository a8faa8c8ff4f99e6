//! Match outcome probabilities from historical scoring data.
//!
//! Per-team home and away scoring rates are aggregated from past games, combined into the
//! expected goals of a matchup, and expanded into an independent Poisson scoregrid. The grid
//! is then summed into home win, draw and away win probabilities.

pub mod csv;
pub mod data;
pub mod expectation;
pub mod factorial;
pub mod linear;
pub mod poisson;
pub mod predict;
pub mod print;
pub mod rates;
pub mod scoregrid;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
