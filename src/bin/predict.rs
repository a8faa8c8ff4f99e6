use std::env;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use scoreline::data;
use scoreline::data::{Columns, TeamId};
use scoreline::expectation::LambdaFormula;
use scoreline::predict::{Config, Predictor, TotalGoals, DEFAULT_MAX_GOALS, MAX_GOALS_LIMIT};
use scoreline::print;
use scoreline::rates::TeamRates;
use scoreline::scoregrid;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// dataset of historical games
    #[clap(default_value = "games.csv")]
    file: PathBuf,

    /// home team ID
    #[clap(long, default_value_t = TeamId(1610612758))]
    home: TeamId,

    /// away team ID
    #[clap(long, default_value_t = TeamId(1610612756))]
    away: TeamId,

    /// goals in 0..N are modelled for each side, with N in 1..=1000
    #[clap(short = 'g', long, default_value_t = DEFAULT_MAX_GOALS)]
    max_goals: usize,

    /// expected away goals formula (literal, corrected)
    #[clap(short = 'f', long, default_value_t = LambdaFormula::Literal)]
    formula: LambdaFormula,

    /// column holding the home team ID
    #[clap(long, default_value = "HOME_TEAM_ID")]
    home_team_col: String,

    /// column holding the away team ID
    #[clap(long, default_value = "VISITOR_TEAM_ID")]
    away_team_col: String,

    /// column holding the home team's points
    #[clap(long, default_value = "PTS_home")]
    home_points_col: String,

    /// column holding the away team's points
    #[clap(long, default_value = "PTS_away")]
    away_points_col: String,

    /// print the N most likely scorelines
    #[clap(short = 's', long, default_value_t = 0)]
    scores: usize,

    /// print over/under probabilities for each comma-separated goal line N (split at N.5)
    #[clap(short = 'o', long, value_delimiter = ',')]
    over_under: Vec<u32>,

    /// print the rate profiles of both teams
    #[clap(short = 'r', long)]
    rates: bool,

    /// print the verdict as JSON
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.home == self.away {
            bail!("home and away teams must differ");
        }
        if !(1..=MAX_GOALS_LIMIT).contains(&self.max_goals) {
            bail!("max goals must be in 1..={MAX_GOALS_LIMIT}");
        }
        Ok(())
    }

    fn columns(&self) -> Columns {
        Columns {
            home_team: self.home_team_col.clone(),
            away_team: self.away_team_col.clone(),
            home_points: self.home_points_col.clone(),
            away_points: self.away_points_col.clone(),
        }
    }

    fn config(&self) -> Config {
        Config {
            max_goals: self.max_goals,
            formula: self.formula,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let start_time = Instant::now();
    let games = data::read_from_file(&args.file, &args.columns())?;
    let rates = TeamRates::aggregate(&games);
    info!(
        "loaded {} games across {} teams from {} in {:?}",
        games.len(),
        rates.teams().len(),
        args.file.display(),
        start_time.elapsed()
    );

    debug!("home rates: {}", rates.profile(args.home));
    debug!("away rates: {}", rates.profile(args.away));

    let predictor = Predictor::new(rates, args.config())?;
    let start_time = Instant::now();
    let verdict = predictor.predict(args.home, args.away)?;
    info!(
        "{} v {}: λ = ({:.3}, {:.3}), coverage {:.9}, computed in {:?}",
        args.home,
        args.away,
        verdict.expectation.home,
        verdict.expectation.away,
        verdict.coverage,
        start_time.elapsed()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        println!("{verdict}");
    }

    if args.rates {
        let profiles = [
            ("home", predictor.rates().profile(args.home)),
            ("away", predictor.rates().profile(args.away)),
        ];
        let table = print::tabulate_profiles(&profiles);
        println!("Rates:\n{}", Console::default().render(&table));
    }

    if args.scores > 0 || !args.over_under.is_empty() {
        let scoregrid = predictor.scoregrid(&verdict.expectation);
        if args.scores > 0 {
            let scores = scoregrid::most_likely(&scoregrid, args.scores);
            let table = print::tabulate_scores(&scores);
            println!("Most likely scores:\n{}", Console::default().render(&table));
        }
        if !args.over_under.is_empty() {
            let totals: Vec<_> = args
                .over_under
                .iter()
                .map(|&line| TotalGoals::gather(line, &scoregrid))
                .collect();
            let table = print::tabulate_totals(&totals);
            println!("Total goals:\n{}", Console::default().render(&table));
        }
    }

    Ok(())
}
