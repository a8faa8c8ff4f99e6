use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::predict::TotalGoals;
use crate::rates::RateProfile;
use crate::scoregrid::ProbableScore;

/// The reciprocal of a probability, or `-` where the outcome cannot happen.
fn format_price(probability: f64) -> String {
    if probability > 0.0 {
        format!("{:.3}", 1.0 / probability)
    } else {
        "-".into()
    }
}

pub fn tabulate_scores(scores: &[ProbableScore]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Rank".into(),
                "Score".into(),
                "Probability".into(),
                "Fair price".into(),
            ],
        ));

    for (index, probable) in scores.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                format!("{}-{}", probable.score.home, probable.score.away).into(),
                format!("{:.6}", probable.probability).into(),
                format_price(probable.probability).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_totals(totals: &[TotalGoals]) -> Table {
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right))];
            for _ in 0..4 {
                cols.push(Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)));
            }
            cols
        })
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Line".into(),
                "Over".into(),
                "Over price".into(),
                "Under".into(),
                "Under price".into(),
            ],
        ));

    for total in totals {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}.5", total.line).into(),
                format!("{:.6}", total.over_prob).into(),
                format_price(total.over_prob).into(),
                format!("{:.6}", total.under_prob).into(),
                format_price(total.under_prob).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_profiles(profiles: &[(&str, RateProfile)]) -> Table {
    fn format_rate(rate: Option<f64>) -> String {
        rate.map(|rate| format!("{rate:.3}")).unwrap_or_else(|| "-".into())
    }

    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Left))];
            for _ in 0..4 {
                cols.push(Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)));
            }
            cols
        })
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Side".into(),
                "Home for".into(),
                "Home against".into(),
                "Away for".into(),
                "Away against".into(),
            ],
        ));

    for (side, profile) in profiles {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                side.to_string().into(),
                format_rate(profile.home_scored).into(),
                format_rate(profile.home_conceded).into(),
                format_rate(profile.away_scored).into(),
                format_rate(profile.away_conceded).into(),
            ],
        ));
    }
    table
}
