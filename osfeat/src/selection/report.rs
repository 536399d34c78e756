use std::path::Path;

use csv::WriterBuilder;

use super::{rank_descending, SelectionReport};
use crate::errors::Result;

fn banner(title: &str) {
    println!("##############################");
    println!("#### {title} ####");
    println!("##############################");
}

fn print_table(heading: &str, rows: impl IntoIterator<Item = (String, String)>) {
    println!();
    println!("{:<20} {:<10}", "Feature", heading);
    for (name, value) in rows {
        println!("{:<20} {:<10}", name, value);
    }
}

/// Prints every ranking to stdout as two-column tables.
pub fn print_report(report: &SelectionReport) {
    println!("{:?}", report.features);
    if !report.dropped.is_empty() {
        println!("Dropped constant features: {:?}", report.dropped);
    }

    println!();
    banner("f_classif");
    print_table(
        "Score",
        rank_descending(&report.features, &report.anova)
            .into_iter()
            .map(|s| (s.name, format!("{:.3}", s.score))),
    );
    print_table(
        "Score",
        rank_descending(&report.features, &report.mutual_info)
            .into_iter()
            .map(|s| (s.name, format!("{:.3}", s.score))),
    );

    println!();
    banner("RFE");
    print_table(
        "Support",
        report
            .features
            .iter()
            .zip(&report.rfe.support)
            .map(|(name, support)| (name.clone(), support.to_string())),
    );
    let mut ranked: Vec<(&String, usize)> =
        report.features.iter().zip(report.rfe.ranking.iter().copied()).collect();
    ranked.sort_by_key(|(_, rank)| *rank);
    print_table(
        "Rank",
        ranked
            .into_iter()
            .map(|(name, rank)| (name.clone(), rank.to_string())),
    );

    println!();
    banner("ExtraTreesClassifier");
    print_table(
        "Importance",
        rank_descending(&report.features, &report.importances)
            .into_iter()
            .map(|s| (s.name, format!("{:.4}", s.score))),
    );
}

/// Persists all scores, one row per retained feature, plus whether the feature
/// is among the top `report.top` of each method.
pub fn write_report<P: AsRef<Path>>(path: P, report: &SelectionReport) -> Result<()> {
    let in_top = |scores: &[f64]| -> Vec<bool> {
        let ranked = rank_descending(&report.features, scores);
        report
            .features
            .iter()
            .map(|name| {
                ranked
                    .iter()
                    .take(report.top)
                    .any(|score| &score.name == name)
            })
            .collect()
    };
    let anova_top = in_top(&report.anova);
    let mi_top = in_top(&report.mutual_info);
    let trees_top = in_top(&report.importances);

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record([
        "feature",
        "anova_f",
        "anova_top",
        "mutual_info",
        "mutual_info_top",
        "rfe_rank",
        "rfe_selected",
        "extra_trees_importance",
        "extra_trees_top",
    ])?;
    for (i, name) in report.features.iter().enumerate() {
        writer.write_record([
            name.clone(),
            report.anova[i].to_string(),
            anova_top[i].to_string(),
            report.mutual_info[i].to_string(),
            mi_top[i].to_string(),
            report.rfe.ranking[i].to_string(),
            report.rfe.support[i].to_string(),
            report.importances[i].to_string(),
            trees_top[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
