mod args;
mod errors;
mod labels;
mod output;
mod parsers;
mod pipeline;
mod records;
mod selection;

use std::{fs, path::PathBuf, time::Instant};

use anyhow::{bail, Context as _};
use args::{Cli, Commands, ConfigFile};
use clap::Parser;
use log::{debug, error, info};
use output::DatasetSink;
use selection::{dataset::FeatureMatrix, report, select_features, DEFAULT_FEATURES};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<ConfigFile> {
    let config = match config_path {
        Some(path) => confy::load_path::<ConfigFile>(&path)
            .with_context(|| format!("Error loading configuration file {}", path.display()))?,
        None => ConfigFile::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config_file)?;
    let start = Instant::now();

    match cli.command {
        Commands::Label {
            inputs,
            output_dir,
            skip_file,
        } => {
            if skip_file.is_some() {
                config.split.skip_file = skip_file;
            }
            fs::create_dir_all(&output_dir).with_context(|| {
                format!("Error creating output directory {}", output_dir.display())
            })?;

            let labels = config.label_table();
            debug!("Label table holds {} hosts", labels.len());
            let mut sink = DatasetSink::new(&output_dir);
            let summary = pipeline::run_batch(
                &inputs,
                config.window.size,
                &config.split,
                &labels,
                &mut sink,
            )
            .context("Error writing the labeled datasets")?;

            info!(
                "Processed {} files: {} training rows to {}, {} test rows to {}, {} misc rows",
                summary.processed,
                summary.rows.train_rows,
                sink.train.path().display(),
                summary.rows.test_rows,
                sink.test.path().display(),
                summary.rows.misc_rows
            );
            info!("Duration: {:.4} seconds", start.elapsed().as_secs_f64());

            if !summary.failed.is_empty() {
                bail!("{} input files failed: {:?}", summary.failed.len(), summary.failed);
            }
        }
        Commands::Select {
            path,
            top,
            features,
            export_path,
            report_path,
        } => {
            let names = features.unwrap_or_else(|| {
                DEFAULT_FEATURES.iter().map(|name| name.to_string()).collect()
            });
            let matrix = FeatureMatrix::load(&path, &names)
                .with_context(|| format!("Error loading dataset {}", path.display()))?;
            let (matrix, selection) = select_features(matrix, top, &config.selection)?;

            if let Some(export_path) = export_path {
                matrix.export(&export_path).with_context(|| {
                    format!("Error exporting dataset to {}", export_path.display())
                })?;
                info!("Filtered dataset written to {}", export_path.display());
            }

            report::print_report(&selection);

            if let Some(report_path) = report_path {
                report::write_report(&report_path, &selection).with_context(|| {
                    format!("Error writing report to {}", report_path.display())
                })?;
            }
            debug!("Duration: {:?} milliseconds", start.elapsed().as_millis());
        }
    }

    Ok(())
}
