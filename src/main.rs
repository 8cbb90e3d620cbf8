use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use serde::Serialize;

use footform::persist;
use footform::pipeline::{self, FeaturedRecord};
use footform::standings::StandingsRegistry;

const DEFAULT_OUTPUT: &str = "processed_football_data.csv";

#[derive(Debug)]
struct Options {
    data_dir: PathBuf,
    output: PathBuf,
    json_summary: bool,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    standings_league_seasons: usize,
    tables_found: usize,
    tables_processed: usize,
    rows_written: usize,
    errors: Vec<String>,
}

fn main() -> Result<()> {
    let opts = parse_args()?;

    let registry = StandingsRegistry::load_dir(&opts.data_dir)?;
    println!("Loaded standings for {} league-seasons", registry.len());

    let tables = find_match_tables(&opts.data_dir, &opts.output)?;
    println!("Found {} match tables", tables.len());

    // Tables are independent once the registry is built; the registry itself
    // is read-only from here on.
    let results: Vec<(PathBuf, Result<Vec<FeaturedRecord>>)> = tables
        .par_iter()
        .map(|path| {
            let outcome = persist::read_match_table(path)
                .and_then(|rows| pipeline::process_table(&registry, rows));
            (path.clone(), outcome)
        })
        .collect();

    let mut summary = RunSummary {
        standings_league_seasons: registry.len(),
        tables_found: tables.len(),
        ..RunSummary::default()
    };
    let mut featured = Vec::new();
    for (path, outcome) in results {
        match outcome {
            Ok(rows) => {
                println!("{}: {} rows", path.display(), rows.len());
                summary.tables_processed += 1;
                featured.extend(rows);
            }
            Err(err) => {
                println!("{}: skipped ({err:#})", path.display());
                summary.errors.push(format!("{}: {err:#}", path.display()));
            }
        }
    }

    if featured.is_empty() {
        println!("No data processed");
    } else {
        persist::write_featured_csv(&opts.output, &featured)?;
        summary.rows_written = featured.len();
        println!(
            "Processing complete: {} rows written to {}",
            featured.len(),
            opts.output.display()
        );
    }

    if opts.json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    if summary.tables_processed == 0 && !summary.errors.is_empty() {
        return Err(anyhow!("every match table failed"));
    }
    Ok(())
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        data_dir: PathBuf::from("."),
        output: PathBuf::from(DEFAULT_OUTPUT),
        json_summary: false,
    };
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--data-dir" => {
                idx += 1;
                let dir = args.get(idx).context("--data-dir needs a path")?;
                opts.data_dir = PathBuf::from(dir);
            }
            "--out" => {
                idx += 1;
                let out = args.get(idx).context("--out needs a path")?;
                opts.output = PathBuf::from(out);
            }
            "--json" => opts.json_summary = true,
            "-h" | "--help" => {
                println!(
                    "usage: footform [--data-dir DIR] [--out FILE] [--json]\n\
                     \n\
                     Reads standings .txt files and match-table .csv files from\n\
                     DIR (default .), derives rolling features for every record,\n\
                     and writes the combined table to FILE (default {DEFAULT_OUTPUT})."
                );
                std::process::exit(0);
            }
            other => return Err(anyhow!("unknown argument: {other}")),
        }
        idx += 1;
    }
    Ok(opts)
}

fn find_match_tables(dir: &Path, output: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read data dir {}", dir.display()))?;
    let mut tables: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        // A previous run's output may still sit in the data dir.
        .filter(|p| p.file_name() != output.file_name())
        .collect();
    tables.sort();
    Ok(tables)
}
