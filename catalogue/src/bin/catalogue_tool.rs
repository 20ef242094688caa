//! Batch tool for catalogue files.
//!
//! Subcommands:
//! - `report`: print the property report of a catalogue or one object
//! - `list`: list object names and kinds in file order
//! - `select`: list objects matching a kind, subtypes included
//! - `sort`: sort a catalogue and write it out
//! - `convert`: re-export a catalogue into another directory
//! - `config`: print or write the settings file
//!
//! Every subcommand that reads a catalogue takes the object file (`N.dat`);
//! the relationship file is found next to it.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use catalogue::codec::{export_to_dir, import_from_path};
use catalogue::{Catalogue, CatalogueConfig, ConflictPolicy, ObjectKind, SortKey};
use clap::{Parser, Subcommand};
use log::{info, warn};
use strum::IntoEnumIterator;

/// Celestial catalogue batch tool
#[derive(Parser, Debug)]
#[command(name = "catalogue_tool")]
#[command(about = "Inspect, query, sort and convert celestial catalogue files")]
#[command(version)]
struct Args {
    /// Settings file (defaults to ~/.catalogue/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Abort if any line of the input is skipped
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the property report
    Report {
        /// Catalogue object file
        file: PathBuf,

        /// Only report this object
        #[arg(short, long)]
        object: Option<String>,
    },

    /// List objects in file order
    List {
        /// Catalogue object file
        file: PathBuf,
    },

    /// List objects of a kind, subtypes included
    Select {
        /// Catalogue object file
        file: PathBuf,

        /// Kind token, e.g. Star, Planet or Unassigned for everything
        #[arg(short, long)]
        kind: ObjectKind,
    },

    /// Sort a catalogue and write the result
    Sort {
        /// Catalogue object file
        file: PathBuf,

        /// Sort key (name, distance, mass, redshift, rotational-velocity, member-count)
        #[arg(short, long, default_value = "name")]
        by: SortKey,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Conflict policy override (fail, overwrite, timestamp)
        #[arg(long)]
        on_conflict: Option<ConflictPolicy>,
    },

    /// Re-export a catalogue into a directory
    Convert {
        /// Catalogue object file
        file: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Conflict policy override (fail, overwrite, timestamp)
        #[arg(long)]
        on_conflict: Option<ConflictPolicy>,
    },

    /// Print the effective settings, optionally saving them
    Config {
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn config_path(args: &Args) -> Result<PathBuf> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => CatalogueConfig::default_path().context("Failed to locate settings file"),
    }
}

fn load(file: &Path, config: &CatalogueConfig, strict: bool) -> Result<Catalogue> {
    let (catalogue, report) = import_from_path(file, config)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    if !report.is_clean() {
        for issue in &report.issues {
            warn!("{} line {}: {}", issue.source, issue.line, issue.error);
        }
        if strict {
            bail!(
                "{} line(s) of {} could not be imported",
                report.issues.len(),
                file.display()
            );
        }
    }
    Ok(catalogue)
}

fn write_out(
    catalogue: &Catalogue,
    dir: &Path,
    config: &CatalogueConfig,
    on_conflict: Option<ConflictPolicy>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(policy) = on_conflict {
        config.on_conflict = policy;
    }
    let files = export_to_dir(catalogue, dir, &config)
        .with_context(|| format!("Failed to export into {}", dir.display()))?;
    println!("Wrote {}", files.objects.display());
    println!("Wrote {}", files.relationships.display());
    Ok(())
}

fn cmd_report(catalogue: &Catalogue, object: Option<&str>) -> Result<()> {
    match object {
        Some(name) => println!("{}", catalogue.object_report(name)?),
        None => print!("{}", catalogue.report()),
    }
    Ok(())
}

fn cmd_list(catalogue: &Catalogue) {
    println!("{} ({} objects)", catalogue.name(), catalogue.len());
    for (i, object) in catalogue.objects().enumerate() {
        println!("{i:>4}  {:<24} {}", object.name(), object.kind());
    }
}

fn cmd_select(catalogue: &Catalogue, kind: ObjectKind) {
    let selection = catalogue.subselect(kind);
    println!("{} object(s) matching {kind}", selection.len());
    for object in selection {
        println!("  {:<24} {}", object.name(), object.kind());
    }
}

fn cmd_config(path: &Path, config: &CatalogueConfig, save: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if save {
        config.save_to_file(path)?;
        info!("Saved settings to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let path = config_path(&args)?;
    let config = CatalogueConfig::load_or_default(&path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    match &args.command {
        Command::Report { file, object } => {
            let catalogue = load(file, &config, args.strict)?;
            cmd_report(&catalogue, object.as_deref())
        }
        Command::List { file } => {
            cmd_list(&load(file, &config, args.strict)?);
            Ok(())
        }
        Command::Select { file, kind } => {
            cmd_select(&load(file, &config, args.strict)?, *kind);
            Ok(())
        }
        Command::Sort {
            file,
            by,
            out,
            on_conflict,
        } => {
            let mut catalogue = load(file, &config, args.strict)?;
            if let Err(e) = catalogue.sort(*by) {
                let supported: Vec<String> = SortKey::iter()
                    .filter(|key| key.comparator().is_ok())
                    .map(|key| key.to_string())
                    .collect();
                bail!("{e} (supported keys: {})", supported.join(", "));
            }
            let dir = match out {
                Some(dir) => dir.clone(),
                None => file
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default(),
            };
            write_out(&catalogue, &dir, &config, *on_conflict)
        }
        Command::Convert {
            file,
            out,
            on_conflict,
        } => {
            let catalogue = load(file, &config, args.strict)?;
            write_out(&catalogue, out, &config, *on_conflict)
        }
        Command::Config { save } => cmd_config(&path, &config, *save),
    }
}
