//! Implementations behind the `ratebook` subcommands.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::backend::{load_backend, load_backend_file, BackendConfig, BackendQuery, LoadedBackend};
use crate::compose::compose_output;
use crate::dayrate::build_day_rates_from_file;
use crate::xlsx::write_workbook;

/// Inspect a backend workbook: detected items, groups, units, prefixes.
pub fn run_inspect(file: &Path, json: bool) -> Result<()> {
    let backend = load_backend_file(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inspect_payload(&backend))?);
        return Ok(());
    }

    println!("{} {}", "Backend:".bold(), file.display());
    println!();
    println!("{} ({})", "Items".bold(), backend.items.len());
    for block in &backend.items {
        println!(
            "  rows {:>5}-{:<5} {}",
            block.start_row, block.end_row, block.name
        );
    }
    println!();
    println!("{} ({})", "Groups".bold(), backend.groups.len());
    for (group, items) in backend.groups.iter() {
        println!("  {} ({} items)", group, items.len());
    }
    println!();
    println!(
        "{} units, {} prefixes",
        backend.units.len(),
        backend.prefixes.len()
    );
    Ok(())
}

fn inspect_payload(backend: &LoadedBackend) -> serde_json::Value {
    let items: Vec<serde_json::Value> = backend
        .items
        .iter()
        .map(|b| {
            serde_json::json!({
                "name": b.name,
                "start_row": b.start_row,
                "end_row": b.end_row,
            })
        })
        .collect();
    let groups: serde_json::Value = backend
        .groups
        .iter()
        .map(|(group, members)| (group.to_string(), serde_json::json!(members)))
        .collect::<serde_json::Map<_, _>>()
        .into();
    serde_json::json!({
        "path": backend.path,
        "items": items,
        "groups": groups,
        "units": backend.units.iter().collect::<BTreeMap<_, _>>(),
        "prefixes": backend.prefixes.iter().collect::<BTreeMap<_, _>>(),
    })
}

/// Everything `generate` needs, collected by the argument parser.
pub struct GenerateOptions {
    /// Explicit backend workbook; bypasses the resolution chain.
    pub backend_file: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub category: Option<String>,
    pub module: Option<String>,
    pub backend_id: Option<u32>,
    pub user: Option<String>,
    pub items: Vec<String>,
    pub items_file: Option<PathBuf>,
    pub output: PathBuf,
}

/// Compose an output workbook from selected items and write it.
pub fn run_generate(options: GenerateOptions) -> Result<()> {
    let backend = match &options.backend_file {
        Some(path) => load_backend_file(path)?,
        None => {
            let base_dir = options
                .base_dir
                .clone()
                .context("either --backend or --base-dir is required")?;
            let category = options
                .category
                .clone()
                .context("--category is required when resolving from --base-dir")?;
            let mut config = BackendConfig::new(base_dir);
            if let Some(dir) = &options.static_dir {
                config = config.with_static_dir(dir);
            }
            let query = BackendQuery {
                category,
                module_code: options.module.clone(),
                backend_id: options.backend_id,
                user: options.user.clone(),
            };
            load_backend(&config, &query)?
        }
    };

    let mut items = options.items.clone();
    if let Some(file) = &options.items_file {
        let content = fs::read_to_string(file)
            .with_context(|| format!("reading items file {}", file.display()))?;
        items.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }
    if items.is_empty() {
        bail!("no items selected; pass --items or --items-file");
    }

    let document = compose_output(&backend, &items);
    let found = items.len() - document.missing.len();
    if found == 0 {
        bail!(
            "none of the {} selected items exist in {}",
            items.len(),
            backend.path.display()
        );
    }

    write_workbook(&[document.sheet], &options.output)?;

    println!(
        "{} {} ({} items, {} cells)",
        "Wrote".green().bold(),
        options.output.display(),
        found,
        document.cells_copied
    );
    for name in &document.missing {
        println!("{} not in backend: {}", "skipped".yellow(), name);
    }
    for warning in &document.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }
    Ok(())
}

/// Print the day-rate table of a temporary-works backend.
pub fn run_day_rates(file: &Path, json: bool) -> Result<()> {
    let backend = load_backend_file(file)?;
    let table = build_day_rates_from_file(&backend.path, &backend.master, &backend.items)?;

    // deterministic output order
    let ordered: BTreeMap<&String, &BTreeMap<u32, f64>> = table.iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&ordered)?);
        return Ok(());
    }

    for (item, rates) in ordered {
        if rates.is_empty() {
            println!("{} {}", item.bold(), "(no usable rates)".dimmed());
            continue;
        }
        println!("{}", item.bold());
        for (day, rate) in rates {
            println!("  day {:>4}: {:.2}", day, rate);
        }
    }
    Ok(())
}
