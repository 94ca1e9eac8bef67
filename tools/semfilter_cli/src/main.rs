use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use semfilter::targets::{by_tab, selection_summary};
use semfilter::{parser, resolve_tile_targets, validate, FilterDocument, SelectionState, TileResolution};

#[derive(Parser)]
#[command(name = "semfilter")]
#[command(about = "Inspect filter trees and dashboard filters in a semfilter document")]
#[command(version)]
struct Args {
    /// Log mutations and stale tile targets
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the document's filter tree and report every violation
    Validate {
        /// YAML or JSON document
        file: PathBuf,
    },
    /// List the fields a new rule may target in a group
    Fields {
        /// YAML or JSON document
        file: PathBuf,

        /// Index path of the group, e.g. "1,0" (empty for the root)
        #[arg(long, default_value = "")]
        group: String,
    },
    /// Show how each dashboard filter applies to each tile
    Targets {
        /// YAML or JSON document
        file: PathBuf,

        /// Only resolve the dashboard filter with this id
        #[arg(long)]
        filter: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rewrite the document in its canonical JSON form
    Normalize {
        /// YAML or JSON document
        file: PathBuf,

        /// Write here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber")?;

    match args.command {
        Commands::Validate { file } => handle_validate(file),
        Commands::Fields { file, group } => handle_fields(file, &group),
        Commands::Targets { file, filter, json } => handle_targets(file, filter, json),
        Commands::Normalize { file, output } => handle_normalize(file, output),
    }
}

fn load(file: &Path) -> anyhow::Result<FilterDocument> {
    info!("Loading {}", file.display());
    parser::parse_file(file).with_context(|| format!("loading {}", file.display()))
}

fn handle_validate(file: PathBuf) -> anyhow::Result<()> {
    let doc = load(&file)?;
    let Some(root) = &doc.filters else {
        println!("No filter tree");
        return Ok(());
    };

    let violations = validate(root, &doc.fields, &doc.editor);
    if violations.is_empty() {
        println!("✓ {} rules, depth {}", root.all_rules().len(), root.depth());
        return Ok(());
    }
    for violation in &violations {
        println!("✗ {}", violation);
    }
    bail!("{} violation(s) in {}", violations.len(), file.display())
}

fn handle_fields(file: PathBuf, group: &str) -> anyhow::Result<()> {
    let doc = load(&file)?;
    let path = parse_path(group)?;
    let fields = doc
        .tree()
        .available_fields_at(&path, &doc.fields)
        .ok_or_else(|| anyhow!("no group at path [{}]", group))?;

    for field in &fields {
        println!(
            "{:<32} {:<8} {:<18} {}",
            field.id,
            field.filter_type.to_string(),
            field.field_class.label(),
            field.display_label()
        );
    }
    Ok(())
}

fn handle_targets(file: PathBuf, filter: Option<String>, json: bool) -> anyhow::Result<()> {
    let doc = load(&file)?;
    let dashboard = doc
        .dashboard
        .as_ref()
        .ok_or_else(|| anyhow!("{} has no dashboard section", file.display()))?;

    let filters: Vec<_> = dashboard
        .filters
        .iter()
        .filter(|f| filter.as_deref().map_or(true, |id| f.id() == id))
        .collect();
    if filters.is_empty() {
        bail!("no dashboard filter matches");
    }

    for dashboard_filter in filters {
        let field = doc.get_field(dashboard_filter.rule.field_id());
        let resolutions = resolve_tile_targets(dashboard_filter, field, &dashboard.tiles);

        if json {
            println!("{}", serde_json::to_string_pretty(&resolutions)?);
            continue;
        }

        println!(
            "Filter {} on {} ({})",
            dashboard_filter.id(),
            dashboard_filter.rule.field_id(),
            describe_selection(selection_summary(&resolutions), resolutions.len())
        );
        if dashboard.tabs.is_empty() {
            for resolution in &resolutions {
                println!("  {}", describe_tile(resolution));
            }
            continue;
        }
        for (tab, tab_resolutions) in by_tab(&resolutions, &dashboard.tabs) {
            println!("  {}", tab.name);
            for resolution in tab_resolutions {
                println!("    {}", describe_tile(resolution));
            }
        }
    }
    Ok(())
}

fn handle_normalize(file: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let doc = load(&file)?;
    let json = parser::document_to_json(&doc)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn parse_path(text: &str) -> anyhow::Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().with_context(|| format!("bad path index '{}'", s)))
        .collect()
}

fn describe_selection(state: SelectionState, total: usize) -> String {
    match state {
        SelectionState::All => format!("all {} tiles", total),
        SelectionState::None => "no tiles".to_string(),
        SelectionState::Partial(n) => format!("{} of {} tiles", n, total),
    }
}

fn describe_tile(resolution: &TileResolution) -> String {
    let mark = if resolution.is_checked() { "[x]" } else { "[ ]" };
    let mut line = format!("{} {}", mark, resolution.label);
    if let Some(selected) = &resolution.selected_field {
        line.push_str(&format!(" -> {}", selected.id()));
    }
    if let Some(invalid) = &resolution.invalid_field {
        line.push_str(&format!(" (stale target {})", invalid));
    }
    if !resolution.is_available {
        line.push_str(" (no compatible field)");
    }
    line
}
