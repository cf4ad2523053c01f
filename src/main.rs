//! Command-line front end: load a delimited file, apply a view and print or export it.
//!
//! Logging goes to stderr and is configured through `RUST_LOG`
//! (for example `RUST_LOG=rusty_csv=debug`).

use anyhow::{Context, Result};
use clap::Parser;
use rusty_csv::view::paginate::PAGE_SIZES;
use rusty_csv::view::ViewError;
use rusty_csv::{Explorer, PageItem, SortDirection, SortOrder, View, ViewAction, ViewState};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Explore CSV, TSV and other delimited text files
#[derive(Parser, Debug)]
#[command(name = "rusty-csv", version, about = "Explore delimited text files")]
struct CliArgs {
    /// Delimited text file to load
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Case-insensitive search across all columns
    #[arg(short, long)]
    search: Option<String>,

    /// Column filter, repeatable; COLUMN is a header name or 1-based number
    #[arg(short, long = "filter", value_name = "COLUMN=VALUE")]
    filters: Vec<String>,

    /// Column to sort by (header name or 1-based number)
    #[arg(long, value_name = "COLUMN")]
    sort: Option<String>,

    /// Sort direction: asc (default), desc or none; requires --sort
    #[arg(long, value_name = "DIRECTION", requires = "sort")]
    direction: Option<String>,

    /// Page to show (1-based)
    #[arg(short, long, value_name = "N")]
    page: Option<usize>,

    /// Rows per page: 25, 50, 100, or 0 for all rows
    #[arg(long, value_name = "N", value_parser = parse_page_size)]
    page_size: Option<usize>,

    /// Saved view state (JSON) to start from; other flags override it
    #[arg(long, value_name = "FILE")]
    view: Option<PathBuf>,

    /// Save the resulting view state as JSON
    #[arg(long, value_name = "FILE")]
    save_view: Option<PathBuf>,

    /// Write every matching row, across all pages, to a CSV file
    #[arg(short, long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Print the detected column types
    #[arg(long)]
    types: bool,
}

fn main() -> ExitCode {
    init_tracing();
    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to warnings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn run(args: CliArgs) -> Result<()> {
    let explorer = Explorer::open(&args.path)?;
    let state = view_state(&args, &explorer)?;
    debug!(?state, "resolved view state");

    if args.types {
        let summary = explorer.summary();
        println!("delimiter\t{}", summary.delimiter);
        println!("rows\t{}", summary.rows);
        for (name, kind) in &summary.columns {
            println!("{}\t{}", name, kind);
        }
        println!();
    }

    let view = explorer.view(&state);
    write_page(io::stdout().lock(), &view)?;
    print_status(&view);

    if let Some(path) = &args.export {
        view.export_to(path)?;
        eprintln!("Exported {} rows to {}", view.len(), path.display());
    }
    if let Some(path) = &args.save_view {
        state.save(path)?;
    }
    Ok(())
}

/// Builds the view state from a saved state (if any) and the command-line flags.
fn view_state(args: &CliArgs, explorer: &Explorer) -> Result<ViewState> {
    let mut state = match &args.view {
        Some(path) => ViewState::load(path)?,
        None => ViewState::default(),
    };
    if let Some(search) = &args.search {
        state = state.apply(ViewAction::Search(search.clone()));
    }
    for filter in &args.filters {
        let (column, value) = filter
            .split_once('=')
            .ok_or_else(|| ViewError::InvalidFilter(filter.clone()))?;
        let column = explorer
            .column_index(column.trim())
            .with_context(|| format!("Invalid column filter '{}'", filter))?;
        state = state.apply(ViewAction::FilterColumn {
            column,
            value: value.to_string(),
        });
    }
    if let Some(column) = &args.sort {
        let column = explorer.column_index(column).context("Invalid sort column")?;
        let direction = SortDirection::parse(args.direction.as_deref().unwrap_or("asc"))?;
        state = state.apply(ViewAction::SetSort(SortOrder::new(column, direction)));
    }
    if let Some(page_size) = args.page_size {
        state = state.apply(ViewAction::SetPageSize(page_size));
    }
    if let Some(page) = args.page {
        state = state.apply(ViewAction::GoToPage(page));
    }
    Ok(state)
}

/// Accepts only the offered page sizes.
fn parse_page_size(value: &str) -> Result<usize, String> {
    let size: usize = value.parse().map_err(|e| format!("{}", e))?;
    if PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        let offered: Vec<String> = PAGE_SIZES.iter().map(|size| size.to_string()).collect();
        Err(format!("page size must be one of {}", offered.join(", ")))
    }
}

/// Writes the header and the current page as tab-separated records.
fn write_page<W: Write>(output: W, view: &View<'_>) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(output);
    writer.write_record(view.headers())?;
    for row in view.page_rows() {
        writer.write_record(row.iter())?;
    }
    writer.flush()?;
    Ok(())
}

/// Prints the row range and page buttons on stderr.
fn print_status(view: &View<'_>) {
    let pages: Vec<String> = view
        .page_list()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == view.page() => format!("[{}]", page),
            item => item.to_string(),
        })
        .collect();
    match view.range() {
        Some((first, last)) => eprintln!(
            "Rows {}-{} of {} | page {}/{} | {}",
            first,
            last,
            view.len(),
            view.page(),
            view.total_pages(),
            pages.join(" ")
        ),
        None => eprintln!("No matching rows"),
    }
}
