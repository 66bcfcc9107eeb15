//! Sebo CLI - used-book catalog maintenance tool

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sebo_catalog::{autofill_selection, autofill_skus, catalog_template, Sku};
use sebo_grid::{CellRange, MatchMode, Spreadsheet};
use sebo_io::{CsvWriteOptions, CsvWriter, SpreadsheetExt};

#[derive(Parser)]
#[command(name = "sebo")]
#[command(author, version, about = "Used-book catalog maintenance tool")]
struct Cli {
    /// Catalog document (JSON)
    #[arg(short, long, global = true, default_value = "catalogo.json")]
    book: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh catalog document
    Init {
        /// Overwrite an existing document
        #[arg(short, long)]
        force: bool,
    },

    /// Show information about the catalog document
    Info,

    /// List all sheets in the document
    Sheets,

    /// Select the first row whose first column contains a value
    JumpRow {
        /// Text to look for in column 1 of the active sheet
        query: String,
    },

    /// Activate the first sheet whose name starts with a prefix,
    /// following the selected row's identity when it exists there too
    JumpSheet {
        /// Sheet name prefix
        prefix: String,
    },

    /// Fill the derived fields of one or more products
    Autofill {
        /// SKUs to fill (default: the document's selected rows)
        skus: Vec<u32>,

        /// Rows to fill instead of the stored selection
        #[arg(long, value_name = "N:M", conflicts_with = "skus")]
        rows: Option<String>,

        /// Sheet the rows refer to (default: the active sheet)
        #[arg(long, requires = "rows")]
        sheet: Option<String>,

        /// Regenerate fields that are already filled
        #[arg(short, long)]
        overwrite: bool,
    },

    /// Export one sheet as CSV
    #[command(alias = "csv")]
    ExportCsv {
        /// Sheet to export (default: the active sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => init(&cli.book, force),
        Commands::Info => show_info(&cli.book),
        Commands::Sheets => list_sheets(&cli.book),
        Commands::JumpRow { query } => jump_row(&cli.book, &query),
        Commands::JumpSheet { prefix } => jump_sheet(&cli.book, &prefix),
        Commands::Autofill {
            skus,
            rows,
            sheet,
            overwrite,
        } => autofill(&cli.book, &skus, rows.as_deref(), sheet.as_deref(), overwrite),
        Commands::ExportCsv {
            sheet,
            output,
            delimiter,
        } => export_csv(&cli.book, sheet.as_deref(), output.as_deref(), delimiter),
    }
}

fn load(book: &Path) -> Result<Spreadsheet> {
    Spreadsheet::open(book).with_context(|| format!("Failed to open '{}'", book.display()))
}

fn store(ss: &Spreadsheet, book: &Path) -> Result<()> {
    ss.save(book)
        .with_context(|| format!("Failed to save '{}'", book.display()))
}

fn init(book: &Path, force: bool) -> Result<()> {
    if book.exists() && !force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            book.display()
        );
    }
    let ss = catalog_template().context("Failed to build the catalog template")?;
    store(&ss, book)?;
    eprintln!("Wrote catalog template to '{}'", book.display());
    Ok(())
}

fn show_info(book: &Path) -> Result<()> {
    let ss = load(book)?;

    println!("File: {}", book.display());
    println!("Sheets: {}", ss.sheet_count());
    if let Some(sheet) = ss.active_sheet() {
        println!("Active sheet: \"{}\"", sheet.name());
    }
    if let Some(selection) = ss.selection() {
        println!("Selection: {}", selection);
    }

    for (i, sheet) in ss.sheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());
        println!(
            "    Size: {} rows x {} columns",
            sheet.row_count(),
            sheet.col_count()
        );
        if sheet.last_row() > 0 {
            println!(
                "    Data extent: {} rows x {} columns",
                sheet.last_row(),
                sheet.last_col()
            );
        } else {
            println!("    Data extent: empty");
        }
    }

    let named: Vec<_> = ss.named_ranges().collect();
    if !named.is_empty() {
        println!();
        println!("Named ranges:");
        for (name, target) in named {
            println!("  {} = {}", name, target);
        }
    }

    Ok(())
}

fn list_sheets(book: &Path) -> Result<()> {
    let ss = load(book)?;

    for (i, sheet) in ss.sheets().enumerate() {
        let marker = if i == ss.active_index() { " (active)" } else { "" };
        println!("{}\t{}{}", i, sheet.name(), marker);
    }

    Ok(())
}

fn jump_row(book: &Path, query: &str) -> Result<()> {
    let mut ss = load(book)?;

    let sheet = ss.active_sheet().context("The document has no sheets")?;
    let name = sheet.name().to_string();
    let column = CellRange::column(1, sheet.row_count());
    let found = sheet.find_text(&column, query, MatchMode::Contains);

    let Some(at) = found else {
        bail!("No row in column 1 of '{}' contains {:?}", name, query);
    };

    ss.select_cell(at)?;
    store(&ss, book)?;
    println!("{}!{}", name, at.to_a1());
    Ok(())
}

fn jump_sheet(book: &Path, prefix: &str) -> Result<()> {
    let mut ss = load(book)?;

    // First-column value of the selected row, to be looked up again on the
    // target sheet so the same record stays selected across the jump
    let carried = match (ss.selection(), ss.active_sheet()) {
        (Some(selection), Some(sheet)) => Some(sheet.value_at(selection.start.row, 1).to_string()),
        _ => None,
    }
    .filter(|value| !value.is_empty());

    let mut target = None;
    for (i, sheet) in ss.sheets().enumerate() {
        if sheet.name().starts_with(prefix) {
            let found = carried.as_deref().and_then(|value| {
                let column = CellRange::column(1, sheet.row_count());
                sheet.find_text(&column, value, MatchMode::Exact)
            });
            target = Some((i, sheet.name().to_string(), found));
            break;
        }
    }
    let Some((index, name, found)) = target else {
        bail!("No sheet name starts with {:?}", prefix);
    };

    ss.set_active_sheet(index)?;
    match found {
        Some(at) => {
            ss.select_cell(at)?;
            println!("{}!{}", name, at.to_a1());
        }
        None => println!("{}", name),
    }
    store(&ss, book)
}

fn autofill(
    book: &Path,
    skus: &[u32],
    rows: Option<&str>,
    sheet: Option<&str>,
    overwrite: bool,
) -> Result<()> {
    let mut ss = load(book)?;

    let report = if !skus.is_empty() {
        let skus: Vec<Sku> = skus.iter().copied().map(Sku).collect();
        autofill_skus(&mut ss, &skus, overwrite)?
    } else {
        if let Some(rows) = rows {
            if let Some(name) = sheet {
                let index = ss
                    .sheet_index(name)
                    .with_context(|| format!("No sheet named '{}'", name))?;
                ss.set_active_sheet(index)?;
            }
            let (first, last) = parse_rows(rows)?;
            ss.set_selection(CellRange::from_indices(first, 1, last, 1))
                .with_context(|| format!("Rows {} do not fit the active sheet", rows))?;
        }
        autofill_selection(&mut ss, overwrite)?
    };

    for outcome in &report.outcomes {
        let subject = match (outcome.sku, outcome.row) {
            (Some(sku), _) => format!("product {}", sku),
            (None, Some(row)) => format!("row {}", row),
            (None, None) => "product".to_string(),
        };
        match &outcome.result {
            Ok(()) => println!("Filled {}", subject),
            Err(err) => eprintln!("Skipped {}: {}", subject, err),
        }
    }

    if report.filled() > 0 {
        store(&ss, book)?;
    }
    eprintln!(
        "Filled {} of {} products",
        report.filled(),
        report.outcomes.len()
    );
    if report.filled() == 0 {
        bail!("No product was filled");
    }
    Ok(())
}

/// Parse a row range: "4:9" spans rows 4 through 9, "4" is just row 4
fn parse_rows(rows: &str) -> Result<(u32, u32)> {
    let (first, last) = match rows.split_once(':') {
        Some((first, last)) => (first, last),
        None => (rows, rows),
    };
    let parse = |s: &str| -> Result<u32> {
        s.trim()
            .parse()
            .with_context(|| format!("Invalid row range '{}'", rows))
    };
    let (first, last) = (parse(first)?, parse(last)?);
    if first == 0 || last < first {
        bail!("Invalid row range '{}'", rows);
    }
    Ok((first, last))
}

fn export_csv(
    book: &Path,
    sheet: Option<&str>,
    output: Option<&Path>,
    delimiter: char,
) -> Result<()> {
    let ss = load(book)?;

    let sheet = match sheet {
        Some(name) => ss
            .sheet_by_name(name)
            .with_context(|| format!("No sheet named '{}'", name))?,
        None => ss.active_sheet().context("The document has no sheets")?,
    };

    if !delimiter.is_ascii() {
        bail!("Delimiter must be an ASCII character");
    }
    let options = CsvWriteOptions {
        delimiter: delimiter as u8,
        ..Default::default()
    };

    match output {
        Some(path) => {
            CsvWriter::write_file(sheet, path, &options)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote '{}' to '{}'", sheet.name(), path.display());
        }
        None => {
            let stdout = io::stdout();
            CsvWriter::write(sheet, stdout.lock(), &options)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
