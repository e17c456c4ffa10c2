use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use bank_nodal::{
    parse_names, render_preview, GeneratorBuilder, OutputFormat, SheetSelector,
    DEFAULT_PREVIEW_ROWS,
};

const DEFAULT_DATASET: &str = "Bank Nodal Officer Email I.D.xlsx";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the first rows of the dataset as a Markdown table
    Preview {
        #[command(flatten)]
        source: DatasetArgs,

        /// Number of rows to show
        #[arg(long, short = 'n', default_value_t = DEFAULT_PREVIEW_ROWS)]
        rows: usize,
    },

    /// Look up bank names and write the contact document
    Generate {
        #[command(flatten)]
        source: DatasetArgs,

        /// Comma-separated bank names
        #[arg(long, short = 'b')]
        names: String,

        /// Output path ('-' for stdout). Defaults to the format's fixed file name
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = Format::Docx)]
        format: Format,
    },
}

#[derive(Args)]
struct DatasetArgs {
    /// Spreadsheet with Bank Name, Customer Email, Nodal Email and Grievance Email columns
    #[arg(long, short = 'd', default_value = DEFAULT_DATASET)]
    dataset: PathBuf,

    /// Sheet index (0-based)
    #[arg(long, conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Sheet name
    #[arg(long)]
    sheet_name: Option<String>,
}

impl DatasetArgs {
    fn sheet_selector(&self) -> SheetSelector {
        match (&self.sheet_name, self.sheet_index) {
            (Some(name), _) => SheetSelector::Name(name.clone()),
            (None, Some(index)) => SheetSelector::Index(index),
            (None, None) => SheetSelector::default(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Docx,
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Docx => OutputFormat::Docx,
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Preview { source, rows } => preview(&source, rows),
        Command::Generate {
            source,
            names,
            output,
            format,
        } => generate(&source, &names, output, format),
    }
}

fn preview(source: &DatasetArgs, rows: usize) -> Result<()> {
    let generator = GeneratorBuilder::new()
        .with_sheet_selector(source.sheet_selector())
        .build()?;
    let dataset = generator.load_dataset_from_path(&source.dataset)?;
    info!(
        rows = dataset.len(),
        path = %source.dataset.display(),
        "dataset loaded"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_preview(&dataset, rows, &mut handle)?;
    handle.flush()?;
    Ok(())
}

fn generate(
    source: &DatasetArgs,
    names: &str,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let names = parse_names(names);
    if names.is_empty() {
        bail!("No bank names given. Pass a comma-separated list with --names.");
    }

    let generator = GeneratorBuilder::new()
        .with_sheet_selector(source.sheet_selector())
        .with_output_format(format.into())
        .build()?;

    // データセットがない場合は照合前に中断する
    let dataset = generator.load_dataset_from_path(&source.dataset)?;
    let document = generator.generate(&dataset, &names)?;

    let output = output.unwrap_or_else(|| PathBuf::from(generator.file_name()));
    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&document)?;
        handle.flush()?;
    } else {
        std::fs::write(&output, &document)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!(
            path = %output.display(),
            mime = generator.mime_type(),
            bytes = document.len(),
            "document written"
        );
    }

    Ok(())
}
