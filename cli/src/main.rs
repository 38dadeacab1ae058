//! undocx CLI - DOCX to Markdown conversion tool
//!
//! Converts Word documents into Markdown pages with front matter and
//! extracted images, one file at a time or a whole folder at once.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use undocx::{
    convert_directory, convert_file, default_output_dir, parse_file, BatchOptions, HeaderKind,
    RenderOptions,
};

/// DOCX to Markdown conversion with extracted images
#[derive(Parser)]
#[command(
    name = "undocx",
    version,
    about = "Convert DOCX documents to Markdown",
    long_about = "undocx - DOCX to Markdown conversion tool.\n\n\
                  Writes <name>.md and img_<name>/<name>_imagen<N>.png next to each other.\n\n\
                  Usage:\n  \
                  undocx <file>              Convert next to the input file\n  \
                  undocx <file> <output>     Convert into the given directory\n  \
                  undocx batch <dir>         Convert every .docx in a directory"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (for default conversion)
    #[arg(global = false)]
    input: Option<PathBuf>,

    /// Output directory (for default conversion)
    #[arg(global = false)]
    output: Option<PathBuf>,

    /// Enable debug logging (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Front-matter arguments shared by conversion commands.
#[derive(clap::Args, Clone)]
struct FrontMatterArgs {
    /// Front-matter template: topic (index page) or sub-topic
    #[arg(long, default_value = "topic", value_parser = parse_header)]
    header: HeaderKind,

    /// Omit the front-matter block
    #[arg(long)]
    no_front_matter: bool,

    /// Front-matter title
    #[arg(long)]
    title: Option<String>,

    /// Front-matter author
    #[arg(long)]
    author: Option<String>,

    /// Front-matter description (sub-topic template)
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to Markdown
    Convert {
        /// Input file path
        input: PathBuf,

        /// Output directory (default: the input file's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        front_matter: FrontMatterArgs,
    },

    /// Convert every .docx file in a directory
    Batch {
        /// Input directory
        input: PathBuf,

        /// Output directory (default: the input directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        front_matter: FrontMatterArgs,

        /// Convert one document at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show document information and metadata
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Dump the parsed document model as JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },
}

fn parse_header(selector: &str) -> Result<HeaderKind, String> {
    Ok(HeaderKind::from_selector(selector))
}

impl FrontMatterArgs {
    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default().with_header_kind(self.header);
        if let Some(title) = &self.title {
            options = options.with_title(title);
        }
        if let Some(author) = &self.author {
            options = options.with_author(author);
        }
        if let Some(description) = &self.description {
            options = options.with_description(description);
        }
        if self.no_front_matter {
            options = options.without_front_matter();
        }
        options
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs the command. Returns false when a batch had failures.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        if let Some(input) = cli.input {
            run_convert(&input, cli.output.as_deref(), &RenderOptions::default())?;
        } else {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
        return Ok(true);
    };

    match command {
        Commands::Convert {
            input,
            output,
            front_matter,
        } => {
            run_convert(&input, output.as_deref(), &front_matter.render_options())?;
        }

        Commands::Batch {
            input,
            output,
            front_matter,
            sequential,
        } => {
            return run_batch(&input, output.as_deref(), &front_matter, sequential);
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing document...");

            let format = undocx::detect_format_from_path(&input)?;
            let doc = parse_file(&input)?;

            pb.finish_and_clear();

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), format);
            println!("{}: {}", "Paragraphs".bold(), doc.paragraph_count());
            println!("{}: {}", "Tables".bold(), doc.table_count());
            println!("{}: {}", "Images".bold(), doc.image_count());

            let metadata = &doc.metadata;
            for (label, value) in [
                ("Title", &metadata.title),
                ("Author", &metadata.author),
                ("Subject", &metadata.subject),
                ("Created", &metadata.created),
                ("Modified", &metadata.modified),
                ("Last modified by", &metadata.last_modified_by),
            ] {
                if let Some(value) = value {
                    println!("{}: {}", label.bold(), value);
                }
            }

            let text = doc.plain_text();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());
            println!("{}: {}", "Characters".bold(), text.chars().count());
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Parsing document...");

            let doc = parse_file(&input)?;
            pb.set_message("Rendering to JSON...");

            let json = if compact {
                serde_json::to_string(&doc)?
            } else {
                serde_json::to_string_pretty(&doc)?
            };

            pb.finish_and_clear();
            write_output(output.as_deref(), &json)?;

            if let Some(path) = output {
                println!("{} Converted to JSON: {}", "✓".green().bold(), path.display());
            }
        }
    }

    Ok(true)
}

fn run_convert(
    input: &Path,
    output: Option<&Path>,
    options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Converting document...");

    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_dir(input));
    let result = convert_file(input, &output_dir, options);

    pb.finish_and_clear();
    let converted = result?;

    println!(
        "{} Converted to Markdown: {}",
        "✓".green().bold(),
        converted.markdown_path.display()
    );
    if !converted.images.is_empty() {
        println!("  {} {} images extracted", "✓".green(), converted.images.len());
    }

    Ok(())
}

fn run_batch(
    input: &Path,
    output: Option<&Path>,
    front_matter: &FrontMatterArgs,
    sequential: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let pb = create_spinner("Converting documents...");

    let output_dir = output.unwrap_or(input);
    let mut options = BatchOptions::new(front_matter.render_options());
    if sequential {
        options = options.sequential();
    }
    let result = convert_directory(input, output_dir, &options);

    pb.finish_and_clear();
    let report = result?;

    for converted in &report.succeeded {
        println!(
            "  {} {} → {}",
            "✓".green(),
            converted.input.display(),
            converted.markdown_path.display()
        );
    }
    for failure in &report.failed {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failure.input.display(),
            failure.error
        );
    }

    println!("{}", "─".repeat(40));
    let summary = format!(
        "{} converted, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    if report.is_success() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.yellow().bold());
    }

    Ok(report.is_success())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
