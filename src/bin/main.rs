use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use styled_inject::config::defaults::default_config_template;
use styled_inject::text::LineIndex;
use styled_inject::{InjectResult, RuleSnapshot, RuleStore, VirtualDocument, inject_source};

/// Find stylesheet content embedded in JavaScript and print it as virtual documents
#[derive(Parser)]
#[command(name = "styled-inject")]
#[command(version)]
#[command(about = "Find CSS-in-JS injection sites and print their virtual stylesheet documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan JavaScript/JSX files for injection sites
    Scan {
        /// Files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Project root holding styled-inject.toml (default: current directory)
        #[arg(long)]
        project: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print a configuration template to stdout
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    documents: &'a [VirtualDocument],
}

fn scan_file(path: &Path, rules: &RuleSnapshot) -> InjectResult<(String, Vec<VirtualDocument>)> {
    let source = fs::read_to_string(path)?;
    let documents = inject_source(&source, &path.display().to_string(), rules)?;
    Ok((source, documents))
}

fn print_text(path: &Path, source: &str, documents: &[VirtualDocument]) {
    let index = LineIndex::new(source);
    for document in documents {
        let start = document.host_ranges().next().map_or(0, |range| range.start);
        let (line, column) = index.line_col(start);
        println!(
            "{}:{}:{} [{}, {} segment(s)]",
            path.display(),
            line,
            column,
            document.language,
            document.shreds.len()
        );
        for text_line in document.text.lines() {
            println!("    {}", text_line);
        }
    }
}

fn run_scan(files: Vec<PathBuf>, project: Option<PathBuf>, format: OutputFormat) -> bool {
    let root = project.or_else(|| std::env::current_dir().ok());

    let store = RuleStore::new();
    store.reload_user();
    if let Some(root) = root.as_deref() {
        store.reload_project(root);
    }
    let rules = store.snapshot(root.as_deref());

    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, scan_file(path, &rules)))
        .collect();

    let mut ok = true;
    let mut reports = Vec::new();
    for (path, result) in &results {
        match result {
            Ok((source, documents)) => match format {
                OutputFormat::Text => print_text(path, source, documents),
                OutputFormat::Json => reports.push(FileReport { path, documents }),
            },
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                ok = false;
            }
        }
    }

    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                ok = false;
            }
        }
    }
    ok
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            files,
            project,
            format,
        } => {
            if !run_scan(files, project, format) {
                std::process::exit(1);
            }
        }
        Commands::Config {
            command: ConfigCommands::Init,
        } => match default_config_template() {
            Ok(template) => print!("{}", template),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}
