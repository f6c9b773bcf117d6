use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filecat_cli::clipboard::Osc52Clipboard;
use filecat_cli::commands::{self, ExportRequest};
use filecat_cli::{assignments, interactive};
use filecat_core::clipboard::Clipboard;
use filecat_core::config::{self, AppConfig};
use filecat_core::{Category, ExportKind, Session};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List { path, json } => run_list(&cfg, &path, json).await,
        Commands::Export {
            path,
            assign,
            assignments,
            excel,
            word,
            pdf,
            out,
            json,
        } => {
            let mut pairs = match assignments {
                Some(file) => assignments::load(&file)?,
                None => Vec::new(),
            };
            pairs.extend(assign);
            let formats = [
                (excel, ExportKind::Excel),
                (word, ExportKind::Word),
                (pdf, ExportKind::Pdf),
            ]
            .into_iter()
            .filter_map(|(on, kind)| on.then_some(kind))
            .collect();
            let out_dir = out.unwrap_or_else(|| PathBuf::from(&cfg.export.output_dir));
            let request = ExportRequest {
                path,
                assignments: pairs,
                formats,
                out_dir,
            };
            run_export(&cfg, request, json).await
        }
        Commands::Session { out } => {
            let out_dir = out.unwrap_or_else(|| PathBuf::from(&cfg.export.output_dir));
            run_session(&cfg, &out_dir).await
        }
    }
}

#[derive(Parser)]
#[command(name = "filecat")]
#[command(about = "List a directory, file its contents under categories, export the result", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every file under a directory, drive letter or UNC path
    List {
        path: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Categorize the files under a directory and write the documents
    Export {
        path: String,
        /// NAME=CATEGORY; repeatable. Unlisted files keep the default category
        #[arg(long, value_parser = assignments::parse_assignment)]
        assign: Vec<(String, Category)>,
        /// TOML ([files] table) or JSON object mapping file names to categories
        #[arg(long)]
        assignments: Option<PathBuf>,
        /// Write output.xlsx
        #[arg(long)]
        excel: bool,
        /// Write output.docx
        #[arg(long)]
        word: bool,
        /// Write output.pdf
        #[arg(long)]
        pdf: bool,
        /// Output directory (defaults to export.output_dir)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Output JSON summary
        #[arg(long)]
        json: bool,
    },
    /// Interactive session reading commands from stdin
    Session {
        /// Directory `save` writes to (defaults to export.output_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

async fn run_list(cfg: &AppConfig, path: &str, json: bool) -> Result<()> {
    let listing = commands::list(cfg, path).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }
    println!("{} files under {}", listing.files.len(), listing.base);
    for (index, file) in listing.files.iter().enumerate() {
        println!(
            "{:>4}. {}  {}  {}",
            index + 1,
            file.name,
            file.modified,
            file.relative_path
        );
    }
    Ok(())
}

async fn run_export(cfg: &AppConfig, request: ExportRequest, json: bool) -> Result<()> {
    let summary = commands::export(cfg, request).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}: {} files categorized", summary.base, summary.files);
        for file in &summary.written {
            println!("wrote {} ({}, {} bytes)", file.path.display(), file.mime, file.bytes);
        }
        for failure in &summary.failures {
            println!("failed: {failure}");
        }
    }
    if !summary.failures.is_empty() && summary.written.is_empty() {
        anyhow::bail!("no document could be generated");
    }
    Ok(())
}

async fn run_session(cfg: &AppConfig, out_dir: &Path) -> Result<()> {
    let session = Session::new(cfg).context("starting session")?;
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let mut osc52 = Osc52Clipboard::new(io::stdout());
    let clipboard: Option<&mut dyn Clipboard> = if io::stdout().is_terminal() {
        Some(&mut osc52)
    } else {
        None
    };
    let session = interactive::run(session, input, &mut stdout, clipboard, out_dir).await?;
    session.close();
    Ok(())
}
