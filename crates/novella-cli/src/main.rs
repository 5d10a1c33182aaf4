mod console;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use tracing_subscriber::EnvFilter;

use novella_client::{FetcherConfig, ReqwestFetcher};
use novella_core::harvest::DEFAULT_BOOK_TITLE;
use novella_core::traits::{ChapterSink, Fetcher};
use novella_core::{
    Harvest, Harvester, ListingState, NullSink, SchemaVariant, ThrottleConfig, paywall,
};
use novella_store::{ReportWriter, TextFileSink};

use crate::console::ConsoleReporter;

const DEFAULT_URL: &str = "https://b.faloo.com/1364176.html";
const DEFAULT_LIMIT: usize = 10;

#[derive(Parser)]
#[command(
    name = "novella",
    version,
    about = "Download the free chapters of Faloo and Qidian novels"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download free chapters from a book page (or a single Qidian chapter)
    Fetch {
        /// Book listing page or Qidian chapter URL (prompted if omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Number of chapters to download, 0 for all (prompted if omitted)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Directory for chapter files, the summary, and the progress log
        #[arg(short, long, env = "NOVELLA_OUTPUT_DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Pause after each downloaded chapter, in milliseconds
        #[arg(long, env = "NOVELLA_DELAY_MS", default_value_t = 1000)]
        delay_ms: u64,

        /// Continue without asking when the page looks paid
        #[arg(short, long, default_value_t = false)]
        yes: bool,

        /// Print the run result as JSON on stdout
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Fetch and extract, but write no files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Show which site layout a URL maps to (no network access)
    Detect {
        #[arg(short, long)]
        url: String,
    },

    /// Check whether a page looks like paid content
    Check {
        #[arg(short, long)]
        url: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("novella=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            url,
            limit,
            output_dir,
            delay_ms,
            yes,
            json,
            dry_run,
        } => {
            cmd_fetch(FetchOptions {
                url,
                limit,
                output_dir,
                delay: Duration::from_millis(delay_ms),
                yes,
                json,
                dry_run,
            })
            .await?;
        }
        Commands::Detect { url } => {
            println!("{}", SchemaVariant::detect(&url));
        }
        Commands::Check { url } => {
            let fetcher = build_fetcher()?;
            if paywall::check_url(&fetcher, &url).await {
                println!("paid content indicators found");
            } else {
                println!("no paid content indicators found");
            }
        }
    }

    Ok(())
}

struct FetchOptions {
    url: Option<String>,
    limit: Option<usize>,
    output_dir: PathBuf,
    delay: Duration,
    yes: bool,
    json: bool,
    dry_run: bool,
}

fn build_fetcher() -> Result<ReqwestFetcher> {
    let config = FetcherConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    ReqwestFetcher::from_config(&config)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to create HTTP client")
}

async fn cmd_fetch(opts: FetchOptions) -> Result<()> {
    if !opts.json {
        print_banner();
    }

    let url = match opts.url {
        Some(url) => url,
        None => Input::<String>::new()
            .with_prompt("Novel URL")
            .default(DEFAULT_URL.to_string())
            .interact_text()?,
    };

    let variant = SchemaVariant::detect(&url);
    if !variant.is_supported() {
        anyhow::bail!(
            "Unsupported site: {url} (only faloo.com and qidian.com free chapters are supported)"
        );
    }

    let fetcher = build_fetcher()?;

    if paywall::check_url(&fetcher, &url).await {
        eprintln!("Warning: this page may contain paid content.");
        eprintln!("Only free chapters are downloaded; buy paid chapters through the official site.");
        let proceed = opts.yes
            || Confirm::new()
                .with_prompt("Continue?")
                .default(false)
                .interact()?;
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let limit = match opts.limit {
        Some(n) => n,
        None => Input::<usize>::new()
            .with_prompt("Chapters to download (0 = all)")
            .default(DEFAULT_LIMIT)
            .interact_text()?,
    };
    let limit = (limit > 0).then_some(limit);

    let reporter = if opts.json {
        ConsoleReporter::quiet()
    } else {
        ConsoleReporter::default()
    };
    if !opts.json {
        println!("\nDownloading from {url} ({variant})");
        match limit {
            Some(n) => println!("Chapter limit: {n}"),
            None => println!("Chapter limit: all"),
        }
        println!("{}", "-".repeat(60));
    }

    let throttle = ThrottleConfig::new(opts.delay);
    let outcome = if opts.dry_run {
        run_harvest(fetcher, NullSink, throttle, &url, limit, &reporter).await
    } else {
        let sink = TextFileSink::new(&opts.output_dir);
        run_harvest(fetcher, sink, throttle, &url, limit, &reporter).await
    };

    let harvest = match outcome {
        Ok(harvest) => harvest,
        Err(e) => {
            let progress_dir = (!opts.dry_run).then_some(opts.output_dir.as_path());
            report_failure(&mut std::io::stderr(), progress_dir, &reporter);
            return Err(e).context("Download failed");
        }
    };

    if !opts.dry_run {
        let reports = ReportWriter::new(&opts.output_dir);
        reports
            .write_summary(&harvest.book_title, &harvest.result, Local::now())
            .map_err(|e| anyhow::anyhow!(e))
            .context("Failed to write summary")?;
        record_progress(
            &opts.output_dir,
            &harvest.book_title,
            harvest.result.attempted,
            harvest.result.succeeded,
        );
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&harvest)?);
    } else {
        print_tally(&harvest);
    }

    Ok(())
}

async fn run_harvest<F: Fetcher, S: ChapterSink>(
    fetcher: F,
    sink: S,
    throttle: ThrottleConfig,
    url: &str,
    limit: Option<usize>,
    reporter: &ConsoleReporter,
) -> Result<Harvest> {
    Harvester::new(fetcher, sink, throttle)
        .run(url, limit, reporter)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

/// Tally for a run that stopped on a fatal error. The counts collected so far
/// are printed to `out` and, when `progress_dir` is set, logged under the
/// fallback book title since the source page may never have loaded.
fn report_failure(
    out: &mut impl Write,
    progress_dir: Option<&Path>,
    reporter: &ConsoleReporter,
) -> (usize, usize) {
    let (attempted, succeeded) = reporter.tally();
    if let Some(dir) = progress_dir {
        record_progress(dir, DEFAULT_BOOK_TITLE, attempted, succeeded);
    }
    let _ = writeln!(
        out,
        "Download stopped: attempted {attempted}, succeeded {succeeded}"
    );
    (attempted, succeeded)
}

/// The progress log is best effort: a failure is logged, not fatal.
fn record_progress(dir: &Path, book_title: &str, attempted: usize, succeeded: usize) {
    if let Err(e) =
        ReportWriter::new(dir).append_progress(book_title, attempted, succeeded, Local::now())
    {
        tracing::warn!(error = %e, "Failed to append progress log");
    }
}

fn print_banner() {
    println!("{}", "=".repeat(60));
    println!("novella {}", env!("CARGO_PKG_VERSION"));
    println!("Supported sites: b.faloo.com, qidian.com (free chapters only)");
    println!("{}", "=".repeat(60));
}

fn print_tally(harvest: &Harvest) {
    println!("\n{}", "=".repeat(60));
    match harvest.listing {
        ListingState::NoFreeChapters => println!("Nothing downloaded: no free chapters found."),
        _ => println!("Done: 《{}》", harvest.book_title),
    }
    println!(
        "Attempted: {}, downloaded: {}",
        harvest.result.attempted, harvest.result.succeeded
    );
    println!("{}", "=".repeat(60));
}
