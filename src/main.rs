//! sitewalk main entry point
//!
//! Command-line front-end for the sitewalk crawler: loads a TOML
//! configuration, runs the crawl, and prints one JSON result per line.

use clap::Parser;
use sitewalk::config::load_config;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// sitewalk: a breadth-first site crawler
///
/// Crawls a site level by level from a seed URL, respecting robots.txt,
/// a global request delay, and a connection cap. Each crawled page is
/// emitted as one JSON object on stdout.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A breadth-first site crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the configured seed URL
    #[arg(long, value_name = "URL")]
    start: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(start) = cli.start {
        config.crawler.start = start;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let mut crawl = sitewalk::crawl(config)?;

    // Logs go to stderr via tracing; stdout carries only result JSON.
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    while let Some(result) = crawl.next().await {
        serde_json::to_writer(&mut out, &result)?;
        writeln!(out)?;
    }

    tracing::info!("Crawl complete");
    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &sitewalk::config::Config) {
    println!("=== sitewalk dry run ===\n");

    println!("Crawler:");
    println!("  Start URL:        {}", config.crawler.start);
    println!("  Connections:      {}", config.crawler.connections);
    println!(
        "  Wait time:        {:?}",
        config.crawler.wait_duration()
    );
    if config.crawler.max_depth < 0 {
        println!("  Max depth:        unbounded");
    } else {
        println!("  Max depth:        {}", config.crawler.max_depth);
    }
    println!("  Respect nofollow: {}", config.crawler.respect_nofollow);

    println!("\nUser agent:");
    println!("  Header: {}", config.user_agent.full);
    println!("  Robots: {}", config.user_agent.robots);

    println!("\nInclude patterns ({}):", config.crawler.include.len());
    for pattern in &config.crawler.include {
        println!("  - {}", pattern);
    }

    println!("\nExclude patterns ({}):", config.crawler.exclude.len());
    for pattern in &config.crawler.exclude {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}
