// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load and validate the crawl configuration (fail before crawling)
// 3. Build the page parser and the crawl engine, wrapped in the profiler
// 4. Crawl, then write the result and the profiling data
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config/ - crawl configuration file
mod crawl;     // src/crawl/ - the crawl engines
mod parser;    // src/parser/ - fetching pages and extracting words/links
mod profiler;  // src/profiler/ - timing of crawl and parse calls

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use log::info;

use cli::Cli;
use config::ConfigLoader;
use crawl::{SystemClock, WebCrawler};
use parser::{HtmlPageParser, PageParser};
use profiler::Profiler;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loader = ConfigLoader::new(&cli.config);
    let config = loader
        .load()
        .with_context(|| format!("Failed to load {}", loader.path().display()))?;
    let policy = config.policy()?;
    let ignored_words = config.ignored_words()?;

    let profiler = Profiler::new();

    let parser = HtmlPageParser::new(ignored_words).context("Failed to create HTTP client")?;
    let parser: Arc<dyn PageParser> = Arc::new(profiler.wrap_parser(parser));

    let strategy = cli.strategy.unwrap_or_else(|| config.strategy());
    let crawler = crawl::build_crawler(strategy, policy, parser, Arc::new(SystemClock))?;
    let crawler = profiler.wrap_crawler(crawler);

    info!(
        "Crawling {} start page(s) with {:?} strategy (up to {} page(s) at once)",
        config.start_pages.len(),
        strategy,
        crawler.max_parallelism()
    );

    let result = crawler.crawl(&config.start_pages);
    info!(
        "Visited {} page(s), reporting {} popular word(s)",
        result.urls_visited(),
        result.word_counts().len()
    );

    match cli.output.as_deref().or(config.result_path.as_deref()) {
        Some(path) => {
            result
                .write_to_path(path)
                .with_context(|| format!("Failed to write result to {}", path.display()))?;
            info!("Crawl result written to {}", path.display());
        }
        None => result.write_json(io::stdout().lock())?,
    }

    match cli
        .profile_output
        .as_deref()
        .or(config.profile_output_path.as_deref())
    {
        Some(path) => write_profile(&profiler, path)?,
        None => profiler.write_data(io::stdout().lock())?,
    }

    Ok(0)
}

fn write_profile(profiler: &Profiler, path: &Path) -> Result<()> {
    profiler
        .write_data_to_path(path)
        .with_context(|| format!("Failed to write profile data to {}", path.display()))
}

// Logs go to stderr so they never mix with the JSON on stdout
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
