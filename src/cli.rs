// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Most settings live in the JSON config file; the flags here only override
// where the output goes and which engine runs.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::config::Strategy;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "web-crawler",
    version,
    about = "Crawl websites and report the most popular words",
    long_about = "web-crawler follows links from a set of start pages, up to a maximum depth \
                  and within a time limit, and reports the most frequent words it found."
)]
pub struct Cli {
    /// Path to the JSON crawl configuration
    ///
    /// This is a positional argument (required, no flag needed)
    pub config: PathBuf,

    /// Crawl engine to use, overriding the config file
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Write the crawl result here instead of the config's resultPath
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Append profiling data here instead of the config's profileOutputPath
    #[arg(long)]
    pub profile_output: Option<PathBuf>,

    /// More log output (-v = info, -vv = debug). RUST_LOG wins if set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
