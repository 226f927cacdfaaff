// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use devpost_scout::cli::{self, filter_cmd, probe_cmd, scrape_cmd, search_cmd, SiteArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "devpost-scout",
    about = "Devpost Scout: find AI agent projects among hackathon winners",
    version,
    after_help = "Run 'devpost-scout <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape several queries, save all projects and the AI agent subset
    Scrape {
        /// Search queries (default: ai, machine learning, artificial
        /// intelligence, chatbot, automation, bot)
        queries: Vec<String>,
        /// Highest page requested per query
        #[arg(long, default_value_t = 100)]
        max_pages: u32,
        /// Pause between page requests in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
        /// Where to write every unique project
        #[arg(long, default_value = scrape_cmd::DEFAULT_ALL_OUT)]
        all_out: String,
        /// Where to write the AI agent projects
        #[arg(long, default_value = scrape_cmd::DEFAULT_AGENTS_OUT)]
        agents_out: String,
        /// Classify with the full keyword list instead of the core one
        #[arg(long)]
        full_keywords: bool,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Run a single search query and save the results
    Search {
        /// Search query
        #[arg(default_value = search_cmd::DEFAULT_QUERY)]
        query: String,
        /// Highest page requested
        #[arg(long, default_value_t = 1)]
        max_pages: u32,
        /// Pause between page requests in milliseconds
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,
        /// Output file
        #[arg(long, default_value = search_cmd::DEFAULT_OUT)]
        out: String,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Keep only the AI agent projects of a saved file
    Filter {
        /// Saved project file to read
        #[arg(default_value = filter_cmd::DEFAULT_INPUT)]
        input: String,
        /// File to write the matches to
        #[arg(default_value = filter_cmd::DEFAULT_OUTPUT)]
        output: String,
    },
    /// Fetch one search page and report which selectors match
    Probe {
        /// Search query
        #[arg(default_value = probe_cmd::DEFAULT_QUERY)]
        query: String,
        /// File to dump the raw page into
        #[arg(long, default_value = probe_cmd::DEFAULT_DUMP)]
        dump: String,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

/// Logs go to stderr; `--json` switches them to JSON lines.
fn init_tracing(verbose: bool, json: bool) -> Result<()> {
    let directive = if verbose {
        "devpost_scout=debug"
    } else {
        "devpost_scout=warn"
    };
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::output::init(cli.json, cli.quiet, cli.verbose, cli.no_color);
    init_tracing(cli.verbose, cli.json)?;

    let result = match cli.command {
        Commands::Scrape {
            queries,
            max_pages,
            delay_ms,
            all_out,
            agents_out,
            full_keywords,
            site,
        } => {
            let opts = scrape_cmd::ScrapeOptions {
                queries,
                max_pages,
                delay_ms,
                all_out,
                agents_out,
                full_keywords,
            };
            scrape_cmd::run(&opts, &site).await
        }
        Commands::Search {
            query,
            max_pages,
            delay_ms,
            out,
            site,
        } => search_cmd::run(&query, max_pages, delay_ms, &out, &site).await,
        Commands::Filter { input, output } => filter_cmd::run(&input, &output).await,
        Commands::Probe { query, dump, site } => probe_cmd::run(&query, &dump, &site).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "devpost-scout", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else if !cli::output::is_quiet() {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
