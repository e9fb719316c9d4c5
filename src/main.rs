// carelist binary
//
// Resolves config (file < env < flags), wires a fetcher into one paginated
// list and either hands it to the TUI or prints pages as JSON lines.

use anyhow::{bail, Context, Result};
use carelist::cli::Cli;
use carelist::config::Config;
use carelist::demo::DemoFetcher;
use carelist::logging::{self, LogBuffer};
use carelist::paginated::{ListOptions, PaginatedList};
use carelist::request::{ApiRoute, HttpFetcher, PageFetcher};
use carelist::tui;
use clap::Parser;
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands never touch the network
    if let Some(command) = cli.command {
        return carelist::cli::handle_command(command);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.browse.apply(&mut config);

    // In TUI mode logs go to the buffer so they don't garble the display.
    // The guard flushes the file writer on exit and must outlive the app.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(
        &config.logging,
        config.enable_tui.then_some(&log_buffer),
    )?;

    tracing::info!(
        route = %config.collection.route,
        per_page = config.collection.per_page,
        demo = config.demo_mode,
        "Starting carelist v{}",
        carelist::config::VERSION
    );

    let list = build_list(&config)?;

    if config.enable_tui {
        tui::run_tui(list, &config, log_buffer).await
    } else {
        run_headless(list, cli.browse.all).await
    }
}

fn build_fetcher(config: &Config) -> Result<Arc<dyn PageFetcher<Value>>> {
    if config.demo_mode {
        let fetcher = DemoFetcher::new();
        tracing::info!(records = fetcher.record_count(), "Serving built-in demo registry");
        return Ok(Arc::new(fetcher));
    }

    let mut fetcher = HttpFetcher::<Value>::new(&config.api_url, config.timeout())?;
    if let Some(token) = &config.token {
        fetcher = fetcher.with_bearer_token(token);
    }
    Ok(Arc::new(fetcher))
}

fn build_list(config: &Config) -> Result<PaginatedList<Value>> {
    let collection = &config.collection;
    let options = ListOptions {
        per_page: Some(collection.per_page),
        initial_page: Some(collection.initial_page),
        path_params: collection.path_params.clone(),
        query_params: collection.query_params(),
        headers: collection.header_pairs(),
        signal: None,
        silent: collection.silent,
    };

    PaginatedList::new(
        ApiRoute::new(collection.route.clone()),
        build_fetcher(config)?,
        options,
    )
    .with_context(|| format!("Invalid paging options for {}", collection.route))
}

/// Print the current page (or every page with `all`) as JSON lines on stdout
async fn run_headless(mut list: PaginatedList<Value>, all: bool) -> Result<()> {
    list.mount();
    list.settle().await;

    loop {
        let ctx = list.context();
        if let Some(err) = ctx.error {
            bail!("Failed to fetch page {}: {}", ctx.current_page, err);
        }

        for item in ctx.items {
            let line = serde_json::to_string(item).context("Failed to serialize item")?;
            println!("{}", line);
        }

        let total_pages = ctx.total_pages();
        let current_page = ctx.current_page;
        eprintln!(
            "page {}/{} ({} of {} items)",
            current_page,
            total_pages,
            ctx.items.len(),
            ctx.total_count_or_zero()
        );

        if !all || current_page >= total_pages {
            return Ok(());
        }

        list.set_page(current_page + 1)?;
        list.settle().await;
    }
}
