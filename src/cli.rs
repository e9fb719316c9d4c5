// CLI module - command-line argument parsing and handlers
//
// `carelist [flags]` browses a collection; flags override env and file config.
// `carelist config --show|--path|--reset` manages the config file.

use crate::config::{Config, VERSION};
use crate::request::parse_key_value;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// Browse paginated collections from a hospital management backend
#[derive(Parser, Debug)]
#[command(name = "carelist")]
#[command(version = VERSION)]
#[command(about = "Page through a REST collection in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub browse: BrowseArgs,
}

#[derive(Args, Debug, Default, Clone)]
pub struct BrowseArgs {
    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Collection route, e.g. /api/v1/facility/{facility}/asset/
    #[arg(long, value_name = "ROUTE")]
    pub route: Option<String>,

    /// Items per page
    #[arg(long, value_name = "N")]
    pub per_page: Option<u32>,

    /// Page to start on (1-based)
    #[arg(long, value_name = "N")]
    pub page: Option<u32>,

    /// Extra query parameter (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    /// Route placeholder value (repeatable)
    #[arg(long = "path-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub path_params: Vec<(String, String)>,

    /// Use the built-in demo registry instead of the backend
    #[arg(long)]
    pub demo: bool,

    /// Print JSON lines instead of starting the TUI
    #[arg(long)]
    pub no_tui: bool,

    /// Walk every page (implies --no-tui)
    #[arg(long)]
    pub all: bool,
}

impl BrowseArgs {
    /// Layer these flags over an env/file config
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(route) = &self.route {
            config.collection.route = route.clone();
        }
        if let Some(per_page) = self.per_page {
            config.collection.per_page = per_page;
        }
        if let Some(page) = self.page {
            config.collection.initial_page = page;
        }
        config
            .collection
            .filters
            .extend(self.filters.iter().cloned());
        config
            .collection
            .path_params
            .extend(self.path_params.iter().cloned());
        if self.demo {
            config.demo_mode = true;
        }
        if self.no_tui || self.all {
            config.enable_tui = false;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration (env > file > defaults)
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Run a management subcommand
pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Config { show, reset, path } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show();
                Ok(())
            } else if reset {
                handle_config_reset()
            } else {
                println!("Usage: carelist config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
                Ok(())
            }
        }
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path (no home directory)")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!();
    println!(
        "# token: {}",
        if config.token.is_some() {
            "set (CARELIST_TOKEN)"
        } else {
            "not set"
        }
    );
    println!("# demo mode: {}", config.demo_mode);
    println!("# tui: {}", config.enable_tui);

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Err(e) = Config::write_default(&path) {
        bail!("Error writing config {}: {}", path.display(), e);
    }

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
