//! Command-line interface for the villager trades harvester.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use villager_trades_catalogue::query::{parse_queries, search};
use villager_trades_catalogue::{Catalogue, Criterion};

use crate::config::DataPaths;
use crate::display::{render, write_output, DisplayOptions};
use crate::error::Result;
use crate::harvester::{harvest_catalogue, PageSource};
use crate::settings::{DisplayMode, Settings};
use crate::store::{check_for_updates, obtain_catalogue, save_catalogue, SyncStatus};

/// Villager Trades - Browse Minecraft villager trades offline.
#[derive(Parser)]
#[command(name = "villager-trades")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory for the cache, settings and output files (default: ./data)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Read the trading page from a saved HTML file instead of the wiki
    #[arg(long, global = true)]
    pub html: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every trade, fetching and caching them on first use.
    List {
        /// Also write the listing to a file (default: data-output.txt in the data directory)
        #[arg(short, long)]
        output: Option<Option<PathBuf>>,
    },

    /// Search trades by wanted item, given item or profession.
    Search {
        #[command(flatten)]
        criterion: CriterionArgs,

        /// Search terms; item names may also be separated by commas
        #[arg(required = true)]
        queries: Vec<String>,

        /// Print matches as JSON instead of the text listing
        #[arg(long)]
        json: bool,

        /// Also write the listing to a file (default: data-output.txt in the data directory)
        #[arg(short, long)]
        output: Option<Option<PathBuf>>,
    },

    /// Fetch the trading page again and overwrite the cache.
    Refresh,

    /// Compare the cache with the trading page.
    Check {
        /// Replace the cache when it is out of sync
        #[arg(long)]
        update: bool,
    },

    /// Show or change display settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Exactly one search criterion.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct CriterionArgs {
    /// Match items the villager wants
    #[arg(short, long)]
    pub wanted: bool,

    /// Match the item the villager gives
    #[arg(short, long)]
    pub given: bool,

    /// Match profession names exactly
    #[arg(short, long)]
    pub profession: bool,
}

impl CriterionArgs {
    #[must_use]
    pub fn criterion(&self) -> Criterion {
        if self.wanted {
            Criterion::Wanted
        } else if self.given {
            Criterion::Given
        } else {
            Criterion::Profession
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current settings.
    Show,

    /// Set the display mode.
    Mode {
        #[arg(value_enum)]
        mode: DisplayMode,
    },

    /// Toggle showing the job-site block under each profession.
    ToggleJobSite,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = DataPaths::resolve(cli.data_dir.as_deref());
    let source = cli.html.map_or(PageSource::Remote, PageSource::File);
    let settings = Settings::load_or_init(&paths.settings_file())?;

    match cli.command {
        Commands::List { output } => list_command(&paths, &source, &settings, output),
        Commands::Search {
            criterion,
            queries,
            json,
            output,
        } => search_command(
            &paths,
            &source,
            &settings,
            criterion.criterion(),
            &queries,
            json,
            output,
        ),
        Commands::Refresh => refresh_command(&paths, &source, &settings),
        Commands::Check { update } => check_command(&paths, &source, &settings, update),
        Commands::Config { action } => config_command(&paths, settings, action),
    }
}

fn list_command(
    paths: &DataPaths,
    source: &PageSource,
    settings: &Settings,
    output: Option<Option<PathBuf>>,
) -> Result<()> {
    let catalogue = with_spinner("Loading trade data...", || {
        obtain_catalogue(paths, source, settings)
    })?;
    show(paths, &catalogue, settings, output.as_ref())
}

fn search_command(
    paths: &DataPaths,
    source: &PageSource,
    settings: &Settings,
    criterion: Criterion,
    raw_queries: &[String],
    json: bool,
    output: Option<Option<PathBuf>>,
) -> Result<()> {
    let queries: Vec<String> = raw_queries
        .iter()
        .flat_map(|q| parse_queries(criterion, q))
        .collect();

    let catalogue = with_spinner("Loading trade data...", || {
        obtain_catalogue(paths, source, settings)
    })?;
    let results = search(&catalogue, criterion, &queries);

    if json {
        println!("{}", results.to_json_pretty()?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", style("no results found").yellow());
        return Ok(());
    }

    show(paths, &results, settings, output.as_ref())
}

fn refresh_command(paths: &DataPaths, source: &PageSource, settings: &Settings) -> Result<()> {
    let catalogue = with_spinner("Fetching trade tables...", || {
        harvest_catalogue(source, settings)
    })?;

    let cache = paths.cache_file();
    save_catalogue(&cache, &catalogue)?;

    println!(
        "{} {} professions to {}",
        style("Saved").green().bold(),
        catalogue.len(),
        cache.display()
    );
    Ok(())
}

fn check_command(
    paths: &DataPaths,
    source: &PageSource,
    settings: &Settings,
    update: bool,
) -> Result<()> {
    let status = with_spinner("Comparing with the trading page...", || {
        check_for_updates(paths, source, settings)
    })?;

    match status {
        SyncStatus::UpToDate => {
            println!("{}", style("Local data is up to date").green());
        }
        SyncStatus::OutOfSync { fresh } => {
            println!("{}", style("Local data is out of sync with the wiki").yellow());
            if update {
                save_catalogue(&paths.cache_file(), &fresh)?;
                println!("{}", style("Data updated").green().bold());
            } else {
                println!("Run with {} to replace it", style("--update").cyan());
            }
        }
    }
    Ok(())
}

fn config_command(paths: &DataPaths, mut settings: Settings, action: ConfigAction) -> Result<()> {
    let path = paths.settings_file();

    match action {
        ConfigAction::Show => {
            print!("{}", serde_yaml_ng::to_string(&settings)?);
            return Ok(());
        }
        ConfigAction::Mode { mode } => {
            settings.display_mode = mode;
            println!("Display mode set to {}", style(mode).cyan());
        }
        ConfigAction::ToggleJobSite => {
            settings.display_job_site = !settings.display_job_site;
            let state = if settings.display_job_site { "on" } else { "off" };
            println!("Job-site display turned {}", style(state).cyan());
        }
    }

    settings.save(&path)
}

/// Print a listing, optionally writing it to a file as well.
fn show(
    paths: &DataPaths,
    catalogue: &Catalogue,
    settings: &Settings,
    output: Option<&Option<PathBuf>>,
) -> Result<()> {
    let options = DisplayOptions::from_settings(settings);
    print!("{}", render(catalogue, &options));

    if let Some(target) = output {
        let path = target.clone().unwrap_or_else(|| paths.output_file());
        write_output(&path, catalogue, &options)?;
        println!();
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }
    Ok(())
}

/// Run `work` behind a progress spinner, clearing it whatever the outcome.
fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = work();
    pb.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_search() {
        let cli = Cli::parse_from(["villager-trades", "search", "-w", "oak log", "stick"]);

        let Commands::Search {
            criterion,
            queries,
            json,
            output,
        } = cli.command
        else {
            panic!("expected search command");
        };
        assert_eq!(criterion.criterion(), Criterion::Wanted);
        assert_eq!(queries, vec!["oak log", "stick"]);
        assert!(!json);
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_search_requires_one_criterion() {
        assert!(Cli::try_parse_from(["villager-trades", "search", "stick"]).is_err());
        assert!(Cli::try_parse_from(["villager-trades", "search", "-w", "-g", "stick"]).is_err());
        assert!(Cli::try_parse_from(["villager-trades", "search", "-p"]).is_err());
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::parse_from([
            "villager-trades",
            "list",
            "--data-dir",
            "/tmp/trades",
            "--html",
            "page.html",
            "--output",
        ]);

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/trades")));
        assert_eq!(cli.html, Some(PathBuf::from("page.html")));
        let Commands::List { output } = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(output, Some(None));
    }

    #[test]
    fn test_cli_config_mode() {
        let cli = Cli::parse_from(["villager-trades", "config", "mode", "full"]);
        let Commands::Config {
            action: ConfigAction::Mode { mode },
        } = cli.command
        else {
            panic!("expected config mode command");
        };
        assert_eq!(mode, DisplayMode::Full);

        assert!(Cli::try_parse_from(["villager-trades", "config", "mode", "fancy"]).is_err());
    }
}
