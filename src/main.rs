//! TCG Collection - card catalog search and collection inventory
//!
//! Searches a card catalog by name or set number and keeps a personal
//! collection in a CSV inventory file.

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tcg_collection::pagination::DEFAULT_PAGE_SIZE;
use tcg_collection::setup::with_inventory_extension;
use tcg_collection::{
    format_search_outcome, AppConfig, Catalog, CollectionError, CollectionResult, SearchOptions,
    Session, Variant,
};

/// Search a trading card catalog and manage your collection
#[derive(Parser, Debug)]
#[command(name = "tcg_collection")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file (legacy CSV export or JSON card list); remembered in the configuration
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Inventory file to open (created if it does not exist)
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Number of results per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    page_size: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of results and exit
    Search {
        query: String,

        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Variant whose prices are shown
        #[arg(long, default_value = "Normal", value_parser = parse_variant)]
        variant: Variant,
    },
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::parse(s).ok_or_else(|| {
        let labels: Vec<&str> = Variant::all().iter().map(|v| v.label()).collect();
        format!("unknown variant '{}', expected one of: {}", s, labels.join(", "))
    })
}

fn run(args: Args) -> CollectionResult<()> {
    let config_path = args.config.unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load_from(&config_path);

    if let Some(catalog) = args.catalog {
        if config.catalog_file.as_ref() != Some(&catalog) {
            config.catalog_file = Some(catalog);
            if let Err(e) = config.save_to(&config_path) {
                log::warn!("Failed to save configuration: {}", e);
            }
        }
    }
    let catalog_path = config.catalog_file.clone().ok_or_else(|| {
        CollectionError::Config("no catalog file; pass --catalog <FILE>".to_string())
    })?;

    let catalog = Catalog::load(&catalog_path)?;
    let options = SearchOptions {
        page_size: args.page_size,
        ..SearchOptions::default()
    };
    let mut session = Session::new(catalog, config, config_path).with_options(options);

    match args.command {
        Some(Command::Search {
            query,
            page,
            variant,
        }) => {
            let outcome = session.search(&query, page.saturating_sub(1), variant);
            print!("{}", format_search_outcome(&outcome));
            Ok(())
        }
        None => {
            match args.inventory {
                Some(path) => {
                    let with_extension = with_inventory_extension(&path);
                    if path.exists() {
                        session.open_inventory(&path)?;
                    } else if with_extension.exists() {
                        session.open_inventory(&with_extension)?;
                    } else {
                        session.create_inventory(&path)?;
                    }
                }
                None => {
                    let selection = session.setup_inventory(&mut cli::TerminalDialogs)?;
                    if selection.path().is_none() {
                        println!("No inventory open; searching only.");
                    }
                }
            }
            cli::run_menu(&mut session);
            Ok(())
        }
    }
}

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    // Examples: RUST_LOG=info, RUST_LOG=warn, RUST_LOG=tcg_collection=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting TCG Collection");

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
