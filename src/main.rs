use anyhow::Context;
use clap::Parser;
use property237::config::Config;
use property237::filter::{PropertyTab, SearchFilters};
use property237::language::system_locale;
use property237::models::ListingType;
use property237::render::render_page;
use property237::sources::HttpPropertySource;
use property237::state::ViewMode;
use property237::store::{FileStore, KeyValueStore, MemoryStore};
use property237::{LoadOutcome, SearchView};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Search Property237 listings from the terminal
#[derive(Parser)]
#[command(name = "property237", version, about)]
struct Cli {
    /// City, neighbourhood or title text
    #[arg(short, long, default_value = "")]
    query: String,

    /// Results layout
    #[arg(long, value_enum, default_value_t = ViewArg::List)]
    view: ViewArg,

    /// Only residential or only commercial listings
    #[arg(long, value_enum)]
    tab: Option<TabArg>,

    /// Only rentals or only sales
    #[arg(long, value_enum)]
    listing: Option<ListingArg>,

    /// Minimum price in XAF
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price in XAF
    #[arg(long)]
    max_price: Option<f64>,

    /// Minimum number of bedrooms
    #[arg(long)]
    beds: Option<u32>,

    /// Minimum number of bathrooms
    #[arg(long)]
    baths: Option<u32>,

    /// Switch between English and French and remember the choice
    #[arg(long)]
    toggle_language: bool,

    /// Print matching listings as JSON instead of the page
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ViewArg {
    List,
    Map,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TabArg {
    Residential,
    Commercial,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ListingArg {
    Rent,
    Sale,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    info!("🏠 Property237 - listings search");

    let source = HttpPropertySource::new(&config.api_url, config.timeout)
        .context("Failed to set up listings source")?;

    let store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => {
            info!("Preferences file: {}", path.display());
            Arc::new(FileStore::new(path))
        }
        None => Arc::new(MemoryStore::new()),
    };

    let locale = system_locale();
    let mut view = SearchView::mount(
        Arc::new(source),
        store,
        locale.as_deref(),
        config.fallback_mode,
    );

    match view.loaded().await {
        Some(LoadOutcome::Fetched { accepted }) => info!("✅ {} listings from the API", accepted),
        Some(LoadOutcome::Fallback { reason }) => info!("Showing sample listings ({})", reason),
        Some(LoadOutcome::Cancelled) | None => {}
    }

    if cli.toggle_language {
        let language = view.toggle_language().await;
        info!("Language switched to {}", language);
    }

    view.set_query(cli.query).await;
    view.set_view_mode(match cli.view {
        ViewArg::List => ViewMode::List,
        ViewArg::Map => ViewMode::Map,
    })
    .await;
    view.set_tab(cli.tab.map(|tab| match tab {
        TabArg::Residential => PropertyTab::Residential,
        TabArg::Commercial => PropertyTab::Commercial,
    }))
    .await;
    view.set_filters(SearchFilters {
        listing_type: cli.listing.map(|l| match l {
            ListingArg::Rent => ListingType::Rent,
            ListingArg::Sale => ListingType::Sale,
        }),
        min_price: cli.min_price,
        max_price: cli.max_price,
        min_bedrooms: cli.beds,
        min_bathrooms: cli.baths,
    })
    .await;

    if cli.json {
        let matches = view.filtered().await;
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print!("{}", render_page(&view.snapshot().await));
    }

    let _ = view.unmount();
    Ok(())
}
