use anyhow::{Context, Result};
use api_client::ApiClient;
use catalog::{AwardEntry, HistoryEntry, Priority, Review, WatchStatus, WatchlistEntry};
use clap::{Parser, Subcommand};
use colored::Colorize;
use host::{EndpointSource, HostConfig, ListOrchestrator, ListSource, StaticSource};
use pages::{
    AwardCriteria, AwardSort, AwardsPage, HistoryCriteria, HistoryPage, HistorySort,
    ReviewCriteria, ReviewSort, ReviewsPage, WatchlistCriteria, WatchlistPage, WatchlistSort,
};
use pipeline::{Bounds, Criterion, PageConfig, SortKey, TriState};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// reel-lists - browse a critic's list pages from the terminal
#[derive(Parser)]
#[command(name = "reel-lists")]
#[command(about = "Filter, sort and page through reviews, history, watchlist and awards", long_about = None)]
struct Cli {
    /// JSON fixture file or backend base URL (defaults to REEL_API_URL)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Free-text search across the page's text fields
    #[arg(short, long, global = true)]
    query: Option<String>,

    /// Number of pages to reveal ("load more" is pressed pages-1 times)
    #[arg(long, default_value = "1", global = true)]
    pages: usize,

    /// Print the page view as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reviews written by the critic
    Reviews {
        /// Only this star rating (1-5)
        #[arg(long)]
        rating: Option<u8>,

        /// any, yes or no
        #[arg(long, default_value = "any")]
        verified: TriState,

        /// any, yes or no
        #[arg(long, default_value = "any")]
        spoilers: TriState,

        /// newest, oldest, highest_rated, lowest_rated, most_helpful, most_comments
        #[arg(long, default_value = "newest")]
        sort: ReviewSort,
    },

    /// Watch history
    History {
        #[arg(long)]
        rating: Option<u8>,

        /// Earliest release year
        #[arg(long)]
        min_year: Option<i32>,

        /// Latest release year
        #[arg(long)]
        max_year: Option<i32>,

        /// any, yes or no
        #[arg(long, default_value = "any")]
        rewatch: TriState,

        /// newest, oldest, title_asc, title_desc, highest_rated, lowest_rated
        #[arg(long, default_value = "newest")]
        sort: HistorySort,
    },

    /// Watchlist
    Watchlist {
        /// plan_to_watch, watching, watched or dropped
        #[arg(long)]
        status: Option<WatchStatus>,

        /// high, medium or low
        #[arg(long)]
        priority: Option<Priority>,

        #[arg(long)]
        min_year: Option<i32>,

        #[arg(long)]
        max_year: Option<i32>,

        /// date_added, oldest, title_asc, title_desc, priority, release_year
        #[arg(long, default_value = "date_added")]
        sort: WatchlistSort,
    },

    /// Award nominations and wins
    Awards {
        /// Repeat to select several ceremonies
        #[arg(long)]
        ceremony: Vec<String>,

        /// Repeat to select several categories
        #[arg(long)]
        category: Vec<String>,

        #[arg(long)]
        min_year: Option<i32>,

        #[arg(long)]
        max_year: Option<i32>,

        /// any, yes or no
        #[arg(long, default_value = "any")]
        won: TriState,

        /// year_desc, year_asc, title_asc, ceremony
        #[arg(long, default_value = "year_desc")]
        sort: AwardSort,
    },
}

/// Everything a page run needs besides the page's own criteria and sort.
struct RunOptions {
    source: Option<String>,
    query: String,
    pages: usize,
    json: bool,
    config: HostConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = RunOptions {
        source: cli.source,
        query: cli.query.unwrap_or_default(),
        pages: cli.pages.max(1),
        json: cli.json,
        config: HostConfig::from_env(),
    };

    // Dispatch to appropriate page
    match cli.command {
        Commands::Reviews {
            rating,
            verified,
            spoilers,
            sort,
        } => {
            let criteria = ReviewCriteria {
                rating: Criterion::from(rating),
                verified,
                spoilers,
            };
            run_page::<ReviewsPage>(&options, criteria, sort, render_review).await?
        }
        Commands::History {
            rating,
            min_year,
            max_year,
            rewatch,
            sort,
        } => {
            let criteria = HistoryCriteria {
                rating: Criterion::from(rating),
                year: Bounds::new(min_year, max_year),
                rewatch,
            };
            run_page::<HistoryPage>(&options, criteria, sort, render_history).await?
        }
        Commands::Watchlist {
            status,
            priority,
            min_year,
            max_year,
            sort,
        } => {
            let criteria = WatchlistCriteria {
                status: Criterion::from(status),
                priority: Criterion::from(priority),
                year: Bounds::new(min_year, max_year),
            };
            run_page::<WatchlistPage>(&options, criteria, sort, render_watchlist).await?
        }
        Commands::Awards {
            ceremony,
            category,
            min_year,
            max_year,
            won,
            sort,
        } => {
            let criteria = AwardCriteria {
                ceremonies: ceremony.into_iter().collect(),
                categories: category.into_iter().collect(),
                year: Bounds::new(min_year, max_year),
                won,
            };
            run_page::<AwardsPage>(&options, criteria, sort, render_award).await?
        }
    }

    Ok(())
}

/// Resolve `--source` into a list source for page `P`.
///
/// Anything starting with `http://` or `https://` is a backend base URL;
/// anything else is a JSON fixture file. Without `--source` the backend
/// from `REEL_API_URL` is used.
fn build_source<P>(options: &RunOptions) -> Result<Arc<dyn ListSource<P::Item>>>
where
    P: PageConfig,
    P::Item: DeserializeOwned,
{
    let base_url = match options.source.as_deref() {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
        Some(path) => {
            let items: Vec<P::Item> = catalog::parser::load_items_from_file(Path::new(path))
                .with_context(|| format!("Failed to load {} fixture from {}", P::NAME, path))?;
            info!("Loaded {} {} items from {}", items.len(), P::NAME, path);
            let source: Arc<dyn ListSource<P::Item>> = Arc::new(StaticSource::new(items));
            return Ok(source);
        }
        None => options.config.base_url.as_str(),
    };

    let client = ApiClient::new(base_url, options.config.request_timeout)
        .context("Failed to create API client")?;
    let source: Arc<dyn ListSource<P::Item>> = Arc::new(EndpointSource::for_page::<P>(client));
    Ok(source)
}

/// Fetch one page, reveal the requested number of pages and print them.
async fn run_page<P>(
    options: &RunOptions,
    criteria: P::Criteria,
    sort: P::Sort,
    render: fn(&P::Item) -> String,
) -> Result<()>
where
    P: PageConfig,
    P::Item: DeserializeOwned + Serialize,
{
    let start = Instant::now();
    let source = build_source::<P>(options)?;
    let orchestrator = ListOrchestrator::<P>::new(source, &options.config);

    orchestrator.set_criteria(criteria).await;
    orchestrator.set_sort(sort).await;
    orchestrator.set_query(options.query.as_str()).await;
    orchestrator.refresh().await?;

    for _ in 1..options.pages {
        match orchestrator.load_more().await {
            Some(added) if added.is_empty() => break,
            Some(_) => {}
            None => break,
        }
    }

    let view = orchestrator.view().await;
    orchestrator.shutdown().await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{} ({} of {}, sorted by {}):",
            P::NAME,
            view.items.len(),
            view.total,
            sort.label()
        )
        .bold()
        .blue()
    );
    for (rank, item) in view.items.iter().enumerate() {
        println!("{:>3}. {}", (rank + 1).to_string().green(), render(item));
    }
    if view.items.is_empty() {
        println!("{}", "  nothing matches the current filters".dimmed());
    }
    if view.has_more {
        println!(
            "{} {} more, use --pages {} to see them",
            "…".cyan(),
            view.total - view.items.len(),
            view.page + 1
        );
    }
    info!("Rendered {} in {:.2?}", P::NAME, start.elapsed());
    Ok(())
}

fn title(movie_title: &Option<String>) -> &str {
    movie_title.as_deref().unwrap_or("Untitled")
}

fn stars(rating: Option<u8>) -> String {
    match rating {
        Some(n) => "★".repeat(n.min(5) as usize).yellow().to_string(),
        None => "unrated".dimmed().to_string(),
    }
}

fn render_review(review: &Review) -> String {
    let author = review
        .author
        .as_ref()
        .and_then(|a| a.display_name.as_deref().or(a.username.as_deref()))
        .unwrap_or("anonymous");
    let mut line = format!(
        "{} {} by {} [{} helpful, {} comments]",
        title(&review.movie_title).bold(),
        stars(review.rating),
        author,
        review.helpful_count.unwrap_or(0),
        review.comment_count.unwrap_or(0)
    );
    if review.is_verified == Some(true) {
        line.push_str(&format!(" {}", "verified".green()));
    }
    if review.contains_spoilers == Some(true) {
        line.push_str(&format!(" {}", "spoilers".red()));
    }
    line
}

fn render_history(entry: &HistoryEntry) -> String {
    let watched = entry
        .watched_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    let mut line = format!(
        "{} ({}) {} watched {}",
        title(&entry.movie_title).bold(),
        entry.release_year.map_or("?".to_string(), |y| y.to_string()),
        stars(entry.rating),
        watched
    );
    if entry.is_rewatch == Some(true) {
        line.push_str(&format!(" {}", "rewatch".cyan()));
    }
    line
}

fn render_watchlist(entry: &WatchlistEntry) -> String {
    let priority = match entry.priority {
        Some(Priority::High) => "high".red().to_string(),
        Some(Priority::Medium) => "medium".yellow().to_string(),
        Some(Priority::Low) => "low".normal().to_string(),
        None => "-".dimmed().to_string(),
    };
    let status = entry
        .status
        .map_or("-".to_string(), |s| s.to_string());
    let mut line = format!(
        "{} ({}) [{}] {}",
        title(&entry.movie_title).bold(),
        entry.release_year.map_or("?".to_string(), |y| y.to_string()),
        priority,
        status
    );
    if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
        line.push_str(&format!(" - {}", notes.dimmed()));
    }
    line
}

fn render_award(entry: &AwardEntry) -> String {
    let result = if entry.won == Some(true) {
        "won".green().bold().to_string()
    } else {
        "nominated".normal().to_string()
    };
    format!(
        "{} {} {}: {} ({}) {}",
        entry.year.map_or("????".to_string(), |y| y.to_string()),
        entry.ceremony.as_deref().unwrap_or("-"),
        entry.category.as_deref().unwrap_or("-"),
        title(&entry.movie_title).bold(),
        entry.nominee.as_deref().unwrap_or("-"),
        result
    )
}
