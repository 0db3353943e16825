use anyhow::{anyhow, Context, Result};
use catalog::{Category, NewVideo, PreferenceSet, VideoRecord};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::Rng;
use server::{FeedConfig, FeedItem, FeedSelection, FeedSelector, FeedSession};
use sources::{FeedMode, FeedRequest, JsonPreferenceStore, LocalCatalog, PreferenceStore, ViewerContext};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// ReelFeed - short-form video feed
#[derive(Parser)]
#[command(name = "reelfeed")]
#[command(about = "Browse, curate and like a short-form video feed", long_about = None)]
struct Cli {
    /// Path to the video catalog (JSON array of videos)
    #[arg(short, long, default_value = "data/videos.json")]
    catalog: PathBuf,

    /// Path to the viewer preference file
    #[arg(short, long, default_value = "data/preferences.json")]
    prefs: PathBuf,

    /// Viewer whose preferences and uploads are used
    #[arg(short, long, default_value = "viewer")]
    viewer: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the feed
    Feed {
        /// recommended, recent or shuffle
        #[arg(long, default_value = "recommended")]
        mode: FeedMode,

        /// Browse one category instead of the mode-driven feed
        #[arg(long)]
        category: Option<Category>,

        /// Number of videos to print
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Show why each video is in the feed
        #[arg(long)]
        explain: bool,
    },

    /// Step through the feed interactively
    Watch {
        #[arg(long, default_value = "recommended")]
        mode: FeedMode,

        #[arg(long)]
        category: Option<Category>,
    },

    /// List categories with the viewer's preferred and blocked markers
    Categories,

    /// Toggle a category as preferred
    Prefer { category: Category },

    /// Toggle a category as blocked
    Block { category: Category },

    /// Toggle parental mode
    Parental,

    /// Like a video, or remove a like with --unlike
    Like {
        video_id: String,

        #[arg(long)]
        unlike: bool,
    },

    /// Add a video to the catalog
    Upload {
        #[arg(long)]
        title: String,

        /// Link to an .mp4 file
        #[arg(long)]
        url: String,

        #[arg(long)]
        category: Category,

        #[arg(long, default_value = "")]
        description: String,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,

        /// Mark the video safe for parental mode
        #[arg(long)]
        age_appropriate: bool,
    },

    /// Show a creator's uploads and totals
    Profile {
        /// Creator to show (defaults to the viewer)
        #[arg(long)]
        creator: Option<String>,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Run benchmark to test selection performance
    Benchmark {
        /// Number of selections to run
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of selections in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
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

    let start = Instant::now();
    let catalog = LocalCatalog::open(&cli.catalog).context("Failed to open video catalog")?;
    info!(
        "Loaded {} videos from {} in {:?}",
        catalog.len().await,
        cli.catalog.display(),
        start.elapsed()
    );

    let config = FeedConfig::from_env().context("Invalid feed configuration")?;
    let selector = FeedSelector::new(Arc::new(catalog.clone()), config);
    let store: Arc<dyn PreferenceStore> = Arc::new(JsonPreferenceStore::new(&cli.prefs));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Feed {
            mode,
            category,
            limit,
            explain,
        } => {
            let mut session = FeedSession::open(&cli.viewer, selector, store).await;
            handle_feed(&mut session, request(mode, category), limit, explain).await
        }
        Commands::Watch { mode, category } => {
            let mut session = FeedSession::open(&cli.viewer, selector, store).await;
            handle_watch(&mut session, request(mode, category)).await
        }
        Commands::Categories => {
            let session = FeedSession::open(&cli.viewer, selector, store).await;
            print_categories(session.preferences());
            Ok(())
        }
        Commands::Prefer { category } => {
            let mut session = FeedSession::open(&cli.viewer, selector, store).await;
            let preferred = session.toggle_preferred(category).await?;
            print_toggle(category.label(), "preferred", preferred, session.preferences());
            Ok(())
        }
        Commands::Block { category } => {
            let mut session = FeedSession::open(&cli.viewer, selector, store).await;
            let blocked = session.toggle_blocked(category).await?;
            print_toggle(category.label(), "blocked", blocked, session.preferences());
            Ok(())
        }
        Commands::Parental => {
            let mut session = FeedSession::open(&cli.viewer, selector, store).await;
            let enabled = session.toggle_parental_mode().await?;
            print_toggle("Parental mode", "enabled", enabled, session.preferences());
            Ok(())
        }
        Commands::Like { video_id, unlike } => handle_like(&catalog, &selector, &video_id, !unlike).await,
        Commands::Upload {
            title,
            url,
            category,
            description,
            tags,
            age_appropriate,
        } => {
            let new_video = NewVideo {
                title,
                video_url: url,
                category,
                description,
                tags,
                age_appropriate,
                created_by: cli.viewer.clone(),
            };
            handle_upload(&catalog, new_video).await
        }
        Commands::Profile { creator, limit } => {
            let creator = creator.unwrap_or_else(|| cli.viewer.clone());
            handle_profile(&catalog, &creator, limit).await
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(selector, store, &cli.viewer, requests, concurrent).await,
    }
}

fn request(mode: FeedMode, category: Option<Category>) -> FeedRequest {
    FeedRequest {
        explicit_category: category,
        mode,
    }
}

/// Handle the 'feed' command
async fn handle_feed(session: &mut FeedSession, request: FeedRequest, limit: usize, explain: bool) -> Result<()> {
    session.reload(request).await;
    let selection = session.selection();
    if let Some(error) = selection.error() {
        return Err(anyhow!("Feed failed to load: {}", error));
    }

    print_header(session, request);
    if selection.is_empty() {
        println!("{}", "No videos match your current filters.".yellow());
        return Ok(());
    }

    for (rank, item) in selection.items().iter().take(limit).enumerate() {
        print_item(rank + 1, item, explain);
    }
    if selection.len() > limit {
        println!("{}", format!("... and {} more", selection.len() - limit).dimmed());
    }
    Ok(())
}

/// Handle the 'watch' command
async fn handle_watch(session: &mut FeedSession, mut request: FeedRequest) -> Result<()> {
    session.reload(request).await;
    print_header(session, request);
    print_watch_help();
    show_current(session.selection());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("n");
        let argument = parts.next();

        match command {
            "n" | "next" => {
                if !session.selection_mut().next() {
                    println!("{}", "End of feed.".dimmed());
                }
            }
            "p" | "prev" => {
                if !session.selection_mut().previous() {
                    println!("{}", "Already at the first video.".dimmed());
                }
            }
            "l" | "like" => match session.toggle_like_current().await {
                Ok(Some((liked, likes))) => {
                    let verb = if liked { "Liked" } else { "Unliked" };
                    println!("{} ({} likes)", verb.magenta(), likes);
                }
                Ok(None) => println!("{}", "Nothing to like.".dimmed()),
                Err(e) => println!("{} {:#}", "Like failed:".red(), e),
            },
            "m" | "mode" => match argument.map(str::parse::<FeedMode>) {
                Some(Ok(mode)) => {
                    request = FeedRequest::new(mode);
                    session.reload(request).await;
                    print_header(session, request);
                }
                Some(Err(e)) => println!("{}", e.red()),
                None => println!("Usage: m <recommended|recent|shuffle>"),
            },
            "c" | "category" => {
                match argument.map(str::parse::<Category>) {
                    Some(Ok(category)) => request.explicit_category = Some(category),
                    Some(Err(e)) => {
                        println!("{}", e.to_string().red());
                        continue;
                    }
                    None => request.explicit_category = None,
                }
                session.reload(request).await;
                print_header(session, request);
            }
            "r" | "refresh" => {
                session.refresh().await;
            }
            "h" | "help" => {
                print_watch_help();
                continue;
            }
            "q" | "quit" => break,
            other => {
                println!("Unknown command '{}' (h for help)", other);
                continue;
            }
        }
        show_current(session.selection());
    }
    Ok(())
}

/// Handle the 'like' command
async fn handle_like(catalog: &LocalCatalog, selector: &FeedSelector, video_id: &str, liked: bool) -> Result<()> {
    let video = catalog
        .get_video(video_id)
        .await
        .ok_or_else(|| anyhow!("Video {} not found", video_id))?;

    let likes = selector.toggle_like(video_id, liked).await?;
    let verb = if liked { "Liked" } else { "Unliked" };
    println!("{} {} '{}' ({} likes)", "✓".green(), verb, video.title, likes);
    Ok(())
}

/// Handle the 'upload' command
async fn handle_upload(catalog: &LocalCatalog, new_video: NewVideo) -> Result<()> {
    let video = catalog.create_video(new_video).await.context("Upload rejected")?;
    println!("{} Uploaded '{}' as {}", "✓".green(), video.title, video.id.bold());
    println!(
        "  {} · {} · {}",
        video.category.label(),
        if video.age_appropriate { "all ages" } else { "not for parental mode" },
        if video.tags.is_empty() {
            "no tags".to_string()
        } else {
            video.tags.join(", ")
        }
    );
    Ok(())
}

/// Handle the 'profile' command
async fn handle_profile(catalog: &LocalCatalog, creator: &str, limit: usize) -> Result<()> {
    let stats = catalog.creator_stats(creator).await;
    println!("{}", format!("Creator: {}", creator).bold().blue());
    println!("{}Videos: {}", "• ".green(), stats.videos);
    println!("{}Total views: {}", "• ".green(), format_count(stats.total_views));
    println!("{}Total likes: {}", "• ".green(), format_count(stats.total_likes));

    let videos = catalog.list_by_creator(creator, limit).await;
    if videos.is_empty() {
        println!("{}", "No uploads yet.".dimmed());
        return Ok(());
    }
    println!("Uploads:");
    for video in &videos {
        print_video_line(video);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    selector: FeedSelector,
    store: Arc<dyn PreferenceStore>,
    viewer: &str,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be at least 1"));
    }
    let preferences = match store.load(viewer).await {
        Ok(preferences) => preferences,
        Err(e) => {
            warn!("Benchmarking viewer {} with default preferences: {:#}", viewer, e);
            PreferenceSet::default()
        }
    };

    // Random mode or category per request
    let contexts: Vec<ViewerContext> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| {
                let request = match rng.random_range(0..4) {
                    0 => FeedRequest::for_category(Category::ALL[rng.random_range(0..Category::ALL.len())]),
                    n => FeedRequest::new(FeedMode::ALL[n - 1]),
                };
                ViewerContext::new(viewer)
                    .with_preferences(preferences.clone())
                    .with_request(request)
            })
            .collect()
    };

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for context in contexts {
        let selector = selector.clone();
        let permits = permits.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            selector.select(&context).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    Ok(())
}

fn print_header(session: &FeedSession, request: FeedRequest) {
    let title = match request.explicit_category {
        Some(category) => format!("{} videos", category.label()),
        None => format!("Feed ({})", request.mode),
    };
    println!("{}", title.bold().blue());
    println!("{}", session.preferences().summary().dimmed());
}

fn print_watch_help() {
    println!(
        "{}",
        "n next · p previous · l like · m <mode> · c [category] · r refresh · q quit".dimmed()
    );
}

fn show_current(selection: &FeedSelection) {
    if let Some(error) = selection.error() {
        println!("{} {}", "Feed failed to load:".red(), error);
        println!("{}", "Press r to try again.".dimmed());
        return;
    }
    match selection.current() {
        Some(item) => {
            println!(
                "{}",
                format!("[{}/{}]", selection.current_index() + 1, selection.len()).dimmed()
            );
            print_item(selection.current_index() + 1, item, true);
            if !item.video.description.is_empty() {
                println!("   {}", item.video.description);
            }
        }
        None => println!("{}", "No videos match your current filters.".yellow()),
    }
}

fn print_item(rank: usize, item: &FeedItem, explain: bool) {
    print!("{}. ", rank.to_string().green());
    print_video_line(&item.video);
    if explain {
        println!("   {}", item.explanation.italic());
    }
}

fn print_video_line(video: &VideoRecord) {
    let safety = if video.age_appropriate { "" } else { " [mature]" };
    println!(
        "{} [{}] {} · {} views · {} likes{}  {}",
        video.title.bold(),
        video.category.label().cyan(),
        format_duration(video.duration_secs),
        format_count(video.views),
        format_count(video.likes),
        safety.red(),
        video.id.dimmed()
    );
}

fn print_categories(preferences: &PreferenceSet) {
    println!("{}", "Categories:".bold().blue());
    for category in Category::ALL {
        let marker = if preferences.is_preferred(category) {
            "★".yellow()
        } else if preferences.is_blocked(category) {
            "✗".red()
        } else {
            " ".normal()
        };
        println!(
            "{} {:<16} {:<18} {}",
            marker,
            category.key(),
            category.label(),
            category.description().dimmed()
        );
    }
    println!("{}", preferences.summary().dimmed());
}

fn print_toggle(name: &str, state: &str, on: bool, preferences: &PreferenceSet) {
    let status = if on {
        state.green()
    } else {
        format!("no longer {}", state).yellow()
    };
    println!("{} {} is {}", "✓".green(), name, status);
    println!("{}", preferences.summary().dimmed());
}

fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// 1234 -> "1.2K", 2500000 -> "2.5M"
fn format_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format!("{:.1}K", n as f64 / 1_000.0),
        _ => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}
