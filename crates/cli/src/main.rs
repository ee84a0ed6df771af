//! `coldcase` -- browse the cold-case catalog and play episodes from the
//! terminal.
//!
//! Data comes from the backend API when reachable, then from the static
//! JSON exports, then from built-in sample data. See [`config::AppConfig`]
//! for environment variables.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coldcase_core::card::{CaseCard, CaseDetail};
use coldcase_core::catalog::Catalog;
use coldcase_core::facets::FilterOptions;
use coldcase_core::playback::{format_clock, SPEED_STEPS};
use coldcase_core::session::SessionMarkers;
use coldcase_core::synthetic::SyntheticCases;
use coldcase_player::{CueSynchronizer, MediaClock, PlaybackControls, PlayerDriver, SceneBus, SceneEvent, SimulatedClock};
use coldcase_sources::{
    load_cases, load_episode, load_stats, ApiClient, FileMarkerStore, LoadedCases, StaticCases,
    StaticEpisode,
};

use config::{AppConfig, LogFormat};

/// Fallback episode length when neither the audio metadata nor the cues
/// give one.
const DEFAULT_EPISODE_SECS: f64 = 60.0;

#[derive(Debug, Parser)]
#[command(name = "coldcase", version, about = "Browse cold-case records and play episodes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of cases, best documented first.
    Browse(BrowseArgs),
    /// Show headline statistics.
    Stats,
    /// Show the full record for one case.
    Show {
        id: String,
        /// Skip the graphic-content warning.
        #[arg(long)]
        no_warning: bool,
    },
    /// Play an episode on a simulated clock, printing scene changes.
    Play(PlayArgs),
}

#[derive(Debug, Args)]
struct BrowseArgs {
    /// Case-insensitive text search over title, city, state and summary.
    #[arg(long)]
    search: Option<String>,
    /// Two-letter state code.
    #[arg(long)]
    state: Option<String>,
    /// homicide, missing_person or unidentified.
    #[arg(long = "type")]
    case_type: Option<String>,
    /// A year (`1985`) or decade (`1980s`).
    #[arg(long)]
    year: Option<String>,
    /// Include solved and cold cases.
    #[arg(long)]
    include_solved: bool,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Print the available filter values instead of cases.
    #[arg(long)]
    options: bool,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Hide the new-episodes banner from now on.
    #[arg(long)]
    dismiss_banner: bool,
}

#[derive(Debug, Args)]
struct PlayArgs {
    /// Playback speed: 1, 1.25, 1.5, 1.75 or 2.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,
    /// Stop at this position in seconds.
    #[arg(long)]
    until: Option<f64>,
    /// How often the clock reports its position, in milliseconds.
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(config.log_format);

    match cli.command {
        Command::Browse(args) => browse(&config, args).await,
        Command::Stats => stats(&config).await,
        Command::Show { id, no_warning } => show(&config, &id, no_warning).await,
        Command::Play(args) => play(&config, args).await,
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coldcase=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn api_client(config: &AppConfig) -> anyhow::Result<ApiClient> {
    let sources = &config.sources;
    ApiClient::new(&sources.api_base_url, sources.case_fetch_limit, sources.request_timeout)
        .context("Failed to build HTTP client")
}

async fn fetch_cases(config: &AppConfig, api: &ApiClient) -> LoadedCases {
    let static_cases = StaticCases::new(&config.sources.cases_fallback_path);
    let generator = SyntheticCases::new(config.sources.synthetic_seed);
    load_cases(&[api, &static_cases], &generator).await
}

// ---------------------------------------------------------------------------
// browse / stats / show
// ---------------------------------------------------------------------------

async fn browse(config: &AppConfig, args: BrowseArgs) -> anyhow::Result<()> {
    let api = api_client(config)?;
    let loaded = fetch_cases(config, &api).await;
    let mut catalog = Catalog::new(loaded.records);

    if args.options {
        print_options(catalog.options(), args.json)?;
        return Ok(());
    }

    catalog.set_unsolved_only(!args.include_solved);
    if let Some(search) = args.search {
        catalog.set_search(search);
    }
    catalog.set_state(args.state);
    catalog.set_case_type(args.case_type);
    if let Some(year) = args.year.as_deref() {
        catalog.set_year(year)?;
    }
    catalog.go_to_page(args.page);

    let page = catalog.current_page();
    let cards = page.cards();

    if args.json {
        let body = serde_json::json!({
            "page": page.window.page,
            "total_pages": page.window.total_pages,
            "total_cases": page.window.total_items,
            "cases": cards,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let mut markers = SessionMarkers::new(FileMarkerStore::open(&config.sources.markers_path));
    if args.dismiss_banner {
        markers.dismiss_banner();
    }
    if markers.banner_visible() {
        println!("New episodes are out. Run `coldcase play` to listen. (--dismiss-banner hides this)");
    }

    println!(
        "{} cases | page {} of {} | source: {}",
        page.window.total_items,
        page.window.page,
        page.window.total_pages,
        loaded.origin.label(),
    );
    for card in &cards {
        print_card(card);
    }
    Ok(())
}

fn print_options(options: &FilterOptions, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(options)?);
        return Ok(());
    }
    println!("States: {}", options.states.join(", "));
    let years: Vec<String> = options.years.iter().map(ToString::to_string).collect();
    println!("Years: {}", years.join(", "));
    Ok(())
}

fn print_card(card: &CaseCard) {
    println!();
    println!("[{}] {}  ({})", card.quality, card.title, card.id);
    println!("    {} | {} | {} | {}", card.location, card.date, card.case_type, card.status);
    println!("    evidence: {}  media: {}", card.evidence_count, card.media_count);
    if let Some(excerpt) = &card.excerpt {
        println!("    {excerpt}");
    }
}

async fn stats(config: &AppConfig) -> anyhow::Result<()> {
    let api = api_client(config)?;
    let loaded = fetch_cases(config, &api).await;
    let stats = load_stats(&api, &loaded.records).await;

    println!("Total cases:     {}", stats.stats.total_cases);
    println!("Unsolved:        {}", stats.stats.unsolved_cases);
    println!("Missing persons: {}", stats.stats.missing_persons);
    println!("States covered:  {}", stats.stats.states_covered);
    println!("(source: {})", stats.origin.label());
    Ok(())
}

async fn show(config: &AppConfig, id: &str, no_warning: bool) -> anyhow::Result<()> {
    let api = api_client(config)?;
    let catalog = Catalog::new(fetch_cases(config, &api).await.records);
    let Some(detail) = catalog.detail(id) else {
        bail!("No case with id '{id}'");
    };

    let mut markers = SessionMarkers::new(FileMarkerStore::open(&config.sources.markers_path));
    if no_warning {
        markers.dismiss_content_warning();
    }
    if markers.content_warning_required() {
        println!("Content warning: case records may describe violent crimes and contain graphic details.");
        markers.dismiss_content_warning();
    }

    print_detail(&detail);
    Ok(())
}

fn print_detail(detail: &CaseDetail) {
    print_card(&detail.card);
    println!("    quality score: {}", detail.quality_score);

    if let Some(summary) = &detail.summary {
        println!("\nSummary\n  {summary}");
    }
    if let Some(victim) = &detail.victim {
        println!("\nVictim");
        for (label, value) in victim {
            println!("  {label}: {value}");
        }
    }
    if let Some(evidence) = &detail.evidence {
        println!("\nEvidence");
        for item in evidence {
            println!("  - [{}] {}", item.evidence_type, item.description);
        }
    }
    if let Some(timeline) = &detail.timeline {
        println!("\nTimeline");
        for entry in timeline {
            println!("  {}  {}", entry.date.as_deref().unwrap_or("----"), entry.event);
        }
    }
    if let Some(media) = &detail.media {
        println!("\nMedia");
        for item in media {
            println!("  {} {}", item.url, item.caption.as_deref().unwrap_or(""));
        }
    }
    if let Some(analysis) = &detail.analysis {
        println!("\nAnalysis");
        for (label, text) in analysis {
            println!("  {label}: {text}");
        }
    }
    if let Some(url) = &detail.source_url {
        println!("\nSource: {url}");
    }
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

async fn play(config: &AppConfig, args: PlayArgs) -> anyhow::Result<()> {
    if !SPEED_STEPS.contains(&args.speed) {
        bail!("Speed must be one of {SPEED_STEPS:?}");
    }

    let api = api_client(config)?;
    let static_episode = StaticEpisode::new(&config.sources.episode_fallback_path);
    let loaded = load_episode(&[&api, &static_episode]).await;
    let episode = loaded.episode;

    let full_length = episode.duration_hint().unwrap_or(DEFAULT_EPISODE_SECS);
    let length = args.until.map_or(full_length, |until| until.clamp(0.0, full_length));
    println!("{} ({}, audio: {})", episode.case.title, format_clock(length), episode.audio_url);

    let bus = Arc::new(SceneBus::default());
    let printer = tokio::spawn(print_scene_events(bus.subscribe()));

    let (positions_tx, positions_rx) = mpsc::channel(64);
    let cancel = CancellationToken::new();
    let driver = PlayerDriver::new(CueSynchronizer::new(&episode), Arc::clone(&bus));
    let driver_handle = tokio::spawn(driver.run(positions_rx, cancel.clone()));

    let mut controls = PlaybackControls::new(SimulatedClock::new(length));
    while controls.speed() != args.speed {
        controls.cycle_speed();
    }
    if !controls.toggle_play() {
        cancel.cancel();
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(args.tick_ms.max(1)));
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                cancel.cancel();
                break;
            }
            _ = ticker.tick() => {
                let position = controls.clock().position();
                if positions_tx.send(position).await.is_err() {
                    break;
                }
                if controls.clock().is_finished() {
                    break;
                }
            }
        }
    }

    drop(positions_tx);
    driver_handle.await.context("Player driver panicked")?;
    drop(bus);
    printer.await.context("Event printer panicked")?;
    Ok(())
}

async fn print_scene_events(mut rx: broadcast::Receiver<SceneEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => print_scene_event(&event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Scene printer fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn print_scene_event(event: &SceneEvent) {
    match event {
        SceneEvent::CueActivated { time, .. } => println!("\n[{}]", format_clock(*time)),
        SceneEvent::SpeakerChanged { speaker } => print!("{}: ", speaker.display_name()),
        SceneEvent::DialogueChanged { text } => println!("{text}"),
        SceneEvent::LocationShown { location, date } => match date {
            Some(date) => println!("  >> {location}, {date}"),
            None => println!("  >> {location}"),
        },
        SceneEvent::EvidenceShown { text } => println!("  [evidence] {text}"),
        SceneEvent::EvidenceHidden => println!("  [evidence hidden]"),
        SceneEvent::ImageShown { path, .. } => println!("  [image] {path}"),
        SceneEvent::CaptionShown { text } => println!("  [photo] {text}"),
        SceneEvent::MoodChanged { .. }
        | SceneEvent::LocationHidden
        | SceneEvent::ImageFading { .. }
        | SceneEvent::CaptionHidden => {}
    }
}
