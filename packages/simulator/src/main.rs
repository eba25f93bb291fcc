//! Headless session simulator.
//!
//! Plays complete sessions with scripted bots against the real engine:
//! pairs are sourced through the same pipeline the game uses, outcomes are
//! folded into the persisted stats, and per-game metrics are written out.

mod bot;
mod metrics;
mod output;
mod simulator;
mod telemetry;
mod types;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bot::MemoryBot;
use clap::Parser;
use engine::adapters::{InMemoryStore, JsonFileStore};
use engine::domain::{derive_bot_seed, derive_deck_seed, GameMode};
use engine::repos::preferences::PreferenceStore;
use engine::sourcing::{HttpTransport, PairPipeline, ProviderConfig, SessionRequest};
use engine::{EngineSettings, Preferences};
use metrics::{build_game_metrics, GameConfigMetrics, RunSummary};
use output::OutputWriter;
use simulator::Simulator;
use tracing::{debug, info, warn};
use types::{BotKind, LanguageArg, LogFormat, ModeArg, OutputFormat};

#[derive(Parser)]
#[command(name = "simulator")]
#[command(about = "Headless word/emoji memory session simulator")]
struct Args {
    /// Number of sessions to play
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Adventure walks the level catalog; custom sources pairs for a topic
    #[arg(long, default_value = "adventure")]
    mode: ModeArg,

    /// Custom topic ("test" plays the offline list without a network call)
    #[arg(long, default_value = "test")]
    topic: String,

    /// Custom pair count (6, 8, 10 or 12)
    #[arg(long, default_value = "8")]
    pairs: u8,

    #[arg(long, default_value = "en")]
    language: LanguageArg,

    #[arg(long, default_value = "perfect")]
    bot: BotKind,

    /// Recall percentage for the forgetful bot
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u8).range(0..=100))]
    memory_level: u8,

    /// Base seed for decks and bots - random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Provider config id to generate with (defaults to the active one)
    #[arg(long)]
    provider_id: Option<String>,

    /// Preference directory (overrides EMOJI_LINK_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep stats in memory only
    #[arg(long)]
    no_persist: bool,

    /// Flips after which a session is abandoned
    #[arg(long, default_value = "500")]
    max_flips: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    telemetry::init_tracing(filter, args.log_format);

    let mut settings = EngineSettings::from_env()?;
    if let Some(dir) = &args.data_dir {
        settings.data_dir = dir.clone();
    }
    let store: Box<dyn PreferenceStore> = if args.no_persist {
        Box::new(InMemoryStore::new())
    } else {
        Box::new(JsonFileStore::new(settings.data_dir.clone()))
    };
    let mut prefs = Preferences::load(store.as_ref()).await?;
    prefs.set_language(args.language.into());
    let provider = pick_provider(&prefs, args.provider_id.as_deref())?;

    let transport = HttpTransport::new(settings.http_timeout)?;
    let pipeline = PairPipeline::new(Arc::new(transport), settings.request_defaults());
    let simulator = Simulator::new(pipeline, args.max_flips);

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let memory_level = args.bot.memory_level(args.memory_level);
    if args.show_output {
        info!(
            games = args.games,
            mode = ?args.mode,
            bot = args.bot.name(),
            memory_level,
            base_seed,
            "starting simulator"
        );
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let start = Instant::now();
    let mut summary = RunSummary::default();
    let mut errors = 0;

    for game_num in 1..=args.games {
        match GameMode::from(args.mode) {
            GameMode::Adventure => prefs.start_adventure(),
            GameMode::Custom => prefs.start_custom(&args.topic, args.pairs)?,
        }
        let request = SessionRequest::from_config(&prefs.config);
        let deck_seed = derive_deck_seed(base_seed, u64::from(game_num));
        let mut bot = MemoryBot::new(
            args.bot.name(),
            memory_level,
            derive_bot_seed(base_seed, u64::from(game_num)),
        );

        let game_start = Instant::now();
        let result = match simulator
            .simulate_game(&request, &provider, deck_seed, &mut bot)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                errors += 1;
                warn!(game = game_num, code = e.code(), error = %e, "game failed");
                continue;
            }
        };
        let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;

        prefs.record_outcome(&result.outcome);
        if let Err(e) = prefs.save(store.as_ref()).await {
            warn!(game = game_num, error = %e, "failed to save preferences");
        }

        let metrics = build_game_metrics(
            game_num,
            deck_seed,
            config_metrics(&request, &args, memory_level, &provider),
            &result,
            duration_ms,
        );
        if let Err(e) = output_writer.write_game(&metrics) {
            warn!("Failed to write metrics for game {}: {}", game_num, e);
        }
        summary.add(&metrics);
        debug!(
            game = game_num,
            won = result.outcome.won,
            moves = result.outcome.move_count,
            "game completed"
        );
    }

    let elapsed = start.elapsed();
    let (games_path, csv_path) = output_writer.output_paths();
    let (games_path, csv_path) = (games_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", games_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&summary, &prefs, errors, elapsed, args.games);
    }

    Ok(())
}

fn pick_provider(
    prefs: &Preferences,
    requested: Option<&str>,
) -> Result<ProviderConfig, Box<dyn std::error::Error>> {
    let found = match requested {
        Some(id) => prefs.providers().iter().find(|p| p.id == id),
        None => prefs.active_provider(),
    };
    found
        .cloned()
        .ok_or_else(|| format!("Unknown provider config: {}", requested.unwrap_or("<active>")).into())
}

fn config_metrics(
    request: &SessionRequest,
    args: &Args,
    memory_level: u8,
    provider: &ProviderConfig,
) -> GameConfigMetrics {
    let adventure = request.mode == GameMode::Adventure;
    GameConfigMetrics {
        mode: if adventure { "adventure" } else { "custom" }.to_string(),
        language: request.language.code().to_string(),
        level: adventure.then_some(request.level),
        topic: (!adventure).then(|| request.topic.clone()),
        bot: args.bot.name().to_string(),
        memory_level,
        provider_id: provider.id.clone(),
    }
}

fn print_summary(summary: &RunSummary, prefs: &Preferences, errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", summary.games, total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if summary.games > 0 {
        println!("Win rate: {:.1}%", summary.win_rate());
        println!("Average moves: {:.2}", summary.avg_moves());
        println!(
            "Average session clock: {:.1}s",
            summary.total_elapsed as f64 / f64::from(summary.games)
        );
        if summary.fallbacks > 0 {
            println!("Offline fallbacks: {}", summary.fallbacks);
        }
    }
    println!(
        "Stats: played={} won={} unlocked_level={}",
        prefs.stats.games_played, prefs.stats.total_wins, prefs.stats.unlocked_adventure_level
    );
}
