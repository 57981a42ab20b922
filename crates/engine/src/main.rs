//! Connection Cards - terminal entry point.

use std::sync::Arc;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use connection_cards_domain::{GameMode, GameRound, Player, PlayerId, RequestTopic};
use connection_cards_engine::infrastructure::app_settings::AppConfig;
use connection_cards_engine::infrastructure::clock::{SystemClock, SystemRandom};
use connection_cards_engine::infrastructure::storage::FileStorage;
use connection_cards_engine::App;

const HELP: &str = "\
  [enter]         answered, next card
  w               play a wildcard
  + / -           nudge the energy level
  r <topic> [..]  request a topic, with an optional question of your own
  f               serve the oldest topic request
  s               session stats
  m               pick another mode
  c               clear the session
  q               quit";

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root, the binary may be run from `crates/engine`.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "connection_cards_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        storage = %config.storage_path.display(),
        players = config.player_names.len(),
        mood = %config.session.mood(),
        "Starting Connection Cards"
    );

    let storage = Arc::new(FileStorage::open(config.storage_path.clone()));
    let app = App::with_energy_timer(
        storage,
        Arc::new(SystemClock::new()),
        Arc::new(SystemRandom::new()),
        config.energy_tick,
    );

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let result = play(&app, &config, &mut input).await;

    app.shutdown();
    tracing::info!("Goodbye");
    result
}

async fn play(app: &App, config: &AppConfig, input: &mut Input) -> anyhow::Result<()> {
    let players = Player::seat_all(config.player_names.iter());

    'modes: loop {
        let Some(mode) = choose_mode(input).await? else {
            return Ok(());
        };
        let mut round = app.start_round(mode, players.clone(), &config.session).await?;
        if round.is_repeat_deck() {
            println!("You've seen every {mode} card this session, dealing them again.");
        }

        let mut shown_at = Instant::now();
        loop {
            let Some(question) = round.current_question() else {
                println!("That's the whole deck!");
                continue 'modes;
            };
            let energy = app.energy.snapshot().await;
            println!();
            println!(
                "[{}/{}] {} (energy {} {:?})",
                round.position() + 1,
                round.deck_len(),
                round.current_player().name,
                energy.level,
                energy.trend
            );
            println!("  {}", question.text());

            let Some(line) = input.next_line().await? else {
                return Ok(());
            };
            let line = line.trim();
            match line {
                "" => {
                    app.complete_turn(&mut round, Some(shown_at.elapsed())).await;
                    shown_at = Instant::now();
                }
                "w" => play_wildcard(app, &mut round).await,
                "+" => {
                    app.adjust_energy(1).await;
                }
                "-" => {
                    app.adjust_energy(-1).await;
                }
                "f" => serve_request(app).await,
                "s" => print_stats(app).await,
                "m" => continue 'modes,
                "c" => {
                    let session_id = app.clear_session().await;
                    println!("Session cleared ({session_id}).");
                }
                "q" => return Ok(()),
                "?" | "h" => println!("{HELP}"),
                other if other.starts_with("r ") => {
                    add_request(app, round.current_player().id, &other[2..]).await;
                }
                other => println!("Unknown command '{other}', '?' for help."),
            }
        }
    }
}

async fn choose_mode(input: &mut Input) -> anyhow::Result<Option<GameMode>> {
    loop {
        println!();
        for (i, mode) in GameMode::all().iter().enumerate() {
            println!("  {}. {} - {}", i + 1, mode, mode.description());
        }
        println!("Pick a mode (q to quit):");

        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim();
        if line == "q" {
            return Ok(None);
        }

        let by_number = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| GameMode::all().get(i).copied());
        match by_number.map(Ok).unwrap_or_else(|| line.parse::<GameMode>()) {
            Ok(mode) => return Ok(Some(mode)),
            Err(e) => println!("{e}"),
        }
    }
}

async fn play_wildcard(app: &App, round: &mut GameRound) {
    let player = round.current_player().id;
    match app.play_wildcard(round).await {
        Ok(_) => println!("Wildcard! {} left.", round.wildcards_left(player)),
        Err(e) => println!("{e}"),
    }
}

async fn add_request(app: &App, player: PlayerId, args: &str) {
    let (topic, prompt) = match args.trim().split_once(' ') {
        Some((topic, prompt)) => (topic, Some(prompt.trim().to_string())),
        None => (args.trim(), None),
    };
    match topic.parse::<RequestTopic>() {
        Ok(topic) => {
            app.requests.add_request(player, topic, prompt).await;
            println!("Request for {} noted.", topic.display_name());
        }
        Err(e) => println!("{e}"),
    }
}

async fn serve_request(app: &App) {
    match app.fulfill_next_request().await {
        Some((request, questions)) => {
            println!("For {}:", request.topic.display_name());
            for question in questions {
                println!("  - {}", question.text());
            }
        }
        None => println!("No open requests."),
    }
}

async fn print_stats(app: &App) {
    let stats = app.session_stats().await;
    println!(
        "Session {}: {} of {} questions used",
        stats.session_id, stats.used, stats.total
    );
    for mode in &stats.mode_stats {
        println!("  {}: {} left of {}", mode.mode, mode.remaining, mode.total);
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
