/// Cadence - terminal music player
use anyhow::Context;
use cadence_cli::{
    config::CliConfig,
    favorites::JsonFileFavoritesStore,
    media::RodioMedia,
    stream::CatalogFetcher,
    ui::{self, Command},
};
use cadence_client::{fetch_tracks_or_empty, CatalogClient};
use cadence_playback::{Favorites, MediaResource, TransportController};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TICK_MS: u64 = 200;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence terminal music player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./cadence.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog server URL
    #[arg(short, long, global = true, env = "CADENCE_SERVER_URL")]
    server: Option<String>,

    /// Favorites file
    #[arg(long, global = true)]
    favorites: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player (default)
    Play {
        /// Show the admin affordance
        #[arg(long)]
        admin: bool,
    },
    /// Print the track catalog
    List,
    /// Print favorite track ids
    Favorites,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the player
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info,cadence_playback=info,cadence_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server.url = server;
    }
    if let Some(path) = cli.favorites {
        config.favorites.path = path;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Play { admin: false }) {
        Commands::Play { admin } => play(config, admin),
        Commands::List => list(&config),
        Commands::Favorites => favorites(&config),
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn list(config: &CliConfig) -> anyhow::Result<()> {
    let client = CatalogClient::new(config.server.clone())?;
    let tracks = runtime()?.block_on(client.list_tracks())?;

    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{:>3}. {} - {}  ({})",
            i + 1,
            track.title,
            track.artist,
            client.stream_url(track)
        );
    }
    Ok(())
}

fn favorites(config: &CliConfig) -> anyhow::Result<()> {
    let favorites = Favorites::load(Box::new(JsonFileFavoritesStore::new(
        &config.favorites.path,
    )));

    let mut ids: Vec<_> = favorites.ids().iter().collect();
    ids.sort();
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

fn play(config: CliConfig, admin: bool) -> anyhow::Result<()> {
    tracing::info!("Starting Cadence");
    tracing::info!("Server: {}", config.server.url);

    let client = CatalogClient::new(config.server.clone())?;
    let runtime = runtime()?;

    let tracks = runtime.block_on(fetch_tracks_or_empty(&client));

    let mut player_config = config.player.clone();
    if player_config.stream_base_url.is_empty() {
        player_config.stream_base_url = client.url().to_string();
    }

    let media = RodioMedia::new(CatalogFetcher::new(client, runtime))?;
    let favorites = Favorites::load(Box::new(JsonFileFavoritesStore::new(
        &config.favorites.path,
    )));

    let mut controller = TransportController::new(player_config, media).with_favorites(favorites);
    controller.set_privileged(admin);
    controller.load(tracks);

    println!("{}", ui::render_tracks(&controller));
    println!("Type 'help' for commands.");
    print_events(&mut controller);

    run(&mut controller, spawn_stdin_reader());

    tracing::info!("Bye");
    Ok(())
}

/// Read stdin lines on a helper thread
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}

fn run<M: MediaResource>(controller: &mut TransportController<M>, input: mpsc::Receiver<String>) {
    let tick = Duration::from_millis(TICK_MS);

    loop {
        match input.recv_timeout(tick) {
            Ok(line) => match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    if let Some(output) = ui::apply(controller, command) {
                        println!("{}", output);
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{}", e),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        tick_media(controller);
        print_events(controller);
    }
}

/// Poll the media clock and end-of-media
fn tick_media<M: MediaResource>(controller: &mut TransportController<M>) {
    if !controller.is_playing() {
        return;
    }

    controller.on_time_update();

    if controller.media().has_ended() {
        controller.on_track_end();
    }
}

fn print_events<M: MediaResource>(controller: &mut TransportController<M>) {
    let events = controller.drain_events();
    if events.is_empty() {
        return;
    }

    for event in &events {
        if let Some(line) = ui::describe_event(controller, event) {
            println!("{}", line);
        }
    }
    io::stdout().flush().ok();
}
