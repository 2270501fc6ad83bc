use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodify::{cli, config, config::Config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with the Spotify API
    Auth,

    /// Recommend tracks for a mood and optionally create a playlist
    Mood(MoodOptions),

    /// Show your top tracks for a time interval
    TopTracks(TopTracksOptions),

    /// Search an artist by exact name and show their top tracks
    Artist(ArtistOptions),

    /// Show an artist's biography and hometown
    Bio(BioOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct MoodOptions {
    /// How you are feeling today, 0 (very sad) to 10 (very happy)
    #[clap(long)]
    pub mood: i64,

    /// Number of tracks to recommend (maximum 50)
    #[clap(long, default_value = "5")]
    pub tracks: usize,

    /// Name for the created playlist
    #[clap(long)]
    pub name: Option<String>,

    /// Create the playlist in your Spotify account
    #[clap(long)]
    pub create: bool,

    /// Recommend a single surprise track instead of a playlist
    #[clap(long)]
    pub single: bool,

    /// Write the track list to a CSV file
    #[clap(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct TopTracksOptions {
    /// Time interval: short_term, medium_term or long_term
    #[clap(long)]
    pub interval: String,

    /// Write the track list to a CSV file
    #[clap(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistOptions {
    /// Artist name (must match exactly, ignoring case and spacing)
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct BioOptions {
    /// Artist name
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    match cli.command {
        Command::Auth => cli::auth(&config).await,
        Command::Mood(opt) => {
            cli::mood_playlist(
                &config, opt.mood, opt.tracks, opt.name, opt.create, opt.single, opt.csv,
            )
            .await
        }
        Command::TopTracks(opt) => cli::top_tracks(&config, &opt.interval, opt.csv).await,
        Command::Artist(opt) => cli::artist_search(&config, &opt.name).await,
        Command::Bio(opt) => cli::artist_bio(&config, &opt.name).await,
        Command::Completions(_) => unreachable!(),
    }
}
