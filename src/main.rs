use std::sync::Arc;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotfill::{
    cli::{self, PlayerCommand},
    config, error,
    types::PkceToken,
};
use tokio::sync::Mutex;

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
    /// Authorize with Spotify API
    Auth,

    /// Forget the stored Spotify session
    Logout,

    /// Fill a time box with tracks matching a search
    Build(BuildOptions),

    /// Control playback on a Spotify Connect device
    Player(PlayerOptions),

    /// Show session, account and playback status
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct BuildOptions {
    /// Free-text search term
    #[clap(long, short)]
    pub query: String,

    /// Total listening time in minutes
    #[clap(long, short, allow_hyphen_values = true)]
    pub minutes: String,

    /// Genre hint; can be repeated
    #[clap(long = "genre", action = ArgAction::Append, num_args = 1)]
    pub genres: Vec<String>,

    /// Maximum number of search results to choose from (1-50)
    #[clap(long)]
    pub limit: Option<u32>,

    /// Start playback right away
    #[clap(long)]
    pub play: bool,

    /// Device id or name to play on
    #[clap(long)]
    pub device: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayerOptions {
    /// Device id or name to control
    #[clap(long, global = true)]
    pub device: Option<String>,

    #[command(subcommand)]
    pub command: PlayerSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlayerSubcommand {
    /// Toggle between play and pause
    PlayPause,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Previous,
    /// Seek within the current track (seconds or m:ss)
    Seek { position: String },
    /// Set the volume in percent
    Volume {
        #[clap(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    /// List available devices
    Devices,
    /// Follow playback changes
    Watch {
        /// How long to watch
        #[clap(long, default_value_t = 60)]
        seconds: u64,
    },
}

impl From<PlayerSubcommand> for PlayerCommand {
    fn from(sub: PlayerSubcommand) -> Self {
        match sub {
            PlayerSubcommand::PlayPause => PlayerCommand::PlayPause,
            PlayerSubcommand::Next => PlayerCommand::Next,
            PlayerSubcommand::Previous => PlayerCommand::Previous,
            PlayerSubcommand::Seek { position } => PlayerCommand::Seek(position),
            PlayerSubcommand::Volume { percent } => PlayerCommand::Volume(percent),
            PlayerSubcommand::Devices => PlayerCommand::Devices,
            PlayerSubcommand::Watch { seconds } => PlayerCommand::Watch { seconds },
        }
    }
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

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Logout => cli::logout().await,
        Command::Build(opt) => {
            cli::playlist(
                opt.query,
                opt.minutes,
                opt.genres,
                opt.limit,
                opt.play,
                opt.device,
            )
            .await
        }
        Command::Player(opt) => cli::player(opt.command.into(), opt.device).await,
        Command::Status => cli::status().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
