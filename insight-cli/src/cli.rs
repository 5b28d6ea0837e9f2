use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insight_core::{
    Config, PreferenceStore, SearchState, ThemePreference,
    provider::default_provider,
    theme::{FileStore, MemoryStore},
};

use crate::card;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "insight", version, about = "Weather Insight CLI")]
pub struct Cli {
    /// Verbosity level (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current weather for a city and exit.
    Show {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub fn init_tracing(&self) {
        let filter = match self.verbose {
            0 => "warn",
            1 => "insight_core=debug,insight_cli=debug",
            _ => "trace",
        };

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(filter))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city).await,
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.api_key = Some(key.trim().to_string());
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let provider = default_provider();
    let theme = load_theme();
    let mut state = SearchState::new();

    state.search(provider.as_ref(), city).await;
    card::render(&state, theme.is_dark());

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let provider = default_provider();
    let mut theme = load_theme();
    let mut state = SearchState::new();

    println!("Weather Insight");
    println!("Enter a city to search, :theme to toggle dark mode, :quit to exit.");

    loop {
        // Poll-based stand-in for a scheme-change subscription; ignored
        // once the user has toggled explicitly.
        theme.on_system_change(system_prefers_dark());

        let input = match Text::new("City:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        };

        match input.trim() {
            ":quit" | ":q" => break,
            ":theme" | ":t" => {
                let dark = theme.toggle();
                println!("Theme: {}", if dark { "dark" } else { "light" });
            }
            _ => {
                state.search(provider.as_ref(), &input).await;
                card::render(&state, theme.is_dark());
            }
        }
    }

    Ok(())
}

/// Theme state backed by the platform preference file, degrading to a
/// process-local store when no config directory exists.
fn load_theme() -> ThemePreference {
    let store: Box<dyn PreferenceStore> = match FileStore::open_default() {
        Ok(store) => Box::new(store),
        Err(_) => Box::new(MemoryStore::new()),
    };

    ThemePreference::load(store, system_prefers_dark())
}

/// Best-effort system color-scheme detection for terminals.
///
/// `COLORFGBG` is `<fg>;<bg>`; a background of 0-6 or 8 means a dark
/// terminal. Absent or unparsable means light.
fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| {
            value
                .rsplit(';')
                .next()
                .and_then(|bg| bg.trim().parse::<u8>().ok())
        })
        .is_some_and(|bg| bg < 7 || bg == 8)
}
