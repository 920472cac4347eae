mod commands;
mod logging;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coachcal_core::config::CoachCalConfig;

#[derive(Parser)]
#[command(name = "coachcal")]
#[command(about = "Training sessions of all your groups in one calendar")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the training calendar
    Agenda {
        /// Coach whose groups to show (defaults to coach_id from config)
        #[arg(long)]
        coach: Option<String>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the coach's groups
    Groups {
        #[arg(long)]
        coach: Option<String>,
    },
    /// List, create and delete training sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Show config path and current settings
    Config,
}

#[derive(Subcommand)]
enum SessionCommands {
    /// List a group's stored sessions
    List {
        /// Group id
        #[arg(short, long)]
        group: String,
    },
    /// Create a session and show it on the calendar
    New {
        /// Group id
        #[arg(short, long)]
        group: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Start time ("18:00", "6:30 pm")
        #[arg(short, long)]
        start: String,

        /// Minutes ("90"), clock ("01:30") or "1h 30m"
        #[arg(long, default_value = "60")]
        duration: String,

        #[arg(short, long)]
        name: Option<String>,

        /// Gym or venue
        #[arg(long)]
        venue: Option<String>,

        #[arg(long)]
        coach: Option<String>,
    },
    /// Delete a session
    Delete {
        /// Session id
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CoachCalConfig::load()?;
    logging::init(cli.verbose, config.log_level.as_deref())?;

    match cli.command {
        Commands::Agenda { coach, json } => {
            let coach = resolve_coach(coach, &config)?;
            commands::agenda::run(&config, &coach, json).await
        }
        Commands::Groups { coach } => {
            let coach = resolve_coach(coach, &config)?;
            commands::groups::run(&config, &coach).await
        }
        Commands::Sessions { command } => match command {
            SessionCommands::List { group } => commands::sessions::list(&config, &group).await,
            SessionCommands::New {
                group,
                date,
                start,
                duration,
                name,
                venue,
                coach,
            } => {
                let coach = resolve_coach(coach, &config)?;
                let input = commands::sessions::new_session_input(group, date, start, &duration, name, venue)?;
                commands::sessions::create(&config, &coach, input).await
            }
            SessionCommands::Delete { id } => commands::sessions::delete(&config, &id).await,
        },
        Commands::Config => commands::config::run(&config),
    }
}

fn resolve_coach(arg: Option<String>, config: &CoachCalConfig) -> Result<String> {
    match arg.or_else(|| config.coach_id.clone()) {
        Some(coach) => Ok(coach),
        None => anyhow::bail!(
            "No coach selected.\n\n\
            Pass one with:\n  \
            coachcal agenda --coach <id>\n\n\
            or set a default in the config file:\n  \
            coach_id = \"<id>\""
        ),
    }
}
