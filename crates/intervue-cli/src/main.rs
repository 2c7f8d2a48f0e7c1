use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "intervue")]
#[command(about = "Intervue CLI - AI interview sessions, avatars and transcripts", long_about = None)]
struct Cli {
    /// Directory holding config.toml and secret.json (defaults to ~/.config/intervue)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create secret.json and config.toml templates if they are missing
    Init,
    /// List avatar replicas
    Replicas,
    /// List personas
    Personas,
    /// List past conversations
    Conversations {
        /// Case-insensitive filter on conversation name or id
        #[arg(long)]
        search: Option<String>,
    },
    /// Show transcript, analysis and timing for one conversation
    Detail {
        conversation_id: String,
        /// Also write the transcript to conversation-<id>.txt
        #[arg(long)]
        save: bool,
    },
    /// Create a persona (the sales-engineering interviewer unless a prompt is given)
    CreatePersona {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        system_prompt: Option<String>,
        #[arg(long)]
        replica: Option<String>,
    },
    /// Create a conversation and print the full record
    CreateConversation {
        #[arg(long)]
        persona: String,
        /// Defaults to the configured replica, else the first listed one
        #[arg(long)]
        replica: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Create an interview session and print its join URL
    Session {
        #[arg(long)]
        persona: String,
        #[arg(long)]
        replica: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Text interview with the AI hiring manager
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intervue=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_dir = cli.config_dir.as_deref();

    if let Commands::Init = cli.command {
        return commands::init::run(config_dir).await;
    }

    let app = commands::App::load(config_dir).await?;
    match cli.command {
        Commands::Init => {}
        Commands::Replicas => commands::remote::replicas(&app).await?,
        Commands::Personas => commands::remote::personas(&app).await?,
        Commands::Conversations { search } => {
            commands::remote::conversations(&app, search.as_deref()).await?
        }
        Commands::Detail {
            conversation_id,
            save,
        } => commands::remote::detail(&app, &conversation_id, save).await?,
        Commands::CreatePersona {
            name,
            system_prompt,
            replica,
        } => commands::remote::create_persona(&app, name, system_prompt, replica).await?,
        Commands::CreateConversation {
            persona,
            replica,
            name,
        } => commands::remote::create_conversation(&app, persona, replica, name).await?,
        Commands::Session {
            persona,
            replica,
            name,
        } => commands::remote::session(&app, persona, replica, name).await?,
        Commands::Chat => commands::chat::run(&app).await?,
    }

    Ok(())
}
