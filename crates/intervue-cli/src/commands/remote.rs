use super::App;
use anyhow::{bail, Context, Result};
use intervue_application::{ConversationBrowser, SelectionOutcome};
use intervue_core::remote::{ConversationDetail, CreatePersonaRequest};
use intervue_core::transcript::{DecodedTranscript, EMPTY_DIALOGUE_NOTICE};
use intervue_interaction::ConversationOptions;
use std::sync::Arc;

pub async fn replicas(app: &App) -> Result<()> {
    let replicas = app.tavus().list_replicas().await.context("Failed to list replicas")?;
    if replicas.is_empty() {
        println!("No replicas found.");
    }
    for replica in replicas {
        println!(
            "{}  {}  {}",
            replica.replica_id,
            replica.replica_name,
            replica.status.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub async fn personas(app: &App) -> Result<()> {
    let personas = app.tavus().list_personas().await.context("Failed to list personas")?;
    if personas.is_empty() {
        println!("No personas found.");
    }
    for persona in personas {
        println!(
            "{}  {}  replica={}",
            persona.persona_id,
            persona.persona_name,
            persona.replica_id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn browser(app: &App) -> ConversationBrowser {
    ConversationBrowser::new(
        Arc::new(app.tavus()),
        Arc::new(app.conversation_details()),
    )
}

pub async fn conversations(app: &App, search: Option<&str>) -> Result<()> {
    let browser = browser(app);
    browser.refresh().await.context("Failed to load conversations")?;

    let matches = browser.search(search.unwrap_or_default()).await;
    if matches.is_empty() {
        println!("No conversations found.");
    }
    for conversation in matches {
        println!(
            "{}  {}  {}  {}",
            conversation.conversation_id,
            conversation.display_name(),
            conversation.status.as_deref().unwrap_or("-"),
            conversation.created_at.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub async fn detail(app: &App, conversation_id: &str, save: bool) -> Result<()> {
    match browser(app).select(conversation_id).await {
        SelectionOutcome::Loaded(detail) => {
            print_detail(&detail);
            if save {
                save_transcript(&detail).await?;
            }
            Ok(())
        }
        SelectionOutcome::Failed(message) => bail!(message),
        SelectionOutcome::Superseded => Ok(()),
    }
}

fn print_detail(detail: &ConversationDetail) {
    println!("Conversation: {}", detail.conversation_id);
    if let Some(name) = detail.participant_label() {
        println!("Participant:  {name}");
    }
    println!("Duration:     {}", detail.duration_label());
    if let Some(reason) = detail.shutdown_reason_label() {
        println!("Ended:        {reason}");
    }
    for (label, value) in detail.timestamp_labels() {
        println!("{label}: {value}");
    }

    println!();
    println!("Transcript");
    match detail.decoded_transcript() {
        None => println!("  (none)"),
        Some(DecodedTranscript::Raw(text)) => println!("{text}"),
        Some(transcript) => {
            let dialogue = transcript.dialogue();
            if dialogue.is_empty() {
                println!("  {EMPTY_DIALOGUE_NOTICE}");
            }
            for entry in dialogue {
                println!("  {}: {}", entry.speaker_label(), entry.content_or_placeholder());
            }
        }
    }

    if let Some(analysis) = detail.analysis_text() {
        println!();
        println!("Analysis");
        println!("{analysis}");
    }
}

/// Writes the transcript as delivered to `conversation-<id>.txt` in the
/// working directory.
async fn save_transcript(detail: &ConversationDetail) -> Result<()> {
    let Some(transcript) = detail.transcript_export() else {
        bail!("Conversation {} has no transcript to save", detail.conversation_id);
    };
    let path = detail.transcript_file_name();
    tokio::fs::write(&path, transcript)
        .await
        .with_context(|| format!("Failed to write {path}"))?;
    println!();
    println!("Transcript saved to {path}");
    Ok(())
}

pub async fn create_persona(
    app: &App,
    name: Option<String>,
    system_prompt: Option<String>,
    replica: Option<String>,
) -> Result<()> {
    let tavus = app.tavus();
    let persona = match system_prompt {
        Some(system_prompt) => {
            let request = CreatePersonaRequest {
                pipeline_mode: "full".to_string(),
                system_prompt,
                persona_name: name,
                default_replica_id: replica,
            };
            tavus.create_persona(&request).await
        }
        None => tavus.create_sales_engineer_persona().await,
    }
    .context("Failed to create persona")?;

    println!("{}", serde_json::to_string_pretty(&persona)?);
    Ok(())
}

async fn conversation_options(
    app: &App,
    persona: String,
    replica: Option<String>,
    name: Option<String>,
) -> Result<ConversationOptions> {
    let replica_id = match replica {
        Some(id) => id,
        None => app
            .tavus()
            .resolve_replica_id()
            .await
            .context("Failed to resolve a replica")?,
    };
    let options = ConversationOptions::new(replica_id, persona);
    Ok(match name {
        Some(name) => options.with_name(name),
        None => options,
    })
}

pub async fn create_conversation(
    app: &App,
    persona: String,
    replica: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let options = conversation_options(app, persona, replica, name).await?;
    let conversation = app
        .tavus()
        .create_conversation(options)
        .await
        .context("Failed to create conversation")?;
    println!("{}", serde_json::to_string_pretty(&conversation)?);
    Ok(())
}

pub async fn session(
    app: &App,
    persona: String,
    replica: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let options = conversation_options(app, persona, replica, name).await?;
    let url = app
        .tavus()
        .create_interview_session(options)
        .await
        .context("Failed to create interview session")?;
    println!("{url}");
    Ok(())
}
