use super::App;
use anyhow::{Context, Result};
use intervue_application::InterviewUseCase;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Line-based interview loop. An empty line is skipped; EOF or `/quit` ends it.
pub async fn run(app: &App) -> Result<()> {
    let mut interview = InterviewUseCase::new(app.interview_service());

    let opening = interview.begin().await;
    println!("Interviewer: {}", opening.text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!();
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }
        if let Some(reply) = interview.submit(&line).await {
            println!("Interviewer: {}", reply.text());
        }
    }

    tracing::info!(messages = interview.transcript().len(), "Interview ended");
    Ok(())
}
