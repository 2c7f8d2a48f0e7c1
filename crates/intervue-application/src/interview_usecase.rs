//! Text interview flow on top of the chat relay.

use intervue_core::chat::{ChatReply, ChatTurn};
use intervue_core::message::{InterviewMessage, Transcript};
use intervue_interaction::InterviewService;

/// Owns the visible transcript of one interview and feeds it to the relay.
pub struct InterviewUseCase {
    service: InterviewService,
    transcript: Transcript,
}

impl InterviewUseCase {
    pub fn new(service: InterviewService) -> Self {
        Self {
            service,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Asks the interviewer for its opening line and records it.
    pub async fn begin(&mut self) -> ChatReply {
        let reply = self.service.start_interview(None).await;
        self.transcript.push(InterviewMessage::assistant(reply.text()));
        reply
    }

    /// Records the candidate's answer, relays it with everything said so far,
    /// and records the interviewer's reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn submit(&mut self, input: &str) -> Option<ChatReply> {
        if input.trim().is_empty() {
            return None;
        }

        let history: Vec<ChatTurn> = self.transcript.messages().iter().map(ChatTurn::from).collect();
        self.transcript.push(InterviewMessage::user(input));

        let reply = self.service.send_message(&history, input).await;
        if reply.is_degraded() {
            tracing::warn!(turns = history.len(), "Interview reply degraded to placeholder");
        }
        self.transcript.push(InterviewMessage::assistant(reply.text()));
        Some(reply)
    }
}
