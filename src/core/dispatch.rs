//! One question, one answer.
//!
//! [`Dispatcher::submit`] records the user's question, asks the backend,
//! classifies the answer, and records exactly one bot turn whatever happens,
//! so every user turn in a transcript is followed by a bot turn.

use std::sync::Arc;

use tracing::warn;

use crate::api::{Backend, BackendReply};
use crate::core::classify::{classify_turn, Classified};
use crate::core::message::Turn;
use crate::core::session::Session;
use crate::utils::logging::TranscriptLog;

/// Stored in place of the bot answer when the exchange fails. The failure
/// detail is shown once and never persisted.
pub const GENERIC_FAILURE_TURN: &str = "An error occurred while processing your request.";

/// Message shown above the transcript for a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The backend rejected the question with this message.
    Backend(String),
    /// Sending, decoding, or interpreting the exchange failed.
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Backend(message) => message.clone(),
            Notice::Failure(detail) => format!("An error occurred: {detail}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// The decoded answer when the exchange succeeded.
    pub answer: Option<Classified>,
    pub notice: Option<Notice>,
}

#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    transcript: TranscriptLog,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn Backend>, transcript: TranscriptLog) -> Self {
        Self {
            backend,
            transcript,
        }
    }

    pub async fn submit(&self, session: &mut Session, question: &str) -> SubmitOutcome {
        self.record(session, Turn::user(question));

        let (turn, outcome) = match self.backend.ask(question).await {
            Ok(BackendReply::Error(message)) => {
                warn!(%message, "backend rejected question");
                (
                    Turn::bot_text(message.clone()),
                    SubmitOutcome {
                        answer: None,
                        notice: Some(Notice::Backend(message)),
                    },
                )
            }
            Ok(BackendReply::Result(raw)) => match classify_turn(&raw) {
                Ok((classified, turn)) => (
                    turn,
                    SubmitOutcome {
                        answer: Some(classified),
                        notice: None,
                    },
                ),
                Err(err) => Self::failure(err.to_string()),
            },
            Err(err) => Self::failure(err.to_string()),
        };

        self.record(session, turn);
        outcome
    }

    fn failure(detail: String) -> (Turn, SubmitOutcome) {
        warn!(%detail, "question could not be answered");
        (
            Turn::bot_text(GENERIC_FAILURE_TURN),
            SubmitOutcome {
                answer: None,
                notice: Some(Notice::Failure(detail)),
            },
        )
    }

    fn record(&self, session: &mut Session, turn: Turn) {
        if let Err(e) = self.transcript.log_turn(&turn) {
            warn!(error = %e, "failed to write transcript log");
        }
        session.append_turn(turn);
    }
}
