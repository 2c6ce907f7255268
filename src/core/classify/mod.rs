//! Response classification.
//!
//! The backend answers every question with a single string. What that string
//! means is decided by its prefix, in a fixed order:
//!
//! 1. `data:image...` is a base64 data URI and becomes [`Classified::Image`].
//! 2. `{` or `[` is JSON. A row/column reading becomes [`Classified::Table`];
//!    anything else, including text that fails to parse, becomes
//!    [`Classified::Json`]. This branch never falls through to text.
//! 3. Everything else is markdown text.
//!
//! The stored turn always keeps the original string so it can be decoded
//! identically when the transcript is rendered again.

pub mod image;
pub mod table;

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::core::message::{Turn, TurnKind};

pub use image::{decode_data_uri, ImageFormat, ImagePayload};
pub use table::{cell_text, Table};

pub const IMAGE_PREFIX: &str = "data:image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The data URI has no comma separating header and payload.
    MissingImagePayload,
    /// The data URI payload is not valid standard base64.
    InvalidBase64(String),
    /// Stored content tagged as a table no longer has a tabular reading.
    NotTabular,
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::MissingImagePayload => {
                write!(f, "image data URI has no payload separator")
            }
            ClassifyError::InvalidBase64(reason) => {
                write!(f, "image payload is not valid base64: {reason}")
            }
            ClassifyError::NotTabular => write!(f, "content has no row/column layout"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// JSON content that is shown as a tree rather than a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonView {
    /// Parsed, but without a row/column reading.
    Tree(Value),
    /// Looked like JSON but failed to parse; shown verbatim.
    Raw(String),
}

/// A backend answer decoded into what the page should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Text(String),
    Image(ImagePayload),
    Table(Table),
    Json(JsonView),
}

impl Classified {
    pub fn kind(&self) -> TurnKind {
        match self {
            Classified::Text(_) => TurnKind::Text,
            Classified::Image(_) => TurnKind::Image,
            Classified::Table(_) => TurnKind::Table,
            Classified::Json(_) => TurnKind::Json,
        }
    }
}

fn looks_like_json(raw: &str) -> bool {
    raw.starts_with('{') || raw.starts_with('[')
}

fn classify_json(raw: &str) -> Classified {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => match Table::from_value(&value) {
            Some(table) => Classified::Table(table),
            None => Classified::Json(JsonView::Tree(value)),
        },
        Err(err) => {
            debug!(error = %err, "JSON-looking payload failed to parse; showing raw");
            Classified::Json(JsonView::Raw(raw.to_string()))
        }
    }
}

/// Decide what a raw backend payload is and decode it.
///
/// Only a malformed image data URI is an error; JSON failures degrade to
/// [`JsonView::Raw`].
pub fn classify(raw: &str) -> Result<Classified, ClassifyError> {
    let classified = if raw.starts_with(IMAGE_PREFIX) {
        Classified::Image(decode_data_uri(raw)?)
    } else if looks_like_json(raw) {
        classify_json(raw)
    } else {
        Classified::Text(raw.to_string())
    };

    debug!(
        kind = classified.kind().as_str(),
        len = raw.len(),
        "classified backend payload"
    );
    Ok(classified)
}

/// Classify a payload and build the bot turn that records it.
pub fn classify_turn(raw: &str) -> Result<(Classified, Turn), ClassifyError> {
    let classified = classify(raw)?;
    let turn = Turn::bot(classified.kind(), raw);
    Ok((classified, turn))
}

/// Decode a stored turn according to its recorded kind.
pub fn decode_turn(turn: &Turn) -> Result<Classified, ClassifyError> {
    match turn.kind {
        TurnKind::Text => Ok(Classified::Text(turn.content.clone())),
        TurnKind::Image => decode_data_uri(&turn.content).map(Classified::Image),
        TurnKind::Table => serde_json::from_str::<Value>(&turn.content)
            .ok()
            .and_then(|value| Table::from_value(&value))
            .map(Classified::Table)
            .ok_or(ClassifyError::NotTabular),
        TurnKind::Json => Ok(Classified::Json(
            match serde_json::from_str::<Value>(&turn.content) {
                Ok(value) => JsonView::Tree(value),
                Err(_) => JsonView::Raw(turn.content.clone()),
            },
        )),
    }
}
