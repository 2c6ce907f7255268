use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TranscriptRole {
    User,
    Bot,
}

/// How a turn's `content` is encoded.
///
/// The kind is fixed when the turn is stored and is the only thing consulted
/// when the turn is displayed again; content is never re-sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TurnKind {
    /// Markdown or plain text.
    Text,
    /// A `data:image/...;base64,...` URI.
    Image,
    /// JSON text that reads as rows and columns.
    Table,
    /// JSON text (possibly malformed) shown as a structured tree.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TranscriptRole,
    pub kind: TurnKind,
    pub content: String,
}

impl TranscriptRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Bot => "bot",
        }
    }

    pub fn is_user(self) -> bool {
        self == TranscriptRole::User
    }
}

impl TurnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnKind::Text => "text",
            TurnKind::Image => "image",
            TurnKind::Table => "table",
            TurnKind::Json => "json",
        }
    }
}

impl AsRef<str> for TranscriptRole {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for TranscriptRole {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl TryFrom<&str> for TranscriptRole {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(TranscriptRole::User),
            "bot" => Ok(TranscriptRole::Bot),
            _ => Err(format!("invalid transcript role: {value}")),
        }
    }
}

impl TryFrom<String> for TranscriptRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<TranscriptRole> for String {
    fn from(value: TranscriptRole) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<&str> for TurnKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "text" => Ok(TurnKind::Text),
            "image" => Ok(TurnKind::Image),
            "table" => Ok(TurnKind::Table),
            "json" => Ok(TurnKind::Json),
            _ => Err(format!("invalid turn kind: {value}")),
        }
    }
}

impl TryFrom<String> for TurnKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<TurnKind> for String {
    fn from(value: TurnKind) -> Self {
        value.as_str().to_string()
    }
}

impl Turn {
    pub fn new(role: TranscriptRole, kind: TurnKind, content: impl Into<String>) -> Self {
        Self {
            role,
            kind,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::User, TurnKind::Text, content)
    }

    pub fn bot(kind: TurnKind, content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::Bot, kind, content)
    }

    pub fn bot_text(content: impl Into<String>) -> Self {
        Self::bot(TurnKind::Text, content)
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }
}
