use crate::core::message::{Turn, TurnKind};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Plain-text transcript of every turn, appended to a file.
///
/// Cloning is cheap; every clone appends to the same path. Each write opens
/// the file in append mode so concurrent sessions interleave whole turns.
#[derive(Debug, Clone, Default)]
pub struct TranscriptLog {
    file_path: Option<PathBuf>,
}

impl TranscriptLog {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enable logging to `path`, failing early if the file cannot be opened
    /// for appending.
    pub fn to_file(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        Self::test_file_access(&path)?;
        Ok(Self {
            file_path: Some(path),
        })
    }

    pub fn is_active(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn get_status_string(&self) -> String {
        match &self.file_path {
            None => "disabled".to_string(),
            Some(path) => format!(
                "active ({})",
                path.file_name().unwrap_or_default().to_string_lossy()
            ),
        }
    }

    pub fn log_turn(&self, turn: &Turn) -> io::Result<()> {
        let line = if turn.is_user() {
            format!("You: {}", turn.content)
        } else {
            match turn.kind {
                TurnKind::Image => format!(
                    "Bot [image]: <data URI, {} bytes>",
                    turn.content.len()
                ),
                kind => format!("Bot [{}]: {}", kind.as_str(), turn.content),
            }
        };
        self.log_message(&line)
    }

    /// Write a `## `-prefixed marker line, e.g. when a server starts.
    pub fn log_marker(&self, marker: &str) -> io::Result<()> {
        self.log_message(&format!("## {marker}"))
    }

    pub fn log_message(&self, content: &str) -> io::Result<()> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        // Buffer the whole turn so it lands in one write.
        let mut writer = BufWriter::with_capacity(64 * 1024, file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Blank line between turns.
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    fn test_file_access(path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn disabled_log_writes_nothing() {
        let log = TranscriptLog::disabled();
        assert!(!log.is_active());
        assert_eq!(log.get_status_string(), "disabled");
        log.log_turn(&Turn::user("hello")).expect("noop");
    }

    #[test]
    fn turns_are_appended_with_role_prefix_and_spacing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("transcript.log");
        let log = TranscriptLog::to_file(&path).expect("enable log");

        log.log_turn(&Turn::user("sales by region")).expect("log user");
        log.log_turn(&Turn::bot(TurnKind::Table, "[{\"region\":\"east\"}]"))
            .expect("log bot");
        log.log_turn(&Turn::bot(TurnKind::Image, "data:image/png;base64,QQ=="))
            .expect("log image");

        let contents = fs::read_to_string(&path).expect("read log");
        assert_eq!(
            contents,
            "You: sales by region\n\n\
             Bot [table]: [{\"region\":\"east\"}]\n\n\
             Bot [image]: <data URI, 26 bytes>\n\n"
        );
        assert_eq!(log.get_status_string(), "active (transcript.log)");
    }

    #[test]
    fn multiline_content_is_preserved_line_by_line() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("transcript.log");
        let log = TranscriptLog::to_file(&path).expect("enable log");

        log.log_marker("server started").expect("marker");
        log.log_turn(&Turn::bot_text("line one\nline two")).expect("log");

        let contents = fs::read_to_string(&path).expect("read log");
        assert_eq!(
            contents,
            "## server started\n\nBot [text]: line one\nline two\n\n"
        );
    }

    #[test]
    fn unwritable_path_is_rejected_up_front() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing-dir").join("transcript.log");
        assert!(TranscriptLog::to_file(path).is_err());
    }
}
