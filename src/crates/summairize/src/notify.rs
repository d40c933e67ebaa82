//! User-facing notifications

use colored::Colorize;

/// Sink for user-facing messages.
///
/// Implementors provide the four severities; the summarization-specific
/// messages are built on top of them.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    fn summary_success(&self, word_count: Option<usize>) {
        match word_count {
            Some(count) => self.success(&format!(
                "Summary generated successfully ({} words)",
                count
            )),
            None => self.success("Summary generated successfully"),
        }
    }

    fn summary_error(&self, error: &str) {
        self.error(&format!("Failed to generate summary: {}", error));
    }

    fn file_excluded(&self, reason: &str) {
        self.warning(&format!("File excluded from summarization: {}", reason));
    }

    fn provider_unavailable(&self, provider: &str) {
        self.error(&format!(
            "{} is not available. Please check your configuration.",
            provider
        ));
    }
}

/// Writes notifications to stderr so stdout stays clean for summaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<(&'static str, String)>>,
    }

    impl Notifier for Recorder {
        fn success(&self, message: &str) {
            self.messages.lock().push(("success", message.to_string()));
        }
        fn error(&self, message: &str) {
            self.messages.lock().push(("error", message.to_string()));
        }
        fn warning(&self, message: &str) {
            self.messages.lock().push(("warning", message.to_string()));
        }
        fn info(&self, message: &str) {
            self.messages.lock().push(("info", message.to_string()));
        }
    }

    #[test]
    fn test_summary_messages() {
        let recorder = Recorder::default();
        recorder.summary_success(Some(42));
        recorder.summary_success(None);
        recorder.summary_error("Ollama service is not running. Please start Ollama first.");

        let messages = recorder.messages.lock();
        assert_eq!(messages[0], ("success", "Summary generated successfully (42 words)".to_string()));
        assert_eq!(messages[1], ("success", "Summary generated successfully".to_string()));
        assert_eq!(
            messages[2],
            (
                "error",
                "Failed to generate summary: Ollama service is not running. Please start Ollama first."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_exclusion_and_availability_messages() {
        let recorder = Recorder::default();
        recorder.file_excluded("File matches daily note pattern");
        recorder.provider_unavailable("Ollama");

        let messages = recorder.messages.lock();
        assert_eq!(
            messages[0],
            ("warning", "File excluded from summarization: File matches daily note pattern".to_string())
        );
        assert_eq!(
            messages[1],
            ("error", "Ollama is not available. Please check your configuration.".to_string())
        );
    }
}
