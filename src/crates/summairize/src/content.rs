//! Note content preparation
//!
//! Validation, extraction of the prose worth summarizing, truncation to a
//! model-friendly size and write-back of a generated summary.

/// Heading of the section a summary is written to.
pub const SUMMARY_HEADING: &str = "## Summary";

/// Appended to content cut short by [`ContentPreparer::truncate_for_ai`].
pub const TRUNCATION_MARKER: &str = "[Content truncated]";

/// Outcome of content validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// Prepares raw note text before it reaches a provider.
pub trait ContentPreparer: Send + Sync {
    /// Reject content that is empty or too short to summarize.
    fn validate(&self, text: &str) -> Validation;

    /// Strip structural content that is not prose.
    fn extract_for_summary(&self, text: &str) -> String;

    /// Bound content to a size safe for model input.
    fn truncate_for_ai(&self, text: &str) -> String;
}

/// Markdown note preparer.
#[derive(Debug, Clone)]
pub struct NoteContent {
    min_chars: usize,
    max_chars: usize,
}

impl NoteContent {
    pub fn new() -> Self {
        Self {
            min_chars: 50,
            max_chars: 12_000,
        }
    }

    /// Override the minimum prose length and the truncation bound.
    pub fn with_limits(min_chars: usize, max_chars: usize) -> Self {
        Self {
            min_chars,
            max_chars,
        }
    }
}

impl Default for NoteContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentPreparer for NoteContent {
    fn validate(&self, text: &str) -> Validation {
        if text.trim().is_empty() {
            return Validation::Invalid("Note is empty".to_string());
        }

        if self.extract_for_summary(text).chars().count() < self.min_chars {
            return Validation::Invalid(format!(
                "Note is too short to summarize (minimum {} characters)",
                self.min_chars
            ));
        }

        Validation::Valid
    }

    fn extract_for_summary(&self, text: &str) -> String {
        let (_, body) = split_front_matter(text);
        let body = strip_html_comments(&remove_summary_section(body));

        let mut out = String::with_capacity(body.len());
        let mut in_fence = false;
        let mut last_blank = true;

        for line in body.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }

            if line.trim().is_empty() {
                if !last_blank {
                    out.push('\n');
                    last_blank = true;
                }
                continue;
            }

            out.push_str(line.trim_end());
            out.push('\n');
            last_blank = false;
        }

        out.trim().to_string()
    }

    fn truncate_for_ai(&self, text: &str) -> String {
        let Some((cut, _)) = text.char_indices().nth(self.max_chars) else {
            return text.to_string();
        };

        let head = &text[..cut];
        // Prefer a word boundary unless it discards more than half the text.
        let head = match head.rfind(char::is_whitespace) {
            Some(pos) if pos > cut / 2 => &head[..pos],
            _ => head,
        };

        format!("{}\n\n{}", head.trim_end(), TRUNCATION_MARKER)
    }
}

/// Write `summary` into `original` as a `## Summary` section placed right
/// after the front matter, replacing any existing one.
pub fn insert_summary(original: &str, summary: &str) -> String {
    let (front_matter, body) = split_front_matter(original);
    let body = remove_summary_section(body);
    let body = body.trim_start();

    let mut out = String::with_capacity(original.len() + summary.len() + 16);
    out.push_str(front_matter);
    if !front_matter.is_empty() && !front_matter.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(SUMMARY_HEADING);
    out.push_str("\n\n");
    out.push_str(summary.trim());
    out.push('\n');
    if !body.is_empty() {
        out.push('\n');
        out.push_str(body);
    }
    out
}

/// Split YAML front matter (including both `---` fences) from the body.
fn split_front_matter(text: &str) -> (&str, &str) {
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return ("", text);
    };

    let mut offset = text.len() - rest.len();
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        if line.trim_end() == "---" {
            return text.split_at(offset);
        }
    }

    ("", text)
}

fn heading_level(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let title = &trimmed[level..];
    if !title.is_empty() && !title.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, title.trim()))
}

/// Drop a level-2 "Summary" section up to the next heading of level 1 or 2.
fn remove_summary_section(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_summary = false;

    for line in body.split_inclusive('\n') {
        match heading_level(line) {
            Some((2, title)) if title.eq_ignore_ascii_case("summary") => {
                in_summary = true;
                continue;
            }
            Some((level, _)) if in_summary && level <= 2 => in_summary = false,
            _ => {}
        }
        if !in_summary {
            out.push_str(line);
        }
    }

    out
}

fn strip_html_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            None => return out,
        }
    }

    out.push_str(rest);
    out
}
