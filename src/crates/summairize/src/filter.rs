//! Exclusion rules for template and daily notes

use crate::config::FilterConfig;
use crate::error::Result;
use regex::Regex;
use std::fmt;
use std::path::Path;

/// Why a file is not summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Path contains a configured template folder
    TemplateFolder(String),
    /// File name contains "template"
    TemplateName,
    /// File stem matches the daily-note pattern
    DailyNotePattern,
    /// Path contains a daily notes folder
    DailyNotesFolder,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateFolder(folder) => write!(f, "File is in template folder: {}", folder),
            Self::TemplateName => write!(f, "Filename contains \"template\""),
            Self::DailyNotePattern => write!(f, "File matches daily note pattern"),
            Self::DailyNotesFolder => write!(f, "File is in daily notes folder"),
        }
    }
}

/// Decides whether a note should be skipped.
#[derive(Debug, Clone)]
pub struct FileFilter {
    settings: FilterConfig,
    daily_pattern: Regex,
}

impl FileFilter {
    pub fn new(settings: FilterConfig) -> Result<Self> {
        let daily_pattern = Regex::new(&settings.daily_notes_pattern)?;
        Ok(Self {
            settings,
            daily_pattern,
        })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclusion_reason(path).is_some()
    }

    /// First matching rule, templates before daily notes.
    pub fn exclusion_reason(&self, path: &Path) -> Option<ExclusionReason> {
        let lower_path = path.to_string_lossy().to_lowercase();

        if self.settings.exclude_templates {
            if let Some(folder) = self
                .settings
                .template_folders
                .iter()
                .find(|folder| lower_path.contains(&folder.to_lowercase()))
            {
                return Some(ExclusionReason::TemplateFolder(folder.clone()));
            }

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if name.contains("template") {
                return Some(ExclusionReason::TemplateName);
            }
        }

        if self.settings.exclude_daily_notes {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default();
            if self.daily_pattern.is_match(&stem) {
                return Some(ExclusionReason::DailyNotePattern);
            }

            if lower_path.contains("daily notes") || lower_path.contains("dailynotes") {
                return Some(ExclusionReason::DailyNotesFolder);
            }
        }

        None
    }

    /// Swap in new rules; the old ones stay if the pattern does not compile.
    pub fn update_settings(&mut self, settings: FilterConfig) -> Result<()> {
        self.daily_pattern = Regex::new(&settings.daily_notes_pattern)?;
        self.settings = settings;
        Ok(())
    }
}
