//! Pack descriptions: the inputs handed over by whatever gathered the media.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::pack::{PackError, Result};

/// One story of the pack, offered as an option in the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoryEntry {
    pub title: String,
    /// Story audio played once the option is chosen.
    pub audio: Option<PathBuf>,
    /// Image shown on the option.
    pub image: Option<PathBuf>,
    /// Spoken title played while the option is highlighted.
    pub title_audio: Option<PathBuf>,
}

impl StoryEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionDescription {
    pub name: Option<String>,
    pub audio: Option<PathBuf>,
}

/// Pack-level metadata plus the ordered story entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackDescription {
    pub title: String,
    pub description: Option<String>,
    /// Cover image, also cropped into the pack thumbnail.
    pub image: Option<PathBuf>,
    /// Spoken pack title played on the cover.
    pub cover_audio: Option<PathBuf>,
    #[serde(default)]
    pub question: QuestionDescription,
    /// Only keep stories whose title matches this pattern.
    pub filter: Option<String>,
    #[serde(default)]
    pub stories: Vec<StoryEntry>,
}

impl PackDescription {
    /// Read a TOML description. Relative media paths are resolved against
    /// the file's directory.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PackError::Description(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut description = Self::from_toml_str(&contents)?;
        if let Some(base) = path.parent() {
            description.resolve_paths(base);
        }
        Ok(description)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let description: Self =
            toml::from_str(contents).map_err(|e| PackError::Description(e.to_string()))?;
        if description.title.trim().is_empty() {
            return Err(PackError::Description("title must not be empty".into()));
        }
        Ok(description)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |slot: &mut Option<PathBuf>| {
            if let Some(path) = slot.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };
        resolve(&mut self.image);
        resolve(&mut self.cover_audio);
        resolve(&mut self.question.audio);
        for entry in &mut self.stories {
            resolve(&mut entry.audio);
            resolve(&mut entry.image);
            resolve(&mut entry.title_audio);
        }
    }
}
