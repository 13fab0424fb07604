//! Turn a pack description into a finished, packageable story graph.

mod description;

pub use description::{PackDescription, QuestionDescription, StoryEntry};

use regex::{Regex, RegexBuilder};

use crate::config::Config;
use crate::pack::{NodeConfig, Pack, PackError, Result, StoryGraph};

/// Case-insensitive title filter matching from the start of the title.
#[derive(Debug, Clone)]
pub struct StoryFilter(Regex);

impl StoryFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
            .case_insensitive(true)
            .build()?;
        Ok(Self(regex))
    }

    pub fn matches(&self, title: &str) -> bool {
        self.0.is_match(title)
    }
}

/// Build the cover, menu, options and stories for `description`.
///
/// Each kept entry becomes an option (spoken title plus image) unlocking a
/// story (the entry audio), in description order.
pub fn assemble(description: &PackDescription, config: &Config) -> Result<Pack> {
    let filter = description
        .filter
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(StoryFilter::new)
        .transpose()?;

    let mut graph = StoryGraph::new();

    let question_name = description
        .question
        .name
        .clone()
        .unwrap_or_else(|| config.question_name.clone());
    let question = graph.add_question(
        question_name.as_str(),
        NodeConfig {
            audio: description.question.audio.clone(),
            ..NodeConfig::default()
        },
    );
    let menu = graph.add_menu(question);

    let cover = graph.add_cover(
        description.title.as_str(),
        NodeConfig {
            audio: description.cover_audio.clone(),
            image: description.image.clone(),
            ..NodeConfig::default()
        },
    );
    graph.set_menu(cover, menu);

    for entry in &description.stories {
        if let Some(filter) = &filter {
            if !filter.matches(&entry.title) {
                tracing::debug!(title = %entry.title, "Skipping story not matching filter");
                continue;
            }
        }

        let option = graph.add_option(
            entry.title.as_str(),
            NodeConfig {
                audio: entry.title_audio.clone(),
                image: entry.image.clone(),
                ..NodeConfig::default()
            },
        );
        graph.push_option(menu, option);

        let story = graph.add_story(
            cover,
            entry.title.as_str(),
            NodeConfig {
                audio: entry.audio.clone(),
                ..NodeConfig::default()
            },
        )?;
        graph.set_ok_transition(option, story);
    }

    let stories = graph.menu(menu).options().len();
    if stories == 0 {
        return Err(PackError::EmptyMenu(question_name));
    }
    tracing::info!(title = %description.title, stories, "Assembled story graph");

    let mut pack = Pack::new(description.title.as_str(), graph)
        .with_cover(cover)
        .with_format(config.format.as_str(), config.version)
        .with_compression(config.archive.compression);
    if let Some(text) = &description.description {
        pack = pack.with_description(text.as_str());
    }
    if let Some(image) = &description.image {
        pack = pack.with_image(image.clone());
    }
    if let Some(dir) = &config.archive.scratch_dir {
        pack = pack.with_scratch_dir(dir.clone());
    }
    Ok(pack)
}
