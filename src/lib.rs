pub mod assemble;
pub mod config;
pub mod pack;
pub mod util;

pub use assemble::{assemble, PackDescription, StoryEntry, StoryFilter};
pub use config::Config;
pub use pack::{
    ControlSettings, CoverKey, MenuKey, NodeConfig, OptionKey, Pack, PackError, PackSummary,
    QuestionKey, StoryGraph, StoryKey, StoryManifest,
};
