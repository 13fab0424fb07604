mod settings;

pub use settings::{ArchiveConfig, Config, DEFAULT_QUESTION_NAME, EXAMPLE_CONFIG};
