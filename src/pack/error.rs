//! Error type for story pack construction and packaging.

use std::path::PathBuf;

/// Errors raised while wiring a story graph or writing its archive.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// Packaging was requested before a cover was attached.
    #[error("Pack has no cover node")]
    MissingCover,

    /// A story was created for a cover that does not own a menu yet.
    #[error("Cover `{0}` has no menu to route stories back to")]
    CoverWithoutMenu(String),

    /// A menu reachable from the cover offers no options.
    #[error("Menu `{0}` has no options")]
    EmptyMenu(String),

    /// Two distinct graph entities share one id. Internal defect.
    #[error("Duplicate id `{0}` in story graph")]
    DuplicateId(String),

    /// Two media files of one node map to the same archive entry.
    #[error("Archive entry `{0}` would be written twice")]
    AssetNameClash(String),

    /// A node references a media file that cannot be read.
    #[error("Cannot read asset {}: {source}", path.display())]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pack-level image could not be cropped into a thumbnail.
    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] image::ImageError),

    /// Zip container error.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Manifest serialization error.
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Filesystem error outside of asset reads.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A pack description file is malformed.
    #[error("Invalid pack description: {0}")]
    Description(String),

    /// A story filter is not a valid regular expression.
    #[error("Invalid story filter: {0}")]
    Filter(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, PackError>;
