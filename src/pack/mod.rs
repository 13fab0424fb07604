//! Story pack data model and serializer.
//!
//! A pack is a small graph: one cover leading into a menu (a question and
//! its options), each option unlocking a story that routes back into the
//! cover. [`StoryGraph`] holds and wires the graph; [`Pack`] traverses it
//! once and writes the archive consumed by the playback device.

pub mod action;
pub mod archive;
pub mod controls;
pub mod error;
pub mod graph;
pub mod ids;
pub mod node;
pub mod schema;
pub mod thumbnail;
pub mod traverse;

pub use action::{Action, ActionKind};
pub use archive::{asset_name, Compression, Pack, PackSummary, ASSETS_DIR, MANIFEST_NAME};
pub use controls::ControlSettings;
pub use error::{PackError, Result};
pub use graph::{
    ActionKey, CoverKey, Menu, MenuKey, NodeKey, OptionKey, QuestionKey, StoryGraph, StoryKey,
};
pub use ids::{ActionId, GroupId, NodeId};
pub use node::{Asset, Node, NodeConfig, NodeKind};
pub use schema::{ActionNodeSchema, StageNodeSchema, StoryManifest, Transition};
pub use traverse::Traversal;
