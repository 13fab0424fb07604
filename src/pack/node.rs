//! Stage nodes: the playable and navigable units of a pack.

use std::path::{Path, PathBuf};

use crate::pack::controls::ControlSettings;
use crate::pack::graph::ActionKey;
use crate::pack::ids::{GroupId, NodeId};

/// Variant of a stage node. Selects the exported `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Cover { square_one: bool },
    Question,
    Option,
    Story,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Cover { .. } => "cover",
            NodeKind::Question => "menu.questionstage",
            NodeKind::Option => "menu.optionstage",
            NodeKind::Story => "story",
        }
    }

    pub fn default_controls(&self) -> ControlSettings {
        match self {
            NodeKind::Cover { .. } => ControlSettings::cover(),
            NodeKind::Question => ControlSettings::question(),
            NodeKind::Option => ControlSettings::option(),
            NodeKind::Story => ControlSettings::story(),
        }
    }
}

/// Media attached to a node.
///
/// Starts as a local source file; packaging replaces it with the name of
/// the archive entry holding the copied bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Source(PathBuf),
    Archived(String),
}

impl Asset {
    /// Value exported in the node schema.
    pub fn schema_value(&self) -> String {
        match self {
            Asset::Source(path) => path.display().to_string(),
            Asset::Archived(name) => name.clone(),
        }
    }

    pub fn source_path(&self) -> Option<&Path> {
        match self {
            Asset::Source(path) => Some(path),
            Asset::Archived(_) => None,
        }
    }
}

/// Optional fields accepted when creating a node.
///
/// Anything left unset gets its default: a fresh id, no media, and the
/// control settings of the node's variant.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub id: Option<NodeId>,
    pub audio: Option<PathBuf>,
    pub image: Option<PathBuf>,
    /// Replaces the variant's control settings entirely.
    pub controls: Option<ControlSettings>,
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_audio(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio = Some(path.into());
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    pub fn with_controls(mut self, controls: ControlSettings) -> Self {
        self.controls = Some(controls);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) name: String,
    pub(crate) audio: Option<Asset>,
    pub(crate) image: Option<Asset>,
    pub(crate) ok_action: Option<ActionKey>,
    pub(crate) home_action: Option<ActionKey>,
    pub(crate) group_id: Option<GroupId>,
    pub(crate) controls: ControlSettings,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, name: impl Into<String>, config: NodeConfig) -> Self {
        Self {
            id: config.id.unwrap_or_default(),
            kind,
            name: name.into(),
            audio: config.audio.map(Asset::Source),
            image: config.image.map(Asset::Source),
            ok_action: None,
            home_action: None,
            group_id: None,
            controls: config.controls.unwrap_or_else(|| kind.default_controls()),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn audio(&self) -> Option<&Asset> {
        self.audio.as_ref()
    }

    pub fn image(&self) -> Option<&Asset> {
        self.image.as_ref()
    }

    pub fn ok_action(&self) -> Option<ActionKey> {
        self.ok_action
    }

    pub fn home_action(&self) -> Option<ActionKey> {
        self.home_action
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    pub fn controls(&self) -> ControlSettings {
        self.controls
    }
}
