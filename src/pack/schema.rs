//! Records written to `story.json`.

use serde::{Deserialize, Serialize};

use crate::pack::controls::ControlSettings;
use crate::pack::graph::{ActionKey, NodeKey, StoryGraph};
use crate::pack::node::NodeKind;

/// Every stage node is exported at this fixed editor position.
pub const NODE_POSITION: Position = Position { x: 100, y: 100 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub action_node: String,
    pub option_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageNodeSchema {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub name: String,
    pub position: Position,
    pub image: Option<String>,
    pub audio: Option<String>,
    pub ok_transition: Option<Transition>,
    pub home_transition: Option<Transition>,
    pub control_settings: ControlSettings,
    /// Only present on the cover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_one: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionNodeSchema {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub name: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryManifest {
    pub format: String,
    pub title: String,
    pub version: u32,
    pub description: String,
    pub stage_nodes: Vec<StageNodeSchema>,
    pub action_nodes: Vec<ActionNodeSchema>,
}

impl StoryGraph {
    fn transition(&self, action: Option<ActionKey>) -> Option<Transition> {
        action.map(|key| Transition {
            action_node: self.action(key).id().to_string(),
            option_index: 0,
        })
    }

    pub fn node_schema(&self, key: NodeKey) -> StageNodeSchema {
        let node = self.node(key);
        StageNodeSchema {
            uuid: node.id().to_string(),
            kind: node.kind().as_str().to_string(),
            group_id: node.group_id().map(|g| g.to_string()),
            name: node.name().to_string(),
            position: NODE_POSITION,
            image: node.image().map(|a| a.schema_value()),
            audio: node.audio().map(|a| a.schema_value()),
            ok_transition: self.transition(node.ok_action()),
            home_transition: self.transition(node.home_action()),
            control_settings: node.controls(),
            square_one: match node.kind() {
                NodeKind::Cover { square_one } => Some(square_one),
                _ => None,
            },
        }
    }

    pub fn action_schema(&self, key: ActionKey) -> ActionNodeSchema {
        let action = self.action(key);
        ActionNodeSchema {
            id: action.id().to_string(),
            kind: action.kind().as_str().to_string(),
            group_id: action.group_id().map(|g| g.to_string()),
            name: action.name().to_string(),
            options: action
                .options()
                .iter()
                .map(|k| self.node(*k).id().to_string())
                .collect(),
        }
    }
}
