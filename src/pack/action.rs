//! Action nodes: labeled transitions to an ordered list of candidate nodes.

use crate::pack::graph::NodeKey;
use crate::pack::ids::{ActionId, GroupId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Cover to its menu's question.
    QuestionAction,
    /// Question to every option of its menu.
    OptionsAction,
    /// Option to the story it unlocks.
    StoryAction,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::QuestionAction => "menu.questionaction",
            ActionKind::OptionsAction => "menu.optionsaction",
            ActionKind::StoryAction => "story.storyaction",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Action {
    pub(crate) id: ActionId,
    pub(crate) kind: ActionKind,
    pub(crate) name: String,
    pub(crate) group_id: Option<GroupId>,
    /// References into the graph; the action never owns its targets.
    pub(crate) options: Vec<NodeKey>,
}

impl Action {
    /// Names the action after the node it leads to, e.g. `Pick one.menu.optionsaction`.
    pub(crate) fn new(
        kind: ActionKind,
        target_name: &str,
        group_id: Option<GroupId>,
        options: Vec<NodeKey>,
    ) -> Self {
        Self {
            id: ActionId::new(),
            kind,
            name: format!("{}.{}", target_name, kind.as_str()),
            group_id,
            options,
        }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    pub fn options(&self) -> &[NodeKey] {
        &self.options
    }
}
