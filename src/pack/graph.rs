//! Arena holding every node and action of a pack, plus the wiring rules
//! that link them.
//!
//! Nodes and actions refer to each other through keys into the arena, so a
//! single action can be reachable from several nodes (a story routes back
//! into the cover's entry action) without being copied.

use std::collections::HashMap;

use crate::pack::action::{Action, ActionKind};
use crate::pack::error::{PackError, Result};
use crate::pack::ids::GroupId;
use crate::pack::node::{Node, NodeConfig, NodeKind};

/// Handle to any node of a [`StoryGraph`].
///
/// Keys are only meaningful for the graph that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub(crate) usize);

/// Handle to an action of a [`StoryGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionKey(pub(crate) usize);

/// Handle to a menu of a [`StoryGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuKey(usize);

macro_rules! typed_node_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(NodeKey);

        impl $name {
            pub fn node(&self) -> NodeKey {
                self.0
            }
        }

        impl From<$name> for NodeKey {
            fn from(key: $name) -> Self {
                key.0
            }
        }
    };
}

typed_node_key!(
    /// Handle to a cover node.
    CoverKey
);
typed_node_key!(
    /// Handle to a question node.
    QuestionKey
);
typed_node_key!(
    /// Handle to an option node.
    OptionKey
);
typed_node_key!(
    /// Handle to a story node.
    StoryKey
);

/// One question plus the options offered after it.
///
/// Not a node itself: it only ties the question and options together
/// under a shared group id.
#[derive(Debug, Clone)]
pub struct Menu {
    group_id: GroupId,
    question: QuestionKey,
    options: Vec<OptionKey>,
    options_action: ActionKey,
}

impl Menu {
    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn question(&self) -> QuestionKey {
        self.question
    }

    pub fn options(&self) -> &[OptionKey] {
        &self.options
    }

    /// The question's `menu.optionsaction`; its options mirror [`Menu::options`].
    pub fn options_action(&self) -> ActionKey {
        self.options_action
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
    nodes: Vec<Node>,
    actions: Vec<Action>,
    menus: Vec<Menu>,
    cover_menus: HashMap<NodeKey, MenuKey>,
}

impl StoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, key: impl Into<NodeKey>) -> &Node {
        &self.nodes[key.into().0]
    }

    pub(crate) fn node_mut(&mut self, key: impl Into<NodeKey>) -> &mut Node {
        &mut self.nodes[key.into().0]
    }

    pub fn action(&self, key: ActionKey) -> &Action {
        &self.actions[key.0]
    }

    pub fn menu(&self, key: MenuKey) -> &Menu {
        &self.menus[key.0]
    }

    /// Menu owned by a cover, if one was set.
    pub fn cover_menu(&self, cover: CoverKey) -> Option<MenuKey> {
        self.cover_menus.get(&cover.node()).copied()
    }

    fn push_node(&mut self, node: Node) -> NodeKey {
        self.nodes.push(node);
        NodeKey(self.nodes.len() - 1)
    }

    fn push_action(&mut self, action: Action) -> ActionKey {
        self.actions.push(action);
        ActionKey(self.actions.len() - 1)
    }

    pub fn add_cover(&mut self, name: impl Into<String>, config: NodeConfig) -> CoverKey {
        CoverKey(self.push_node(Node::new(
            NodeKind::Cover { square_one: true },
            name,
            config,
        )))
    }

    pub fn add_question(&mut self, name: impl Into<String>, config: NodeConfig) -> QuestionKey {
        QuestionKey(self.push_node(Node::new(NodeKind::Question, name, config)))
    }

    pub fn add_option(&mut self, name: impl Into<String>, config: NodeConfig) -> OptionKey {
        OptionKey(self.push_node(Node::new(NodeKind::Option, name, config)))
    }

    /// Create a menu around `question`.
    ///
    /// The question joins the menu's group and gets an empty
    /// `menu.optionsaction` that [`StoryGraph::push_option`] fills in place.
    pub fn add_menu(&mut self, question: QuestionKey) -> MenuKey {
        let group_id = GroupId::new();
        let question_name = self.node(question).name.clone();
        let options_action = self.push_action(Action::new(
            ActionKind::OptionsAction,
            &question_name,
            Some(group_id),
            Vec::new(),
        ));

        let node = self.node_mut(question);
        node.group_id = Some(group_id);
        node.ok_action = Some(options_action);

        self.menus.push(Menu {
            group_id,
            question,
            options: Vec::new(),
            options_action,
        });
        MenuKey(self.menus.len() - 1)
    }

    /// Append an option to a menu and to its question's options action.
    pub fn push_option(&mut self, menu: MenuKey, option: OptionKey) {
        let (group_id, options_action) = {
            let menu = &mut self.menus[menu.0];
            menu.options.push(option);
            (menu.group_id, menu.options_action)
        };
        self.node_mut(option).group_id = Some(group_id);
        self.actions[options_action.0].options.push(option.node());
    }

    /// Give a cover its menu. The cover's ok control enters the menu's question.
    ///
    /// Stories route back into the action created here, so set the menu
    /// before adding stories.
    pub fn set_menu(&mut self, cover: CoverKey, menu: MenuKey) {
        let question = self.menus[menu.0].question;
        let (question_name, group_id) = {
            let node = self.node(question);
            (node.name.clone(), node.group_id)
        };
        let entry_action = self.push_action(Action::new(
            ActionKind::QuestionAction,
            &question_name,
            group_id,
            vec![question.node()],
        ));
        self.node_mut(cover).ok_action = Some(entry_action);
        self.cover_menus.insert(cover.node(), menu);
    }

    /// Create a story whose ok and home controls both lead back into the
    /// cover's entry action.
    pub fn add_story(
        &mut self,
        cover: CoverKey,
        name: impl Into<String>,
        config: NodeConfig,
    ) -> Result<StoryKey> {
        let cover_node = self.node(cover);
        let entry_action = cover_node
            .ok_action
            .ok_or_else(|| PackError::CoverWithoutMenu(cover_node.name.clone()))?;

        let mut story = Node::new(NodeKind::Story, name, config);
        story.group_id = Some(GroupId::from(story.id));
        story.ok_action = Some(entry_action);
        story.home_action = Some(entry_action);
        Ok(StoryKey(self.push_node(story)))
    }

    /// Point an option's ok control at the story it unlocks.
    pub fn set_ok_transition(&mut self, option: OptionKey, story: StoryKey) {
        let (story_name, group_id) = {
            let node = self.node(story);
            (node.name.clone(), node.group_id)
        };
        let action = self.push_action(Action::new(
            ActionKind::StoryAction,
            &story_name,
            group_id,
            vec![story.node()],
        ));
        self.node_mut(option).ok_action = Some(action);
    }
}
