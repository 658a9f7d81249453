use std::collections::BTreeMap;
use std::fmt;

use crate::types::Tag;

/// Handle to a node living in a [`Document`](crate::Document).
///
/// Handles are never reused: once a node is destroyed every operation on its
/// handle becomes a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub tag: Tag,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub scroll_left: f32,
    pub scroll_top: f32,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
            scroll_left: 0.0,
            scroll_top: 0.0,
        }
    }

    /// Copy of this node without tree links or scroll state.
    pub fn shallow_copy(&self) -> Self {
        Self {
            tag: self.tag,
            classes: self.classes.clone(),
            attrs: self.attrs.clone(),
            style: self.style.clone(),
            text: self.text.clone(),
            ..Self::new(self.tag)
        }
    }
}
