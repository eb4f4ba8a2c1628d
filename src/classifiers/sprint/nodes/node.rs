use crate::classifiers::sprint::nodes::{LeafNode, SplitNode};
use serde::{Deserialize, Serialize};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Node {
    Split(SplitNode),
    Leaf(LeafNode),
}

impl Node {
    pub fn as_split(&self) -> Option<&SplitNode> {
        match self {
            Node::Split(split) => Some(split),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Split(_) => None,
        }
    }
}
