use serde::{Deserialize, Serialize};

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// Reserved slot standing in for every absent child and the root's parent.
pub(crate) const NIL: NodeId = NodeId(0);

/// Node color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

/// A stored key together with its links into the arena
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) value: String,
    pub(crate) color: Color,
    /// Non-owning back-reference, `NIL` for the root
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Node {
    pub(crate) fn sentinel() -> Self {
        Node {
            value: String::new(),
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    /// A fresh red leaf
    pub(crate) fn leaf(value: String, parent: NodeId) -> Self {
        Node {
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}
