//! Ordered ingredient index.
//!
//! [`OrderedKeySet`] is a red-black tree of unique string keys. Nodes live in
//! an arena and refer to each other by index; slot zero is a black sentinel
//! that stands in for every missing child and for the root's parent, so the
//! rebalancing code never has to special-case an absent branch.

use std::cmp::Ordering;
use tracing::trace;

mod model;
pub use model::Color;
use model::{Node, NodeId, NIL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A set of unique string keys kept in a red-black tree.
///
/// Inserting a key that is already present leaves the tree untouched. There
/// is no removal; nodes are released when the set is dropped.
///
/// # Examples
///
/// ```
/// use pantry_find::OrderedKeySet;
///
/// let mut ingredients = OrderedKeySet::new();
/// ingredients.insert("salt");
/// ingredients.insert("pepper");
///
/// assert!(ingredients.exists("salt"));
/// assert_eq!(ingredients.substring_search("pep"), Some("pepper"));
/// ```
#[derive(Debug, Clone)]
pub struct OrderedKeySet {
    /// Arena; index 0 is the sentinel
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for OrderedKeySet {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedKeySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        OrderedKeySet {
            nodes: vec![Node::sentinel()],
            root: NIL,
        }
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Inserts `value`, rebalancing as needed.
    ///
    /// Returns `false` without modifying the tree when the key is already
    /// present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();

        let mut parent = NIL;
        let mut current = self.root;
        let mut side = Side::Left;
        while current != NIL {
            parent = current;
            let node = self.node(current);
            match value.as_str().cmp(node.value.as_str()) {
                Ordering::Less => {
                    side = Side::Left;
                    current = node.left;
                }
                Ordering::Greater => {
                    side = Side::Right;
                    current = node.right;
                }
                Ordering::Equal => return false,
            }
        }

        let id = NodeId(self.nodes.len());
        trace!(key = %value, "inserting key");
        self.nodes.push(Node::leaf(value, parent));
        if parent == NIL {
            self.root = id;
        } else {
            self.set_child(parent, side, id);
        }

        self.fix_insert(id);
        true
    }

    /// Returns true if `value` is stored in the set.
    pub fn exists(&self, value: &str) -> bool {
        self.find(value) != NIL
    }

    /// Returns the first key, in preorder, that contains `needle`.
    ///
    /// The walk visits a node before its left subtree and the left subtree
    /// before the right one, so the answer depends on the shape of the tree
    /// and not only on its contents. It is not the smallest matching key.
    pub fn substring_search(&self, needle: &str) -> Option<&str> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if id == NIL {
                continue;
            }
            let node = self.node(id);
            if node.value.contains(needle) {
                return Some(node.value.as_str());
            }
            stack.push(node.right);
            stack.push(node.left);
        }
        None
    }

    /// Returns a view of the root node, or `None` for an empty set.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        NodeRef::new(self, self.root)
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            set: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Number of black nodes on every path from the root down to the
    /// sentinel, counting the sentinel itself.
    ///
    /// Returns `None` if two paths disagree.
    pub fn black_height(&self) -> Option<usize> {
        self.black_height_from(self.root)
    }

    fn black_height_from(&self, id: NodeId) -> Option<usize> {
        if id == NIL {
            return Some(1);
        }
        let node = self.node(id);
        let left = self.black_height_from(node.left)?;
        let right = self.black_height_from(node.right)?;
        if left != right {
            return None;
        }
        Some(left + usize::from(!node.is_red()))
    }

    /// Descends to `value`, returning the sentinel on a miss.
    fn find(&self, value: &str) -> NodeId {
        let mut current = self.root;
        while current != NIL {
            let node = self.node(current);
            match value.cmp(node.value.as_str()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => break,
            }
        }
        current
    }

    fn fix_insert(&mut self, mut id: NodeId) {
        // The root's parent is the black sentinel, so the loop stops there.
        while self.node(self.node(id).parent).is_red() {
            let parent = self.node(id).parent;
            let grandparent = self.node(parent).parent;
            let side = if parent == self.node(grandparent).left {
                Side::Left
            } else {
                Side::Right
            };
            let uncle = self.child(grandparent, side.opposite());

            if self.node(uncle).is_red() {
                self.node_mut(parent).color = Color::Black;
                self.node_mut(uncle).color = Color::Black;
                self.node_mut(grandparent).color = Color::Red;
                id = grandparent;
                continue;
            }

            if id == self.child(parent, side.opposite()) {
                id = parent;
                self.rotate(id, side);
            }
            let parent = self.node(id).parent;
            let grandparent = self.node(parent).parent;
            self.node_mut(parent).color = Color::Black;
            self.node_mut(grandparent).color = Color::Red;
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    /// Rotates the subtree rooted at `x` towards `direction`.
    ///
    /// `rotate(x, Side::Left)` lifts the right child of `x` into its place.
    fn rotate(&mut self, x: NodeId, direction: Side) {
        let y = self.child(x, direction.opposite());
        let inner = self.child(y, direction);

        self.set_child(x, direction.opposite(), inner);
        if inner != NIL {
            self.node_mut(inner).parent = x;
        }

        let x_parent = self.node(x).parent;
        self.node_mut(y).parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if x == self.node(x_parent).left {
            self.node_mut(x_parent).left = y;
        } else {
            self.node_mut(x_parent).right = y;
        }

        self.set_child(y, direction, x);
        self.node_mut(x).parent = y;
        trace!(pivot = %self.node(x).value, ?direction, "rotated");
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        debug_assert_ne!(id, NIL, "the sentinel is never mutated");
        &mut self.nodes[id.0]
    }

    fn child(&self, id: NodeId, side: Side) -> NodeId {
        let node = self.node(id);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }
}

impl<S: Into<String>> Extend<S> for OrderedKeySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedKeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = OrderedKeySet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a OrderedKeySet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read-only view of a node in an [`OrderedKeySet`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    set: &'a OrderedKeySet,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn new(set: &'a OrderedKeySet, id: NodeId) -> Option<Self> {
        (id != NIL).then_some(NodeRef { set, id })
    }

    pub fn value(&self) -> &'a str {
        &self.set.node(self.id).value
    }

    pub fn color(&self) -> Color {
        self.set.node(self.id).color
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        NodeRef::new(self.set, self.set.node(self.id).left)
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        NodeRef::new(self.set, self.set.node(self.id).right)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        NodeRef::new(self.set, self.set.node(self.id).parent)
    }
}

/// In-order iterator over the keys of an [`OrderedKeySet`].
#[derive(Debug)]
pub struct Iter<'a> {
    set: &'a OrderedKeySet,
    stack: Vec<NodeId>,
}

impl Iter<'_> {
    fn push_left_spine(&mut self, mut id: NodeId) {
        while id != NIL {
            self.stack.push(id);
            id = self.set.node(id).left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let set = self.set;
        let node = set.node(id);
        self.push_left_spine(node.right);
        Some(node.value.as_str())
    }
}
