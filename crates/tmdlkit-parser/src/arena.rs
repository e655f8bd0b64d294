//! Arena used while building the node tree
//!
//! Open nodes live in a flat arena with parent indices. Each slot records the
//! indentation that opened it; finding the parent of a new line is a walk up
//! the parent chain instead of popping a stack of mutable references.

use tmdlkit_core::{Collection, Node};

/// Index of a node in the arena
pub type NodeId = usize;

/// The root node is always the first slot
pub const ROOT: NodeId = 0;

#[derive(Debug)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    /// Indentation that opened the node; `None` sorts below every level
    anchor: Option<usize>,
    children: Vec<(Collection, NodeId)>,
}

/// Flat storage of the nodes of one document
#[derive(Debug)]
pub struct Arena {
    slots: Vec<Slot>,
}

impl Arena {
    /// Create an arena holding an undeclared root
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                node: Node::document(),
                parent: None,
                anchor: None,
                children: Vec::new(),
            }],
        }
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add a child under `parent` in `collection`, opened at `indent`
    pub fn insert(
        &mut self,
        parent: NodeId,
        collection: Collection,
        node: Node,
        indent: usize,
    ) -> NodeId {
        let id = self.slots.len();
        self.slots.push(Slot {
            node,
            parent: Some(parent),
            anchor: Some(indent),
            children: Vec::new(),
        });
        let parent = &mut self.slots[parent];
        parent.node.open_collection(collection);
        parent.children.push((collection, id));
        id
    }

    /// Node stored at `id`
    pub fn get(&self, id: NodeId) -> &Node {
        &self.slots[id].node
    }

    /// Mutable node stored at `id`
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id].node
    }

    /// Re-anchor the root at `indent`
    pub fn anchor_root(&mut self, indent: usize) {
        self.slots[ROOT].anchor = Some(indent);
    }

    /// Nearest node, starting at `from`, that encloses a line at `indent`
    ///
    /// Walks up while the node was opened at the same or a deeper level.
    /// The root is never left, whatever its anchor.
    pub fn enclosing(&self, from: NodeId, indent: usize) -> NodeId {
        let mut id = from;
        while self.slots[id].anchor >= Some(indent) {
            match self.slots[id].parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
        id
    }

    /// Assemble the owned tree, children in insertion order
    pub fn into_tree(self) -> Node {
        let mut slots: Vec<Option<Slot>> = self.slots.into_iter().map(Some).collect();
        Self::assemble(&mut slots, ROOT)
    }

    fn assemble(slots: &mut [Option<Slot>], id: NodeId) -> Node {
        let Some(slot) = slots[id].take() else {
            return Node::document();
        };

        let mut node = slot.node;
        for (collection, child) in slot.children {
            let child = Self::assemble(slots, child);
            node.push_child(collection, child);
        }
        node
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
