use std::collections::HashSet;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::node::Node;

/// Stable handle to a registered node.
///
/// Generational: a handle returned by [`NestedSet::add`] becomes invalid
/// once the node is deleted, even if the underlying slot is reused.
pub type NodeId = Index;

/// Container owning the nested set labeling invariant.
///
/// Every registered node carries a `(level, left, right)` triple such that
/// across the whole tree the `left`/`right` values form the contiguous
/// range `0..2N-1` (N = node count including root), and B is a descendant
/// of A exactly when `A.left < B.left && B.right < A.right`. Containment,
/// sibling order and subtree extraction are therefore plain integer
/// comparisons; no parent or child links are stored.
///
/// Every mutating operation rewrites labels across the entire registry;
/// this O(n) cost is intrinsic to the technique. Operations validate
/// before the first label write, so a returned error implies the tree is
/// unchanged.
#[derive(Debug)]
pub struct NestedSet {
    /// Arena storage for all registered nodes
    arena: Arena<Node>,
    /// Handle of the single level-0 node
    root: NodeId,
}

impl Default for NestedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl NestedSet {
    /// Creates a tree holding only its root, labeled `(0, 0, 1)`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let mut root = Node::new();
        root.set_right(1);
        let root = arena.insert(root);
        Self { arena, root }
    }

    /// Rebuilds a tree from already-labeled nodes, e.g. loaded from
    /// external storage.
    ///
    /// Labels are trusted as-is, no validation is performed. The caller
    /// must supply a root labeled `(0, 0, 2N-1)` and nodes whose labels
    /// satisfy the nested set invariants; feeding inconsistent labels
    /// leaves subsequent operations undefined. Handles for the imported
    /// nodes are recovered via [`branch`](Self::branch) with `None`,
    /// which yields them in ascending `left` order.
    pub fn from_nodes(root: Node, nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(root);
        for node in nodes {
            arena.insert(node);
        }
        Self { arena, root }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of registered nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Whether `id` refers to a currently registered node.
    #[instrument(level = "trace", skip(self))]
    pub fn exists(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Mutable access to a registered node, e.g. to rename it.
    ///
    /// Rewriting the node's labels through this reference voids the
    /// container's invariant; only `name` is safe to change.
    #[instrument(level = "trace", skip(self))]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id)
    }

    /// Unordered iteration over all registered nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.arena.iter()
    }

    /// Registers `node` as the new rightmost child of `parent` (of the
    /// root if `parent` is `None`) and returns its handle.
    ///
    /// The labels `node` arrives with are ignored; it is assigned the pair
    /// `(insert_at, insert_at + 1)` opened up at the parent's right
    /// boundary, and every node at or beyond that boundary shifts by 2.
    #[instrument(level = "debug", skip(self, node))]
    pub fn add(&mut self, node: Node, parent: Option<NodeId>) -> TreeResult<NodeId> {
        let parent_id = parent.unwrap_or(self.root);
        let (parent_level, insert_at) = {
            let parent = self
                .arena
                .get(parent_id)
                .ok_or(TreeError::ParentNotFound(parent_id))?;
            (parent.level(), parent.right())
        };

        // Open a two-slot gap at the parent's right boundary. The parent
        // and all its ancestors fall in the first branch and grow.
        for (_, other) in self.arena.iter_mut() {
            if other.right() >= insert_at {
                other.set_right(other.right() + 2);
            }
            if other.left() > insert_at {
                other.set_left(other.left() + 2);
            }
        }

        let mut node = node;
        node.set_level(parent_level + 1);
        node.set_left(insert_at);
        node.set_right(insert_at + 1);
        Ok(self.arena.insert(node))
    }

    /// Unregisters `node` and every descendant, then closes the gap.
    ///
    /// Survivors positioned after the removed span move left by its
    /// width; every ancestor's span shrinks by the same amount. The root
    /// cannot be deleted.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: NodeId) -> TreeResult<()> {
        let (left, right, width) = {
            let node = self.arena.get(id).ok_or(TreeError::NodeNotFound(id))?;
            (node.left(), node.right(), node.width())
        };
        if id == self.root {
            return Err(TreeError::CannotDeleteRoot);
        }

        let doomed: Vec<NodeId> = self
            .arena
            .iter()
            .filter(|(_, n)| n.left() >= left && n.right() <= right)
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            self.arena.remove(id);
        }

        for (_, other) in self.arena.iter_mut() {
            if other.left() > right {
                other.set_left(other.left() - width);
            }
            if other.right() > right {
                other.set_right(other.right() - width);
            }
        }
        Ok(())
    }

    /// Relocates `node` with its whole subtree to become the rightmost
    /// child of `new_parent`.
    ///
    /// The subtree's internal shape is preserved: its labels are
    /// translated by a single offset and every member's level is adjusted
    /// by the depth difference. Moving a node into its own subtree is
    /// rejected with [`TreeError::CycleNotAllowed`].
    #[instrument(level = "debug", skip(self))]
    pub fn move_to(&mut self, id: NodeId, new_parent: NodeId) -> TreeResult<()> {
        let (left, right, level) = {
            let node = self.arena.get(id).ok_or(TreeError::NodeNotFound(id))?;
            (node.left(), node.right(), node.level())
        };
        let (parent_left, parent_right, parent_level) = {
            let parent = self
                .arena
                .get(new_parent)
                .ok_or(TreeError::ParentNotFound(new_parent))?;
            (parent.left(), parent.right(), parent.level())
        };
        if new_parent == id || (left < parent_left && parent_right < right) {
            return Err(TreeError::CycleNotAllowed {
                node: id,
                target: new_parent,
            });
        }

        let width = right - left + 1;
        let level_delta = parent_level + 1 - level;
        let subtree = self.subtree_ids(left, right);

        // Detach: close the gap the subtree leaves behind. Subtree labels
        // stay untouched and keep identifying its members.
        for (other_id, other) in self.arena.iter_mut() {
            if subtree.contains(&other_id) {
                continue;
            }
            if other.left() > right {
                other.set_left(other.left() - width);
            }
            if other.right() > right {
                other.set_right(other.right() - width);
            }
        }

        // Reinsert at the destination's right boundary, read post-detach.
        let insert_at = self
            .arena
            .get(new_parent)
            .ok_or(TreeError::ParentNotFound(new_parent))?
            .right();
        for (other_id, other) in self.arena.iter_mut() {
            if subtree.contains(&other_id) {
                continue;
            }
            if other.right() >= insert_at {
                other.set_right(other.right() + width);
            }
            if other.left() > insert_at {
                other.set_left(other.left() + width);
            }
        }

        let offset = insert_at - left;
        for (other_id, other) in self.arena.iter_mut() {
            if subtree.contains(&other_id) {
                other.set_left(other.left() + offset);
                other.set_right(other.right() + offset);
                other.set_level(other.level() + level_delta);
            }
        }
        Ok(())
    }

    /// Reorders `node` with its subtree next to the sibling `shifted`,
    /// keeping parent and depth unchanged.
    ///
    /// Placement is asymmetric: a leaf `shifted` has the moved subtree
    /// inserted immediately before it; a `shifted` with children has it
    /// inserted immediately after its entire subtree. Both operands must
    /// be at the same level and children of the same parent.
    #[instrument(level = "debug", skip(self))]
    pub fn shift(&mut self, id: NodeId, shifted: NodeId) -> TreeResult<()> {
        if id == shifted {
            return Ok(());
        }
        let (left, right, level) = {
            let node = self.arena.get(id).ok_or(TreeError::NodeNotFound(id))?;
            (node.left(), node.right(), node.level())
        };
        let (shifted_left, shifted_right, shifted_level) = {
            let node = self
                .arena
                .get(shifted)
                .ok_or(TreeError::NodeNotFound(shifted))?;
            (node.left(), node.right(), node.level())
        };
        if level != shifted_level {
            return Err(TreeError::LevelMismatch {
                node_level: level,
                shifted_level,
            });
        }
        match self.parent_span(left, right) {
            Some((parent_left, parent_right))
                if parent_left < shifted_left && shifted_right < parent_right => {}
            _ => return Err(TreeError::OutOfParentBounds(shifted)),
        }

        let width = right - left + 1;
        let subtree = self.subtree_ids(left, right);

        for (other_id, other) in self.arena.iter_mut() {
            if subtree.contains(&other_id) {
                continue;
            }
            if other.left() > right {
                other.set_left(other.left() - width);
            }
            if other.right() > right {
                other.set_right(other.right() - width);
            }
        }

        // Destination boundary in post-detach coordinates: before a leaf
        // reference, past the whole subtree of a non-leaf one.
        let dest = {
            let reference = self
                .arena
                .get(shifted)
                .ok_or(TreeError::NodeNotFound(shifted))?;
            if reference.is_leaf() {
                reference.left()
            } else {
                reference.right() + 1
            }
        };
        for (other_id, other) in self.arena.iter_mut() {
            if subtree.contains(&other_id) {
                continue;
            }
            if other.right() >= dest {
                other.set_right(other.right() + width);
            }
            if other.left() >= dest {
                other.set_left(other.left() + width);
            }
        }

        let offset = dest - left;
        for (other_id, other) in self.arena.iter_mut() {
            if subtree.contains(&other_id) {
                other.set_left(other.left() + offset);
                other.set_right(other.right() + offset);
            }
        }
        Ok(())
    }

    /// Subtree rooted at `id` (whole tree for `None`) in ascending `left`
    /// order, which equals a pre-order traversal. Returns an empty vector
    /// for an unregistered handle. Pure read.
    #[instrument(level = "trace", skip(self))]
    pub fn branch(&self, id: Option<NodeId>) -> Vec<NodeId> {
        let start = id.unwrap_or(self.root);
        let (left, right) = match self.arena.get(start) {
            Some(node) => (node.left(), node.right()),
            None => return Vec::new(),
        };
        let mut members: Vec<(i64, NodeId)> = self
            .arena
            .iter()
            .filter(|(_, n)| n.left() >= left && n.right() <= right)
            .map(|(id, n)| (n.left(), id))
            .collect();
        members.sort_unstable_by_key(|(left, _)| *left);
        members.into_iter().map(|(_, id)| id).collect()
    }

    /// Ids of every node whose labels fall inside `[left, right]`.
    fn subtree_ids(&self, left: i64, right: i64) -> HashSet<NodeId> {
        self.arena
            .iter()
            .filter(|(_, n)| n.left() >= left && n.right() <= right)
            .map(|(id, _)| id)
            .collect()
    }

    /// Span of the narrowest node strictly enclosing `[left, right]`,
    /// i.e. the direct parent. `None` for the root.
    fn parent_span(&self, left: i64, right: i64) -> Option<(i64, i64)> {
        self.arena
            .iter()
            .filter(|(_, n)| n.left() < left && right < n.right())
            .max_by_key(|(_, n)| n.left())
            .map(|(_, n)| (n.left(), n.right()))
    }
}
