//! Nested set tree model.
//!
//! Stores a hierarchy of records in flat, link-free form: every node is
//! tagged with a `(level, left, right)` triple such that ancestor,
//! descendant, subtree and sibling-order queries reduce to integer
//! comparisons. The [`NestedSet`] container owns the labeling invariant
//! and exposes the structural operations (`add`, `delete`, `move_to`,
//! `shift`, `branch`); [`Node`] is the plain data record.
//!
//! Persistence, rendering and concurrency control are out of scope: a
//! caller rehydrates a stored tree through [`NestedSet::from_nodes`] and
//! serializes it back from [`NestedSet::branch`] plus each node's four
//! exposed fields. The container is not internally synchronized; wrap it
//! in a lock for shared access.
//!
//! ```
//! use nestedset::{NestedSet, Node};
//!
//! let mut tree = NestedSet::new();
//! let mut node = Node::new();
//! node.set_name("docs");
//! let docs = tree.add(node, None)?;
//! let chapter = tree.add(Node::new(), Some(docs))?;
//!
//! // Pre-order enumeration: root, docs, chapter.
//! let branch = tree.branch(None);
//! assert_eq!(branch, vec![tree.root(), docs, chapter]);
//! # Ok::<(), nestedset::TreeError>(())
//! ```

pub mod errors;
pub mod node;
pub mod tree;

pub use crate::errors::{TreeError, TreeResult};
pub use crate::node::Node;
pub use crate::tree::{NestedSet, NodeId};
