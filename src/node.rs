use std::fmt;

/// A record in the nested set hierarchy.
///
/// Carries the three interval labels (`level`, `left`, `right`) plus an
/// opaque display name the engine never inspects. A `Node` holds no
/// behavior and performs no validation; the owning [`NestedSet`] is solely
/// responsible for keeping labels consistent. Mutating a registered node's
/// labels directly voids the container's invariant.
///
/// [`NestedSet`]: crate::tree::NestedSet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    level: i64,
    left: i64,
    right: i64,
    name: String,
}

impl Node {
    /// Creates an unattached node with zeroed labels and an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node with explicit labels, e.g. rehydrated from storage.
    pub fn with_labels(level: i64, left: i64, right: i64, name: impl Into<String>) -> Self {
        Self {
            level,
            left,
            right,
            name: name.into(),
        }
    }

    /// Depth from root; the root is level 0.
    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn left(&self) -> i64 {
        self.left
    }

    pub fn right(&self) -> i64 {
        self.right
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_level(&mut self, level: i64) {
        self.level = level;
    }

    pub fn set_left(&mut self, left: i64) {
        self.left = left;
    }

    pub fn set_right(&mut self, right: i64) {
        self.right = right;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of label slots the node's subtree occupies.
    pub fn width(&self) -> i64 {
        self.right - self.left + 1
    }

    /// A leaf spans exactly its own two labels.
    pub fn is_leaf(&self) -> bool {
        self.right == self.left + 1
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
