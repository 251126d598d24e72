//! REST path builder for class queries

use std::fmt;

use aci_inventory_api::Level;

/// Fabric node list
pub const NODES_PATH: &str = "api/node/class/topSystem.json";

/// Pod every node is addressed under unless overridden
pub const DEFAULT_POD: u32 = 1;

const SUBTREE_SUFFIX: &str = "?query-target=children";

/// Class query path builder
///
/// Produces `api/node/class/topology/pod-<pod>/node-<node>/<class>.json`,
/// with `?query-target=children` for detail queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassQuery {
    pod: u32,
    node: String,
    class: String,
    level: Level,
}

impl ClassQuery {
    /// Brief query for `class` on `node` in the default pod
    pub fn new(node: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            pod: DEFAULT_POD,
            node: node.into(),
            class: class.into(),
            level: Level::Brief,
        }
    }

    #[must_use]
    pub fn pod(mut self, pod: u32) -> Self {
        self.pod = pod;
        self
    }

    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Build the controller-relative path
    #[must_use]
    pub fn build(&self) -> String {
        let mut path = format!(
            "api/node/class/topology/pod-{}/node-{}/{}.json",
            self.pod, self.node, self.class
        );
        if self.level == Level::Detail {
            path.push_str(SUBTREE_SUFFIX);
        }
        path
    }
}

impl fmt::Display for ClassQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.build())
    }
}

/// Path for `mo_class` on `node_id` in pod 1
#[must_use]
pub fn class_uri(level: Level, mo_class: &str, node_id: &str) -> String {
    ClassQuery::new(node_id, mo_class).level(level).build()
}
