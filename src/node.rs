use std::{io, sync::Arc};

use crate::{log::ScopedLog, test::TestFnHandle};

/// Shared handle to a [`TestNode`].
///
/// Handles are reference counted so the same node can appear in several child
/// lists or be reused across tree constructions. Note the hazard: a node
/// shared by two parents within the same run has its failures incorporated by
/// each parent independently and is therefore double-counted. Share nodes
/// across runs, not across parents in one run, unless that is what you want.
pub type NodeHandle = Arc<TestNode>;

/// A node in a test tree, either a leaf procedure or a group of children.
///
/// Every node owns a [`ScopedLog`] named after it. After [`run`](Self::run)
/// the log holds every failure attributable to the node and its descendants,
/// each message carrying the full `::`-joined chain of names down to the
/// leaf that produced it.
#[derive(Debug)]
pub struct TestNode {
    log: ScopedLog,
    kind: NodeKind,
}

#[derive(Debug)]
enum NodeKind {
    Leaf(TestFnHandle),
    Group(Vec<NodeHandle>),
}

/// Create a leaf node that runs `procedure`.
pub fn leaf<F>(name: impl Into<String>, procedure: F) -> NodeHandle
where
    F: Fn(&ScopedLog) + Send + Sync + 'static,
{
    TestNode::leaf(name, TestFnHandle::from_boxed(procedure))
}

/// Create a group node over `children`.
pub fn group(
    name: impl Into<String>,
    children: impl IntoIterator<Item = NodeHandle>,
) -> NodeHandle {
    TestNode::group(name, children)
}

impl TestNode {
    pub fn leaf(name: impl Into<String>, procedure: TestFnHandle) -> NodeHandle {
        Arc::new(Self {
            log: ScopedLog::new(name),
            kind: NodeKind::Leaf(procedure),
        })
    }

    pub fn group(
        name: impl Into<String>,
        children: impl IntoIterator<Item = NodeHandle>,
    ) -> NodeHandle {
        Arc::new(Self {
            log: ScopedLog::new(name),
            kind: NodeKind::Group(children.into_iter().collect()),
        })
    }

    pub fn name(&self) -> &str {
        self.log.qualifying_name()
    }

    /// Execute this node.
    ///
    /// A leaf invokes its procedure with the node's own log. A group runs
    /// each child and incorporates the child's log into its own. The order
    /// in which children run is unspecified; procedures must be
    /// self-contained and safe to run in any order, or concurrently under a
    /// future runner. `run` never aborts on failures, they are only recorded.
    ///
    /// The log is strictly additive: running a node again re-executes it and
    /// appends on top of the messages already present. Call `run` once per
    /// node per reporting cycle.
    pub fn run(&self) {
        match &self.kind {
            NodeKind::Leaf(procedure) => procedure.call(&self.log),
            NodeKind::Group(children) => {
                for child in children {
                    child.run();
                    self.log.incorporate(&child.log);
                }
            }
        }
    }

    /// Number of failures recorded at this node, equal to its log's length.
    pub fn error_count(&self) -> usize {
        self.log.len()
    }

    /// Write this node's failures to `sink`, one fully qualified line each.
    pub fn report(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        self.log.report(sink)
    }
}
