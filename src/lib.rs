//! Composable tree-structured test suites.
//!
//! Leaf procedures and named groups compose into a tree of [`TestNode`]s.
//! Running the root executes every leaf and flattens all failures into one
//! list of `::`-scoped messages, each naming the exact path to the leaf
//! that produced it.
//!
//! ```
//! use treetest::{group, leaf, log::ScopedLog};
//!
//! let root = group("suite", [
//!     leaf("math", |log: &ScopedLog| {
//!         log.append_if("one plus one", 1 + 1 != 2);
//!     }),
//!     group("strings", [
//!         leaf("upper", |log: &ScopedLog| {
//!             log.fail_if(!"a".to_uppercase().eq("A"));
//!         }),
//!     ]),
//! ]);
//!
//! root.run();
//! assert_eq!(root.error_count(), 0);
//! ```

pub mod log;

mod node;
pub use node::*;

mod harness;
pub use harness::*;
