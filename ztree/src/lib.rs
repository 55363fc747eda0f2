pub mod aggregate;
pub mod morton;
pub mod tree;

pub use aggregate::Aggregate;
pub use tree::{build, walk, Node, Tree, Visit};
