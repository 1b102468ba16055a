//! # KCL AST Crate
//!
//! Typed, position-annotated syntax tree for KCL programs, together with the
//! pieces every consumer of the tree needs:
//!
//! - [`path`]: `PathToNode` addressing, resolution and lookup by source range
//! - [`printer`]: canonical source rendering
//! - [`visitor`]: read-only and mutable tree walks
//!
//! ## Design Principles
//!
//! - **Typed AST**: All nodes are strongly typed Rust enums/structs
//! - **Source Mapping**: Every parsed node carries `Span { start, end }`
//! - **No Evaluation**: Pure syntax, no semantic analysis

pub mod ast;
pub mod path;
pub mod printer;
pub mod span;
pub mod visitor;

// Re-exports for convenience
pub use ast::*;
pub use path::{
    path_from_source_range, path_to_node, resolve_path, resolve_path_mut, NodeMut, NodeRef,
    PathField, PathStep, PathToNode,
};
pub use printer::print;
pub use span::Span;
pub use visitor::{Visitor, VisitorMut};
