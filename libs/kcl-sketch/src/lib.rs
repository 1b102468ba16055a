//! # KCL Sketch Transforms
//!
//! Gesture-driven rewrites of a KCL [`Program`](kcl_ast::Program): add a
//! drawing call to a pipe, move an existing call's coordinates, or tag a
//! call so later calls can refer to it.
//!
//! ## Architecture
//!
//! ```text
//! Program + PathToNode + ProgramMemory + gesture
//!     → SketchPrimitive::helper() → SketchLineHelper::{add, update_args, add_tag}
//!     → new Program + PathToNode
//! ```
//!
//! Transforms never re-lex source text. The input tree is left as it was,
//! so a caller may keep rendering it until the new tree is ready.

pub mod builders;
pub mod error;
pub mod helpers;
pub mod memory;
pub mod primitives;
pub mod tag;

pub use error::TransformError;
pub use helpers::{
    AddCall, AddResult, AddTagResult, ModifyAstBase, PrimitiveHelper, SketchLineHelper,
    UpdateArgs, UpdateResult,
};
pub use memory::{MemoryItem, ProgramMemory, SegmentPath, SegmentRef, SketchGroup};
pub use primitives::{CallbackOutput, SketchPrimitive, TransformCallback};
pub use tag::unique_tag;
