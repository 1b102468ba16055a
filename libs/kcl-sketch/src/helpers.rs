//! # Sketch Line Helpers
//!
//! Turns canvas gestures into edits of a [`Program`]. Each operation clones
//! the input program, edits the clone through a [`PathToNode`] and returns
//! it; the input is never touched, and on error the clone is dropped.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//! use kcl_ast::{PathField, PathToNode};
//! use kcl_sketch::{AddCall, ModifyAstBase, ProgramMemory, SketchLineHelper, SketchPrimitive};
//!
//! let program = kcl_parser::parse("const part = startSketchAt([0, 0]) |> line([1, 1], %)").unwrap();
//! let memory = ProgramMemory::new();
//! let path = PathToNode::root()
//!     .push_index(PathField::Body, 0)
//!     .push_index(PathField::Declarations, 0)
//!     .push(PathField::Init);
//! let base = ModifyAstBase { node: &program, previous_program_memory: &memory, path_to_node: &path };
//!
//! let result = SketchPrimitive::LineTo
//!     .helper()
//!     .add(AddCall::new(base, DVec2::new(1.0, 1.0), DVec2::new(3.0, 2.0)))
//!     .unwrap();
//! assert_eq!(result.path_to_node.to_string(), "body[0].declarations[0].init.body[2]");
//! ```

use config::constants::SketchConfig;
use glam::DVec2;
use kcl_ast::{
    resolve_path, resolve_path_mut, CallExpression, Expr, NodeMut, NodeRef, PathField, PathToNode,
    PipeExpression, Program,
};
use log::{debug, warn};

use crate::builders::{
    create_array, create_literal, create_object, create_string_literal, set_property,
};
use crate::error::TransformError;
use crate::memory::{ProgramMemory, SegmentRef};
use crate::primitives::{ArgShape, SketchPrimitive, TransformCallback};
use crate::tag::unique_tag;

// =============================================================================
// REQUESTS & RESULTS
// =============================================================================

/// Inputs shared by every transform.
#[derive(Debug, Clone, Copy)]
pub struct ModifyAstBase<'a> {
    pub node: &'a Program,
    pub previous_program_memory: &'a ProgramMemory,
    pub path_to_node: &'a PathToNode,
}

/// Request to write a new drawing call into a pipe.
#[derive(Clone, Copy)]
pub struct AddCall<'a> {
    pub base: ModifyAstBase<'a>,
    pub from: DVec2,
    pub to: DVec2,
    /// Tag of a segment in `previous_program_memory` the new call refers to.
    pub referenced_segment: Option<&'a str>,
    /// Replace the stage addressed by the path instead of adding one.
    pub replace_existing: bool,
    /// Callback used when replacing. Defaults to the primitive's own.
    pub create_callback: Option<TransformCallback>,
    /// Insert right after the addressed stage instead of appending.
    pub splice_between: bool,
}

impl<'a> AddCall<'a> {
    pub fn new(base: ModifyAstBase<'a>, from: DVec2, to: DVec2) -> Self {
        Self {
            base,
            from,
            to,
            referenced_segment: None,
            replace_existing: false,
            create_callback: None,
            splice_between: false,
        }
    }

    pub fn referencing(mut self, tag: &'a str) -> Self {
        self.referenced_segment = Some(tag);
        self
    }

    pub fn replacing(mut self, callback: Option<TransformCallback>) -> Self {
        self.replace_existing = true;
        self.create_callback = callback;
        self
    }

    pub fn splicing(mut self) -> Self {
        self.splice_between = true;
        self
    }
}

/// Request to rewrite the coordinates of an existing call.
#[derive(Debug, Clone, Copy)]
pub struct UpdateArgs<'a> {
    pub base: ModifyAstBase<'a>,
    pub from: DVec2,
    pub to: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddResult {
    pub modified_ast: Program,
    /// Path to the written stage in `modified_ast`.
    pub path_to_node: PathToNode,
    pub value_used_in_transform: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    pub modified_ast: Program,
    pub path_to_node: PathToNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddTagResult {
    pub modified_ast: Program,
    pub tag: String,
}

// =============================================================================
// HELPER TRAIT
// =============================================================================

/// The three gesture-driven edits a drawing primitive supports.
pub trait SketchLineHelper {
    /// Writes a new call for the gesture into the pipe at or above the path.
    fn add(&self, call: AddCall<'_>) -> Result<AddResult, TransformError>;

    /// Replaces the coordinate values of the call at the path, keeping every
    /// other property of its argument object.
    fn update_args(&self, args: UpdateArgs<'_>) -> Result<UpdateResult, TransformError>;

    /// Gives the call at the path a tag, or reports the one it already has.
    fn add_tag(&self, base: ModifyAstBase<'_>) -> Result<AddTagResult, TransformError>;
}

/// [`SketchLineHelper`] for one [`SketchPrimitive`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveHelper {
    primitive: SketchPrimitive,
    config: SketchConfig,
}

impl PrimitiveHelper {
    pub fn new(primitive: SketchPrimitive) -> Self {
        Self {
            primitive,
            config: SketchConfig::default(),
        }
    }

    /// Uses `config` for literal rounding and tag names.
    pub fn with_config(mut self, config: SketchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn primitive(&self) -> SketchPrimitive {
        self.primitive
    }

    fn fn_name(&self) -> &'static str {
        self.primitive.fn_name()
    }

    fn literals(&self, values: [f64; 2]) -> [Expr; 2] {
        values.map(|v| create_literal(v, &self.config))
    }

    fn log<T>(
        &self,
        operation: &str,
        path: &PathToNode,
        result: Result<T, TransformError>,
    ) -> Result<T, TransformError> {
        match &result {
            Ok(_) => debug!("{} {operation} applied at {path}", self.fn_name()),
            Err(e) => warn!("{} {operation} failed at {path}: {e}", self.fn_name()),
        }
        result
    }
}

impl SketchLineHelper for PrimitiveHelper {
    fn add(&self, call: AddCall<'_>) -> Result<AddResult, TransformError> {
        let result = self.try_add(&call);
        self.log("add", call.base.path_to_node, result)
    }

    fn update_args(&self, args: UpdateArgs<'_>) -> Result<UpdateResult, TransformError> {
        let result = self.try_update_args(&args);
        self.log("update_args", args.base.path_to_node, result)
    }

    fn add_tag(&self, base: ModifyAstBase<'_>) -> Result<AddTagResult, TransformError> {
        let result = self.try_add_tag(&base);
        self.log("add_tag", base.path_to_node, result)
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl PrimitiveHelper {
    fn try_add(&self, call: &AddCall<'_>) -> Result<AddResult, TransformError> {
        let path = call.base.path_to_node;
        let reference = call
            .referenced_segment
            .map(|tag| find_segment(call.base.previous_program_memory, tag))
            .transpose()?;

        let mut ast = call.base.node.clone();
        let (pipe_path, stage) = locate_pipe(&ast, path)?;
        let args = self.literals(self.primitive.gesture_values(call.from, call.to, reference)?);
        let pipe = pipe_mut(&mut ast, &pipe_path)?;

        let (index, value_used_in_transform) = if call.replace_existing {
            let index = stage.ok_or_else(|| not_a_call(path, "PipeExpression"))?;
            let slot = pipe
                .body
                .get_mut(index)
                .ok_or_else(|| TransformError::PathNotFound(path.clone()))?;
            if !matches!(slot, Expr::CallExpression(_)) {
                return Err(not_a_call(path, slot.type_name()));
            }
            let callback = call
                .create_callback
                .unwrap_or_else(|| self.primitive.create_callback());
            let output = callback(args, reference)?;
            *slot = output.call_exp;
            (index, output.value_used_in_transform)
        } else {
            let output = self.primitive.build_call(args, reference)?;
            let index = if call.splice_between {
                let after = stage.ok_or_else(|| not_a_call(path, "PipeExpression"))?;
                pipe.body.insert(after + 1, output.call_exp);
                after + 1
            } else {
                pipe.body.push(output.call_exp);
                pipe.body.len() - 1
            };
            (index, None)
        };

        Ok(AddResult {
            modified_ast: ast,
            path_to_node: pipe_path.push_index(PathField::Body, index),
            value_used_in_transform,
        })
    }

    fn try_update_args(&self, args: &UpdateArgs<'_>) -> Result<UpdateResult, TransformError> {
        let path = args.base.path_to_node;
        let fn_name = self.fn_name();
        let mut ast = args.base.node.clone();
        let call = call_mut(&mut ast, path)?;
        let first = first_argument(call, fn_name)?;

        let reference = match self.primitive.shape() {
            ArgShape::Intersect => {
                let tag = intersect_tag(first, fn_name)?;
                Some(find_segment(args.base.previous_program_memory, &tag)?)
            }
            ArgShape::Point | ArgShape::Scalar(_) | ArgShape::AnglePair(_) => None,
        };
        let [a, b] = self.literals(self.primitive.gesture_values(args.from, args.to, reference)?);

        match (self.primitive.shape(), first) {
            (ArgShape::Point | ArgShape::AnglePair(_), Expr::ArrayExpression(array)) => {
                array.elements = vec![a, b];
            }
            (ArgShape::Point, Expr::ObjectExpression(object)) => {
                set_property(object, "to", create_array(vec![a, b]));
            }
            (ArgShape::Scalar(key), Expr::ObjectExpression(object)) => {
                set_property(object, key, a);
            }
            (ArgShape::Scalar(_), value) => *value = a,
            (ArgShape::AnglePair(key), Expr::ObjectExpression(object)) => {
                set_property(object, "angle", a);
                set_property(object, key, b);
            }
            (ArgShape::Intersect, Expr::ObjectExpression(object)) => {
                set_property(object, "angle", a);
                set_property(object, "offset", b);
            }
            (_, other) => {
                return Err(TransformError::unexpected(
                    fn_name,
                    format!("cannot update a {} argument", other.type_name()),
                ));
            }
        }

        Ok(UpdateResult {
            modified_ast: ast,
            path_to_node: path.clone(),
        })
    }

    fn try_add_tag(&self, base: &ModifyAstBase<'_>) -> Result<AddTagResult, TransformError> {
        let path = base.path_to_node;
        let fn_name = self.fn_name();
        let tag = unique_tag(base.node, &self.config);
        let mut ast = base.node.clone();
        let call = call_mut(&mut ast, path)?;
        let first = first_argument(call, fn_name)?;

        match first {
            Expr::ObjectExpression(object) => {
                if let Some(existing) = object.get("tag") {
                    let existing = existing
                        .as_str()
                        .ok_or_else(|| TransformError::unexpected(fn_name, "tag is not a string"))?
                        .to_string();
                    return Ok(AddTagResult {
                        modified_ast: ast,
                        tag: existing,
                    });
                }
                set_property(object, "tag", create_string_literal(&tag));
            }
            bare => {
                let value = std::mem::replace(bare, create_string_literal(""));
                *bare = self.tagged_argument(value, &tag)?;
            }
        }

        Ok(AddTagResult {
            modified_ast: ast,
            tag,
        })
    }

    /// Object form of a bare first argument, with `tag` appended.
    fn tagged_argument(&self, value: Expr, tag: &str) -> Result<Expr, TransformError> {
        let fn_name = self.fn_name();
        let tag = create_string_literal(tag);
        match (self.primitive.shape(), value) {
            (ArgShape::Point, value) => Ok(create_object([("to", value), ("tag", tag)])),
            (ArgShape::Scalar(key), value) => Ok(create_object([(key, value), ("tag", tag)])),
            (ArgShape::AnglePair(key), Expr::ArrayExpression(array)) if array.elements.len() == 2 => {
                let mut elements = array.elements.into_iter();
                match (elements.next(), elements.next()) {
                    (Some(angle), Some(value)) => Ok(create_object([
                        ("angle", angle),
                        (key, value),
                        ("tag", tag),
                    ])),
                    _ => Err(TransformError::unexpected(fn_name, "expected [angle, value]")),
                }
            }
            (ArgShape::AnglePair(_), _) => {
                Err(TransformError::unexpected(fn_name, "expected [angle, value]"))
            }
            (ArgShape::Intersect, other) => Err(TransformError::unexpected(
                fn_name,
                format!("expected an object, found {}", other.type_name()),
            )),
        }
    }
}

// =============================================================================
// TREE ACCESS
// =============================================================================

/// Finds the pipe at or above `path`, returning its path and the index of
/// the stage `path` goes through, if any.
fn locate_pipe(
    program: &Program,
    path: &PathToNode,
) -> Result<(PathToNode, Option<usize>), TransformError> {
    if resolve_path(program, path).is_none() {
        return Err(TransformError::PathNotFound(path.clone()));
    }
    for len in (0..=path.len()).rev() {
        let prefix = path.prefix(len);
        if let Some(NodeRef::Expr(Expr::PipeExpression(_))) = resolve_path(program, &prefix) {
            let stage = path
                .steps()
                .get(len)
                .filter(|step| step.field == PathField::Body)
                .and_then(|step| step.index);
            return Ok((prefix, stage));
        }
    }
    Err(TransformError::NotAPipe(path.clone()))
}

fn pipe_mut<'a>(
    program: &'a mut Program,
    path: &PathToNode,
) -> Result<&'a mut PipeExpression, TransformError> {
    match resolve_path_mut(program, path).and_then(NodeMut::into_expr) {
        Some(Expr::PipeExpression(pipe)) => Ok(pipe),
        _ => Err(TransformError::NotAPipe(path.clone())),
    }
}

fn call_mut<'a>(
    program: &'a mut Program,
    path: &PathToNode,
) -> Result<&'a mut CallExpression, TransformError> {
    let node = resolve_path_mut(program, path)
        .ok_or_else(|| TransformError::PathNotFound(path.clone()))?;
    match node.into_expr() {
        Some(Expr::CallExpression(call)) => Ok(call),
        Some(other) => Err(not_a_call(path, other.type_name())),
        None => Err(not_a_call(path, "non-expression node")),
    }
}

fn first_argument<'a>(
    call: &'a mut CallExpression,
    fn_name: &'static str,
) -> Result<&'a mut Expr, TransformError> {
    call.arguments
        .first_mut()
        .ok_or_else(|| TransformError::unexpected(fn_name, "call has no arguments"))
}

fn intersect_tag(argument: &Expr, fn_name: &'static str) -> Result<String, TransformError> {
    match argument {
        Expr::ObjectExpression(object) => object
            .get("intersectTag")
            .and_then(Expr::as_str)
            .map(str::to_string)
            .ok_or_else(|| TransformError::unexpected(fn_name, "missing intersectTag")),
        other => Err(TransformError::unexpected(
            fn_name,
            format!("expected an object, found {}", other.type_name()),
        )),
    }
}

fn find_segment<'m>(memory: &'m ProgramMemory, tag: &str) -> Result<&'m SegmentRef, TransformError> {
    memory
        .find_segment_by_tag(tag)
        .ok_or_else(|| TransformError::SegmentNotFound(tag.to_string()))
}

fn not_a_call(path: &PathToNode, found: &str) -> TransformError {
    TransformError::NotACall {
        path: path.clone(),
        found: found.to_string(),
    }
}
