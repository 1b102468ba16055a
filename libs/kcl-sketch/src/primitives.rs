//! # Drawing Primitives
//!
//! The closed set of sketch calls the transform engine knows how to write.
//! Every table keyed by primitive is an exhaustive `match`, so a new variant
//! does not compile until each table has an entry for it.
//!
//! ## Gesture Values
//!
//! A gesture (`from`, `to`) is reduced to two numbers per primitive before
//! it becomes literals:
//!
//! | Primitive                  | values              |
//! |----------------------------|---------------------|
//! | `lineTo`                   | `[to.x, to.y]`      |
//! | `line`                     | `[dx, dy]`          |
//! | `xLineTo` / `yLineTo`      | `[to.x, to.y]` / `[to.y, to.x]` |
//! | `xLine` / `yLine`          | `[dx, dy]` / `[dy, dx]` |
//! | `angledLine`               | `[angle, length]`   |
//! | `angledLineOfXLength`      | `[angle, abs(dx)]`  |
//! | `angledLineOfYLength`      | `[angle, abs(dy)]`  |
//! | `angledLineToX` / `ToY`    | `[angle, to.x]` / `[angle, to.y]` |
//! | `angledLineThatIntersects` | `[angle, offset]`   |
//!
//! Single-value primitives store only the first value. Angles are degrees,
//! measured counter-clockwise from the positive x axis.

use glam::DVec2;
use kcl_ast::Expr;
use serde::{Deserialize, Serialize};

use crate::builders::{
    create_array, create_call_expression, create_object, create_pipe_substitution,
    create_string_literal,
};
use crate::error::TransformError;
use crate::helpers::PrimitiveHelper;
use crate::memory::SegmentRef;

/// A drawing call supported by the sketch tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SketchPrimitive {
    LineTo,
    Line,
    XLineTo,
    YLineTo,
    XLine,
    YLine,
    AngledLine,
    AngledLineOfXLength,
    AngledLineOfYLength,
    AngledLineToX,
    AngledLineToY,
    AngledLineThatIntersects,
}

/// What a transform callback produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackOutput {
    pub call_exp: Expr,
    /// The derived number the caller may want to show or constrain, such as
    /// the angle of an angled line or the offset of an intersecting line.
    pub value_used_in_transform: Option<f64>,
}

/// Builds a replacement call from the two gesture values and an optional
/// referenced segment.
pub type TransformCallback =
    fn([Expr; 2], Option<&SegmentRef>) -> Result<CallbackOutput, TransformError>;

/// How a primitive's first argument is laid out.
///
/// The key names the property holding the non-angle value once the argument
/// is in object form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgShape {
    /// `[x, y]`, or `{ to: [x, y] }`.
    Point,
    /// `n`, or `{ <key>: n }`.
    Scalar(&'static str),
    /// `[angle, n]`, or `{ angle, <key>: n }`.
    AnglePair(&'static str),
    /// Always `{ angle, offset, intersectTag }`.
    Intersect,
}

impl SketchPrimitive {
    pub const ALL: [SketchPrimitive; 12] = [
        SketchPrimitive::LineTo,
        SketchPrimitive::Line,
        SketchPrimitive::XLineTo,
        SketchPrimitive::YLineTo,
        SketchPrimitive::XLine,
        SketchPrimitive::YLine,
        SketchPrimitive::AngledLine,
        SketchPrimitive::AngledLineOfXLength,
        SketchPrimitive::AngledLineOfYLength,
        SketchPrimitive::AngledLineToX,
        SketchPrimitive::AngledLineToY,
        SketchPrimitive::AngledLineThatIntersects,
    ];

    /// Callee name used in source.
    pub const fn fn_name(self) -> &'static str {
        match self {
            SketchPrimitive::LineTo => "lineTo",
            SketchPrimitive::Line => "line",
            SketchPrimitive::XLineTo => "xLineTo",
            SketchPrimitive::YLineTo => "yLineTo",
            SketchPrimitive::XLine => "xLine",
            SketchPrimitive::YLine => "yLine",
            SketchPrimitive::AngledLine => "angledLine",
            SketchPrimitive::AngledLineOfXLength => "angledLineOfXLength",
            SketchPrimitive::AngledLineOfYLength => "angledLineOfYLength",
            SketchPrimitive::AngledLineToX => "angledLineToX",
            SketchPrimitive::AngledLineToY => "angledLineToY",
            SketchPrimitive::AngledLineThatIntersects => "angledLineThatIntersects",
        }
    }

    pub fn from_fn_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.fn_name() == name)
    }

    /// The callback that writes this primitive's call.
    pub fn create_callback(self) -> TransformCallback {
        match self {
            SketchPrimitive::LineTo => line_to_callback,
            SketchPrimitive::Line => line_callback,
            SketchPrimitive::XLineTo => x_line_to_callback,
            SketchPrimitive::YLineTo => y_line_to_callback,
            SketchPrimitive::XLine => x_line_callback,
            SketchPrimitive::YLine => y_line_callback,
            SketchPrimitive::AngledLine => angled_line_callback,
            SketchPrimitive::AngledLineOfXLength => angled_line_of_x_length_callback,
            SketchPrimitive::AngledLineOfYLength => angled_line_of_y_length_callback,
            SketchPrimitive::AngledLineToX => angled_line_to_x_callback,
            SketchPrimitive::AngledLineToY => angled_line_to_y_callback,
            SketchPrimitive::AngledLineThatIntersects => angled_line_that_intersects_callback,
        }
    }

    /// Transform helper for this primitive with the default configuration.
    pub fn helper(self) -> PrimitiveHelper {
        PrimitiveHelper::new(self)
    }

    pub(crate) const fn shape(self) -> ArgShape {
        match self {
            SketchPrimitive::LineTo | SketchPrimitive::Line => ArgShape::Point,
            SketchPrimitive::XLineTo | SketchPrimitive::YLineTo => ArgShape::Scalar("to"),
            SketchPrimitive::XLine | SketchPrimitive::YLine => ArgShape::Scalar("length"),
            SketchPrimitive::AngledLine
            | SketchPrimitive::AngledLineOfXLength
            | SketchPrimitive::AngledLineOfYLength => ArgShape::AnglePair("length"),
            SketchPrimitive::AngledLineToX | SketchPrimitive::AngledLineToY => {
                ArgShape::AnglePair("to")
            }
            SketchPrimitive::AngledLineThatIntersects => ArgShape::Intersect,
        }
    }

    /// Reduces a gesture to this primitive's two values (see module docs).
    ///
    /// `angledLineThatIntersects` measures its offset against `reference`
    /// and fails with [`TransformError::MissingReference`] without one.
    pub fn gesture_values(
        self,
        from: DVec2,
        to: DVec2,
        reference: Option<&SegmentRef>,
    ) -> Result<[f64; 2], TransformError> {
        if let Some(bad) = [from.x, from.y, to.x, to.y].into_iter().find(|v| !v.is_finite()) {
            return Err(TransformError::NonFiniteCoordinate(bad));
        }
        let delta = to - from;
        let angle = delta.y.atan2(delta.x).to_degrees();
        let values = match self {
            SketchPrimitive::LineTo | SketchPrimitive::XLineTo => [to.x, to.y],
            SketchPrimitive::YLineTo => [to.y, to.x],
            SketchPrimitive::Line | SketchPrimitive::XLine => [delta.x, delta.y],
            SketchPrimitive::YLine => [delta.y, delta.x],
            SketchPrimitive::AngledLine => [angle, delta.length()],
            SketchPrimitive::AngledLineOfXLength => [angle, delta.x.abs()],
            SketchPrimitive::AngledLineOfYLength => [angle, delta.y.abs()],
            SketchPrimitive::AngledLineToX => [angle, to.x],
            SketchPrimitive::AngledLineToY => [angle, to.y],
            SketchPrimitive::AngledLineThatIntersects => {
                let segment = reference.ok_or(TransformError::MissingReference(self.fn_name()))?;
                [angle, segment.offset_of(to)]
            }
        };
        Ok(values)
    }

    /// Writes `fnName(<first argument>, %)` from the two values.
    pub fn build_call(
        self,
        [first, second]: [Expr; 2],
        reference: Option<&SegmentRef>,
    ) -> Result<CallbackOutput, TransformError> {
        let shape = self.shape();
        let value_used_in_transform = match shape {
            ArgShape::AnglePair(_) => first.as_number(),
            ArgShape::Intersect => second.as_number(),
            ArgShape::Point | ArgShape::Scalar(_) => None,
        };
        let argument = match shape {
            ArgShape::Point | ArgShape::AnglePair(_) => create_array(vec![first, second]),
            ArgShape::Scalar(_) => first,
            ArgShape::Intersect => {
                let segment = reference.ok_or(TransformError::MissingReference(self.fn_name()))?;
                create_object([
                    ("angle", first),
                    ("offset", second),
                    ("intersectTag", create_string_literal(&segment.name)),
                ])
            }
        };
        Ok(CallbackOutput {
            call_exp: create_call_expression(
                self.fn_name(),
                vec![argument, create_pipe_substitution()],
            ),
            value_used_in_transform,
        })
    }
}

// =============================================================================
// CALLBACKS
// =============================================================================

fn line_to_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::LineTo.build_call(args, reference)
}

fn line_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::Line.build_call(args, reference)
}

fn x_line_to_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::XLineTo.build_call(args, reference)
}

fn y_line_to_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::YLineTo.build_call(args, reference)
}

fn x_line_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::XLine.build_call(args, reference)
}

fn y_line_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::YLine.build_call(args, reference)
}

fn angled_line_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::AngledLine.build_call(args, reference)
}

fn angled_line_of_x_length_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::AngledLineOfXLength.build_call(args, reference)
}

fn angled_line_of_y_length_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::AngledLineOfYLength.build_call(args, reference)
}

fn angled_line_to_x_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::AngledLineToX.build_call(args, reference)
}

fn angled_line_to_y_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::AngledLineToY.build_call(args, reference)
}

fn angled_line_that_intersects_callback(
    args: [Expr; 2],
    reference: Option<&SegmentRef>,
) -> Result<CallbackOutput, TransformError> {
    SketchPrimitive::AngledLineThatIntersects.build_call(args, reference)
}

// =============================================================================
// TESTS
// =============================================================================
