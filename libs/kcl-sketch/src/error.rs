//! # Transform Errors
//!
//! Every failure leaves the caller's program untouched: transforms work on a
//! private copy and only hand it back on success.

use kcl_ast::PathToNode;
use thiserror::Error;

/// Errors raised by [`SketchLineHelper`](crate::SketchLineHelper) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The path does not address a node of the program.
    #[error("path {0} does not address a node")]
    PathNotFound(PathToNode),

    /// Neither the addressed node nor any ancestor is a pipe expression.
    #[error("no pipe expression at or above {0}")]
    NotAPipe(PathToNode),

    /// The addressed node is not a call expression.
    #[error("expected a call expression at {path}, found {found}")]
    NotACall { path: PathToNode, found: String },

    /// A referenced tag is absent from program memory.
    #[error("no segment tagged '{0}' in program memory")]
    SegmentNotFound(String),

    /// The primitive needs a referenced segment and none was given.
    #[error("{0} needs a referenced segment")]
    MissingReference(&'static str),

    /// The call's first argument does not have a shape the primitive accepts.
    #[error("unexpected argument for {fn_name}: {message}")]
    UnexpectedArgument {
        fn_name: &'static str,
        message: String,
    },

    /// A gesture point has a NaN or infinite coordinate.
    #[error("gesture coordinate is not finite: {0}")]
    NonFiniteCoordinate(f64),
}

impl TransformError {
    pub(crate) fn unexpected(fn_name: &'static str, message: impl Into<String>) -> Self {
        TransformError::UnexpectedArgument {
            fn_name,
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kcl_ast::PathField;

    #[test]
    fn test_error_display_includes_path() {
        let path = PathToNode::root().push_index(PathField::Body, 2);
        let err = TransformError::PathNotFound(path);
        assert_eq!(err.to_string(), "path body[2] does not address a node");
    }

    #[test]
    fn test_error_display_segment() {
        let err = TransformError::SegmentNotFound("seg07".into());
        assert!(err.to_string().contains("'seg07'"));
    }
}
