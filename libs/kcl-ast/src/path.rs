//! # Node Paths
//!
//! A [`PathToNode`] addresses one node inside a [`Program`] as the sequence
//! of `(field, index)` steps taken from the root. Paths are how editor
//! selections and transform results refer to nodes across program versions.
//!
//! ```rust
//! use kcl_ast::path::{PathField, PathToNode};
//!
//! let path = PathToNode::root()
//!     .push_index(PathField::Body, 0)
//!     .push_index(PathField::Declarations, 0)
//!     .push(PathField::Init);
//! assert_eq!(path.to_string(), "body[0].declarations[0].init");
//! ```

use std::fmt;

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::{Deserialize, Serialize};
use stacker::maybe_grow;

use crate::ast::*;
use crate::span::Span;

// =============================================================================
// PATH TYPES
// =============================================================================

/// Child slot names a path may traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathField {
    Body,
    Declarations,
    Id,
    Init,
    Expression,
    Argument,
    Arguments,
    Callee,
    Left,
    Right,
    Params,
    Elements,
    Properties,
    Key,
    Value,
}

impl PathField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PathField::Body => "body",
            PathField::Declarations => "declarations",
            PathField::Id => "id",
            PathField::Init => "init",
            PathField::Expression => "expression",
            PathField::Argument => "argument",
            PathField::Arguments => "arguments",
            PathField::Callee => "callee",
            PathField::Left => "left",
            PathField::Right => "right",
            PathField::Params => "params",
            PathField::Elements => "elements",
            PathField::Properties => "properties",
            PathField::Key => "key",
            PathField::Value => "value",
        }
    }
}

/// One step: a field, plus an index when the field holds a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub field: PathField,
    pub index: Option<usize>,
}

impl PathStep {
    pub const fn field(field: PathField) -> Self {
        Self { field, index: None }
    }

    pub const fn indexed(field: PathField, index: usize) -> Self {
        Self {
            field,
            index: Some(index),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.field.as_str(), i),
            None => f.write_str(self.field.as_str()),
        }
    }
}

/// Root-relative address of a node. The empty path addresses the program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathToNode(Vec<PathStep>);

impl PathToNode {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a scalar field step.
    pub fn push(mut self, field: PathField) -> Self {
        self.0.push(PathStep::field(field));
        self
    }

    /// Appends a list field step.
    pub fn push_index(mut self, field: PathField, index: usize) -> Self {
        self.0.push(PathStep::indexed(field, index));
        self
    }

    pub fn push_step(mut self, step: PathStep) -> Self {
        self.0.push(step);
        self
    }

    /// The first `len` steps.
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.prefix(self.0.len() - 1))
        }
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.0.last()
    }

    pub fn starts_with(&self, other: &PathToNode) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl From<Vec<PathStep>> for PathToNode {
    fn from(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for PathToNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

// =============================================================================
// NODE REFERENCES
// =============================================================================

/// Shared reference to any addressable node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Declarator(&'a VariableDeclarator),
    Block(&'a BlockStatement),
    Expr(&'a Expr),
    Identifier(&'a Identifier),
    Property(&'a ObjectProperty),
}

/// Mutable reference to any addressable node.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Program(&'a mut Program),
    Statement(&'a mut Statement),
    Declarator(&'a mut VariableDeclarator),
    Block(&'a mut BlockStatement),
    Expr(&'a mut Expr),
    Identifier(&'a mut Identifier),
    Property(&'a mut ObjectProperty),
}

impl<'a> NodeRef<'a> {
    pub fn span(&self) -> Span {
        match self {
            NodeRef::Program(n) => n.span,
            NodeRef::Statement(n) => n.span(),
            NodeRef::Declarator(n) => n.span,
            NodeRef::Block(n) => n.span,
            NodeRef::Expr(n) => n.span(),
            NodeRef::Identifier(n) => n.span,
            NodeRef::Property(n) => n.span,
        }
    }

    pub fn as_expr(&self) -> Option<&'a Expr> {
        match *self {
            NodeRef::Expr(e) => Some(e),
            _ => None,
        }
    }

    /// Identity comparison: same node kind at the same address.
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.addr() == other.addr()
    }

    fn addr(&self) -> *const () {
        match *self {
            NodeRef::Program(n) => n as *const Program as *const (),
            NodeRef::Statement(n) => n as *const Statement as *const (),
            NodeRef::Declarator(n) => n as *const VariableDeclarator as *const (),
            NodeRef::Block(n) => n as *const BlockStatement as *const (),
            NodeRef::Expr(n) => n as *const Expr as *const (),
            NodeRef::Identifier(n) => n as *const Identifier as *const (),
            NodeRef::Property(n) => n as *const ObjectProperty as *const (),
        }
    }

    /// Follows a single step, or `None` when the node has no such child.
    pub fn child(self, step: PathStep) -> Option<NodeRef<'a>> {
        use PathField as F;
        match (self, step.field, step.index) {
            (NodeRef::Program(p), F::Body, Some(i)) => p.body.get(i).map(NodeRef::Statement),
            (NodeRef::Block(b), F::Body, Some(i)) => b.body.get(i).map(NodeRef::Statement),
            (NodeRef::Statement(s), field, index) => match (s, field, index) {
                (Statement::VariableDeclaration(d), F::Declarations, Some(i)) => {
                    d.declarations.get(i).map(NodeRef::Declarator)
                }
                (Statement::ExpressionStatement(e), F::Expression, None) => {
                    Some(NodeRef::Expr(&e.expression))
                }
                (Statement::ReturnStatement(r), F::Argument, None) => {
                    Some(NodeRef::Expr(&r.argument))
                }
                _ => None,
            },
            (NodeRef::Declarator(d), F::Id, None) => Some(NodeRef::Identifier(&d.id)),
            (NodeRef::Declarator(d), F::Init, None) => Some(NodeRef::Expr(&d.init)),
            (NodeRef::Property(p), F::Key, None) => Some(NodeRef::Identifier(&p.key)),
            (NodeRef::Property(p), F::Value, None) => Some(NodeRef::Expr(&p.value)),
            (NodeRef::Expr(e), field, index) => match (e, field, index) {
                (Expr::BinaryExpression(b), F::Left, None) => Some(NodeRef::Expr(&b.left)),
                (Expr::BinaryExpression(b), F::Right, None) => Some(NodeRef::Expr(&b.right)),
                (Expr::CallExpression(c), F::Callee, None) => Some(NodeRef::Identifier(&c.callee)),
                (Expr::CallExpression(c), F::Arguments, Some(i)) => {
                    c.arguments.get(i).map(NodeRef::Expr)
                }
                (Expr::FunctionExpression(f), F::Params, Some(i)) => {
                    f.params.get(i).map(NodeRef::Identifier)
                }
                (Expr::FunctionExpression(f), F::Body, None) => Some(NodeRef::Block(&f.body)),
                (Expr::SketchExpression(s), F::Body, None) => Some(NodeRef::Block(&s.body)),
                (Expr::PipeExpression(p), F::Body, Some(i)) => p.body.get(i).map(NodeRef::Expr),
                (Expr::ArrayExpression(a), F::Elements, Some(i)) => {
                    a.elements.get(i).map(NodeRef::Expr)
                }
                (Expr::ObjectExpression(o), F::Properties, Some(i)) => {
                    o.properties.get(i).map(NodeRef::Property)
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// All direct children in source order, with the step reaching each.
    pub fn children(self) -> Vec<(PathStep, NodeRef<'a>)> {
        use PathField as F;
        fn list<'a, T>(
            field: PathField,
            items: &'a [T],
            wrap: fn(&'a T) -> NodeRef<'a>,
        ) -> Vec<(PathStep, NodeRef<'a>)> {
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (PathStep::indexed(field, i), wrap(item)))
                .collect()
        }

        match self {
            NodeRef::Program(p) => list(F::Body, &p.body, NodeRef::Statement),
            NodeRef::Block(b) => list(F::Body, &b.body, NodeRef::Statement),
            NodeRef::Statement(Statement::VariableDeclaration(d)) => {
                list(F::Declarations, &d.declarations, NodeRef::Declarator)
            }
            NodeRef::Statement(Statement::ExpressionStatement(e)) => {
                vec![(PathStep::field(F::Expression), NodeRef::Expr(&e.expression))]
            }
            NodeRef::Statement(Statement::ReturnStatement(r)) => {
                vec![(PathStep::field(F::Argument), NodeRef::Expr(&r.argument))]
            }
            NodeRef::Declarator(d) => vec![
                (PathStep::field(F::Id), NodeRef::Identifier(&d.id)),
                (PathStep::field(F::Init), NodeRef::Expr(&d.init)),
            ],
            NodeRef::Property(p) => vec![
                (PathStep::field(F::Key), NodeRef::Identifier(&p.key)),
                (PathStep::field(F::Value), NodeRef::Expr(&p.value)),
            ],
            NodeRef::Identifier(_) => Vec::new(),
            NodeRef::Expr(e) => match e {
                Expr::Identifier(_) | Expr::Literal(_) | Expr::PipeSubstitution(_) => Vec::new(),
                Expr::BinaryExpression(b) => vec![
                    (PathStep::field(F::Left), NodeRef::Expr(&b.left)),
                    (PathStep::field(F::Right), NodeRef::Expr(&b.right)),
                ],
                Expr::CallExpression(c) => {
                    let mut out = vec![(PathStep::field(F::Callee), NodeRef::Identifier(&c.callee))];
                    out.extend(list(F::Arguments, &c.arguments, NodeRef::Expr));
                    out
                }
                Expr::FunctionExpression(f) => {
                    let mut out = list(F::Params, &f.params, NodeRef::Identifier);
                    out.push((PathStep::field(F::Body), NodeRef::Block(&f.body)));
                    out
                }
                Expr::SketchExpression(s) => {
                    vec![(PathStep::field(F::Body), NodeRef::Block(&s.body))]
                }
                Expr::PipeExpression(p) => list(F::Body, &p.body, NodeRef::Expr),
                Expr::ArrayExpression(a) => list(F::Elements, &a.elements, NodeRef::Expr),
                Expr::ObjectExpression(o) => list(F::Properties, &o.properties, NodeRef::Property),
            },
        }
    }
}

impl<'a> NodeMut<'a> {
    pub fn into_expr(self) -> Option<&'a mut Expr> {
        match self {
            NodeMut::Expr(e) => Some(e),
            _ => None,
        }
    }

    /// Mutable counterpart of [`NodeRef::child`].
    pub fn child(self, step: PathStep) -> Option<NodeMut<'a>> {
        use PathField as F;
        match (self, step.field, step.index) {
            (NodeMut::Program(p), F::Body, Some(i)) => p.body.get_mut(i).map(NodeMut::Statement),
            (NodeMut::Block(b), F::Body, Some(i)) => b.body.get_mut(i).map(NodeMut::Statement),
            (NodeMut::Statement(s), field, index) => match (s, field, index) {
                (Statement::VariableDeclaration(d), F::Declarations, Some(i)) => {
                    d.declarations.get_mut(i).map(NodeMut::Declarator)
                }
                (Statement::ExpressionStatement(e), F::Expression, None) => {
                    Some(NodeMut::Expr(&mut e.expression))
                }
                (Statement::ReturnStatement(r), F::Argument, None) => {
                    Some(NodeMut::Expr(&mut r.argument))
                }
                _ => None,
            },
            (NodeMut::Declarator(d), F::Id, None) => Some(NodeMut::Identifier(&mut d.id)),
            (NodeMut::Declarator(d), F::Init, None) => Some(NodeMut::Expr(&mut d.init)),
            (NodeMut::Property(p), F::Key, None) => Some(NodeMut::Identifier(&mut p.key)),
            (NodeMut::Property(p), F::Value, None) => Some(NodeMut::Expr(&mut p.value)),
            (NodeMut::Expr(e), field, index) => match (e, field, index) {
                (Expr::BinaryExpression(b), F::Left, None) => Some(NodeMut::Expr(&mut b.left)),
                (Expr::BinaryExpression(b), F::Right, None) => Some(NodeMut::Expr(&mut b.right)),
                (Expr::CallExpression(c), F::Callee, None) => {
                    Some(NodeMut::Identifier(&mut c.callee))
                }
                (Expr::CallExpression(c), F::Arguments, Some(i)) => {
                    c.arguments.get_mut(i).map(NodeMut::Expr)
                }
                (Expr::FunctionExpression(f), F::Params, Some(i)) => {
                    f.params.get_mut(i).map(NodeMut::Identifier)
                }
                (Expr::FunctionExpression(f), F::Body, None) => Some(NodeMut::Block(&mut f.body)),
                (Expr::SketchExpression(s), F::Body, None) => Some(NodeMut::Block(&mut s.body)),
                (Expr::PipeExpression(p), F::Body, Some(i)) => {
                    p.body.get_mut(i).map(NodeMut::Expr)
                }
                (Expr::ArrayExpression(a), F::Elements, Some(i)) => {
                    a.elements.get_mut(i).map(NodeMut::Expr)
                }
                (Expr::ObjectExpression(o), F::Properties, Some(i)) => {
                    o.properties.get_mut(i).map(NodeMut::Property)
                }
                _ => None,
            },
            _ => None,
        }
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Follows `path` from the program root.
pub fn resolve_path<'a>(program: &'a Program, path: &PathToNode) -> Option<NodeRef<'a>> {
    path.steps()
        .iter()
        .try_fold(NodeRef::Program(program), |node, step| node.child(*step))
}

/// Follows `path` from the program root, yielding a mutable reference.
pub fn resolve_path_mut<'a>(program: &'a mut Program, path: &PathToNode) -> Option<NodeMut<'a>> {
    path.steps()
        .iter()
        .try_fold(NodeMut::Program(program), |node, step| node.child(*step))
}

/// Path from the root to `target`, found by node identity.
///
/// `target` must borrow from `program`; a node from another tree is never
/// found even if structurally equal.
pub fn path_to_node(program: &Program, target: NodeRef<'_>) -> Option<PathToNode> {
    fn search(node: NodeRef<'_>, target: &NodeRef<'_>, path: &mut Vec<PathStep>) -> bool {
        if node.same_node(target) {
            return true;
        }
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            for (step, child) in node.children() {
                path.push(step);
                if search(child, target, path) {
                    return true;
                }
                path.pop();
            }
            false
        })
    }

    let mut steps = Vec::new();
    search(NodeRef::Program(program), &target, &mut steps).then(|| PathToNode(steps))
}

/// Path to the deepest node whose span encloses `range`.
///
/// Children with an empty span (synthesized nodes) are never descended into.
pub fn path_from_source_range(program: &Program, range: Span) -> PathToNode {
    let mut steps = Vec::new();
    let mut node = NodeRef::Program(program);
    'descend: loop {
        for (step, child) in node.children() {
            let span = child.span();
            if !span.is_empty() && span.encloses(&range) {
                steps.push(step);
                node = child;
                continue 'descend;
            }
        }
        break;
    }
    PathToNode(steps)
}
