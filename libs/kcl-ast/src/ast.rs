//! # AST Node Types
//!
//! Strongly typed nodes for KCL programs. Every node carries the [`Span`] of
//! exactly the source text it was parsed from; nodes built by rewrites carry
//! `Span::default()`.
//!
//! Serialized form follows the editor protocol: enum nodes are tagged with
//! `"type"` and spans are flattened into `start`/`end` fields.

use crate::span::Span;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::{Deserialize, Serialize};
use stacker::maybe_grow;

// =============================================================================
// PROGRAM & STATEMENTS
// =============================================================================

/// Root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Statement>,
    #[serde(flatten)]
    pub span: Span,
}

impl Program {
    pub fn new(body: Vec<Statement>, span: Span) -> Self {
        Self { body, span }
    }
}

/// A top-level or block-level statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    ExpressionStatement(ExpressionStatement),
    ReturnStatement(ReturnStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::VariableDeclaration(d) => d.span,
            Statement::ExpressionStatement(s) => s.span,
            Statement::ReturnStatement(r) => r.span,
        }
    }
}

/// `const|fn|sketch|path <id> = <init>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub kind: DeclarationKind,
    pub declarations: Vec<VariableDeclarator>,
    #[serde(flatten)]
    pub span: Span,
}

/// Discriminates the four declaration forms.
///
/// The parser guarantees the initializer shape for each kind:
/// - `Fn` → [`Expr::FunctionExpression`]
/// - `Sketch` → [`Expr::SketchExpression`], or a pipe whose first stage is one
/// - `Const` / `Path` → any expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Const,
    Fn,
    Sketch,
    Path,
}

impl DeclarationKind {
    /// Source keyword for this kind.
    pub const fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Fn => "fn",
            DeclarationKind::Sketch => "sketch",
            DeclarationKind::Path => "path",
        }
    }

    /// Maps a keyword back to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "const" => Some(DeclarationKind::Const),
            "fn" => Some(DeclarationKind::Fn),
            "sketch" => Some(DeclarationKind::Sketch),
            "path" => Some(DeclarationKind::Path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub id: Identifier,
    pub init: Expr,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expr,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub argument: Expr,
    #[serde(flatten)]
    pub span: Span,
}

/// `{ ... }` body of a function or sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
    #[serde(flatten)]
    pub span: Span,
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Identifier(Identifier),
    Literal(Literal),
    BinaryExpression(BinaryExpression),
    CallExpression(CallExpression),
    FunctionExpression(FunctionExpression),
    SketchExpression(SketchExpression),
    PipeExpression(PipeExpression),
    PipeSubstitution(PipeSubstitution),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
}

// Cloning recurses once per nesting level, like printing and walking.
impl Clone for Expr {
    fn clone(&self) -> Self {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match self {
            Expr::Identifier(n) => Expr::Identifier(n.clone()),
            Expr::Literal(n) => Expr::Literal(n.clone()),
            Expr::BinaryExpression(n) => Expr::BinaryExpression(n.clone()),
            Expr::CallExpression(n) => Expr::CallExpression(n.clone()),
            Expr::FunctionExpression(n) => Expr::FunctionExpression(n.clone()),
            Expr::SketchExpression(n) => Expr::SketchExpression(n.clone()),
            Expr::PipeExpression(n) => Expr::PipeExpression(n.clone()),
            Expr::PipeSubstitution(n) => Expr::PipeSubstitution(n.clone()),
            Expr::ArrayExpression(n) => Expr::ArrayExpression(n.clone()),
            Expr::ObjectExpression(n) => Expr::ObjectExpression(n.clone()),
        })
    }
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier(n) => n.span,
            Expr::Literal(n) => n.span,
            Expr::BinaryExpression(n) => n.span,
            Expr::CallExpression(n) => n.span,
            Expr::FunctionExpression(n) => n.span,
            Expr::SketchExpression(n) => n.span,
            Expr::PipeExpression(n) => n.span,
            Expr::PipeSubstitution(n) => n.span,
            Expr::ArrayExpression(n) => n.span,
            Expr::ObjectExpression(n) => n.span,
        }
    }

    /// Node type name as used in the serialized form and in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "Identifier",
            Expr::Literal(_) => "Literal",
            Expr::BinaryExpression(_) => "BinaryExpression",
            Expr::CallExpression(_) => "CallExpression",
            Expr::FunctionExpression(_) => "FunctionExpression",
            Expr::SketchExpression(_) => "SketchExpression",
            Expr::PipeExpression(_) => "PipeExpression",
            Expr::PipeSubstitution(_) => "PipeSubstitution",
            Expr::ArrayExpression(_) => "ArrayExpression",
            Expr::ObjectExpression(_) => "ObjectExpression",
        }
    }

    pub fn as_call(&self) -> Option<&CallExpression> {
        match self {
            Expr::CallExpression(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_pipe(&self) -> Option<&PipeExpression> {
        match self {
            Expr::PipeExpression(pipe) => Some(pipe),
            _ => None,
        }
    }

    /// Numeric value when this is a number literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Literal(Literal {
                value: LiteralValue::Number(n),
                ..
            }) => Some(*n),
            _ => None,
        }
    }

    /// String value when this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::Literal(Literal {
                value: LiteralValue::String(s),
                ..
            }) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(flatten)]
    pub span: Span,
}

impl Identifier {
    /// Identifier without a source position.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }
}

/// Number or string literal. `raw` is the exact source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub raw: String,
    #[serde(flatten)]
    pub span: Span,
}

impl Literal {
    /// Number literal without a source position; `raw` is the shortest
    /// decimal form of `value`.
    pub fn number(value: f64) -> Self {
        Self {
            value: LiteralValue::Number(value),
            raw: value.to_string(),
            span: Span::default(),
        }
    }

    /// Single-quoted string literal without a source position.
    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            raw: format!("'{value}'"),
            value: LiteralValue::String(value),
            span: Span::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    #[serde(flatten)]
    pub span: Span,
}

/// Binary operators, serialized as their source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
}

impl BinaryOperator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Le => "<=",
            BinaryOperator::Ge => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Sub),
            "*" => Some(BinaryOperator::Mul),
            "/" => Some(BinaryOperator::Div),
            "==" => Some(BinaryOperator::Eq),
            "!=" => Some(BinaryOperator::Ne),
            "<" => Some(BinaryOperator::Lt),
            ">" => Some(BinaryOperator::Gt),
            "<=" => Some(BinaryOperator::Le),
            ">=" => Some(BinaryOperator::Ge),
            _ => None,
        }
    }

    pub const fn precedence(&self) -> Precedence {
        match self {
            BinaryOperator::Eq
            | BinaryOperator::Ne
            | BinaryOperator::Lt
            | BinaryOperator::Gt
            | BinaryOperator::Le
            | BinaryOperator::Ge => Precedence::Comparison,
            BinaryOperator::Add | BinaryOperator::Sub => Precedence::Term,
            BinaryOperator::Mul | BinaryOperator::Div => Precedence::Factor,
        }
    }
}

/// Binary operator precedence levels. Higher values bind tighter.
///
/// | Precedence | Operators | Associativity |
/// |------------|-----------|---------------|
/// | 1 | == != < > <= >= | Left |
/// | 2 | + - | Left |
/// | 3 | * / | Left |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Sentinel below every operator.
    None = 0,
    Comparison = 1,
    Term = 2,
    Factor = 3,
    /// Operands: binds tighter than any binary operator.
    Primary = 4,
}

impl Precedence {
    /// Next tighter level, used for left-associative operands.
    pub const fn next(&self) -> Self {
        match self {
            Precedence::None => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor | Precedence::Primary => Precedence::Primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: Identifier,
    pub arguments: Vec<Expr>,
    pub optional: bool,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionExpression {
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchExpression {
    pub body: BlockStatement,
    #[serde(flatten)]
    pub span: Span,
}

/// Chain of at least two stages joined by `|>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeExpression {
    pub body: Vec<Expr>,
    #[serde(flatten)]
    pub span: Span,
}

/// `%`: the value flowing in from the previous pipe stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipeSubstitution {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpression {
    pub elements: Vec<Expr>,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<ObjectProperty>,
    #[serde(flatten)]
    pub span: Span,
}

impl ObjectExpression {
    /// Value of the property named `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Expr> {
        self.properties
            .iter()
            .find(|p| p.key.name == key)
            .map(|p| &p.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectProperty {
    pub key: Identifier,
    pub value: Expr,
    #[serde(flatten)]
    pub span: Span,
}
