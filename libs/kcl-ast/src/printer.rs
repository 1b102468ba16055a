//! # Printer
//!
//! Renders a [`Program`] back to canonical KCL source. The output parses to a
//! structurally equal program (spans aside), which is what lets transform
//! results be shown to the user as text.
//!
//! Layout: one statement per line, two-space indentation inside blocks, and
//! every pipe stage after the first on its own line as `  |> stage`.

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

use crate::ast::*;

const INDENT: &str = "  ";

pub fn print(program: &Program) -> String {
    let mut out = program
        .body
        .iter()
        .map(|s| print_statement(s, 0))
        .collect::<Vec<_>>()
        .join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Renders a single expression at top-level indentation.
pub fn print_expression(expr: &Expr) -> String {
    print_expr(expr, 0)
}

fn print_statement(stmt: &Statement, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    match stmt {
        Statement::VariableDeclaration(d) => d
            .declarations
            .iter()
            .map(|decl| format!("{pad}{}", print_declarator(d.kind, decl, depth)))
            .collect::<Vec<_>>()
            .join("\n"),
        Statement::ExpressionStatement(e) => format!("{pad}{}", print_expr(&e.expression, depth)),
        Statement::ReturnStatement(r) => format!("{pad}return {}", print_expr(&r.argument, depth)),
    }
}

fn print_declarator(kind: DeclarationKind, decl: &VariableDeclarator, depth: usize) -> String {
    let name = &decl.id.name;
    match (kind, &decl.init) {
        (DeclarationKind::Sketch, init @ (Expr::SketchExpression(_) | Expr::PipeExpression(_))) => {
            format!("sketch {name} {}", print_expr(init, depth))
        }
        (kind, init) => format!("{} {name} = {}", kind.keyword(), print_expr(init, depth)),
    }
}

fn print_block(block: &BlockStatement, depth: usize) -> String {
    if block.body.is_empty() {
        return "{}".to_string();
    }
    let inner = block
        .body
        .iter()
        .map(|s| print_statement(s, depth + 1))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{{\n{inner}\n{}}}", INDENT.repeat(depth))
}

/// Each nesting level may grow the stack.
fn print_expr(e: &Expr, depth: usize) -> String {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match e {
        Expr::Identifier(i) => i.name.clone(),
        Expr::Literal(l) => print_literal(l),
        Expr::PipeSubstitution(_) => "%".to_string(),
        Expr::BinaryExpression(b) => {
            let prec = b.operator.precedence();
            let left = print_operand(&b.left, prec, false, depth);
            let right = print_operand(&b.right, prec, true, depth);
            format!("{left} {} {right}", b.operator.as_str())
        }
        Expr::CallExpression(c) => format!(
            "{}({})",
            c.callee.name,
            c.arguments.iter().map(|a| print_expr(a, depth)).collect::<Vec<_>>().join(", ")
        ),
        Expr::FunctionExpression(f) => format!(
            "({}) => {}",
            f.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", "),
            print_block(&f.body, depth)
        ),
        Expr::SketchExpression(s) => print_block(&s.body, depth),
        Expr::PipeExpression(p) => {
            let continuation = format!("\n{}|> ", INDENT.repeat(depth + 1));
            p.body.iter().map(|stage| print_expr(stage, depth)).collect::<Vec<_>>().join(&continuation)
        }
        Expr::ArrayExpression(a) => format!(
            "[{}]",
            a.elements.iter().map(|e| print_expr(e, depth)).collect::<Vec<_>>().join(", ")
        ),
        Expr::ObjectExpression(o) if o.properties.is_empty() => "{}".to_string(),
        Expr::ObjectExpression(o) => format!(
            "{{ {} }}",
            o.properties
                .iter()
                .map(|p| format!("{}: {}", p.key.name, print_expr(&p.value, depth)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}

fn print_literal(l: &Literal) -> String {
    if !l.raw.is_empty() {
        return l.raw.clone();
    }
    match &l.value {
        LiteralValue::Number(n) => n.to_string(),
        LiteralValue::String(s) => format!("'{s}'"),
    }
}

/// Operand of a binary expression, parenthesized when it would otherwise
/// bind differently on reparse. Operators are left-associative, so a right
/// operand of equal precedence needs parentheses too.
fn print_operand(e: &Expr, parent: Precedence, is_right: bool, depth: usize) -> String {
    let needs_parens = match e {
        Expr::BinaryExpression(b) => {
            let own = b.operator.precedence();
            own < parent || (is_right && own == parent)
        }
        Expr::PipeExpression(_) => true,
        _ => false,
    };
    let text = print_expr(e, depth);
    if needs_parens {
        format!("({text})")
    } else {
        text
    }
}
