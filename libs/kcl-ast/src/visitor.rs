use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

use crate::{ast::*, span::Span};

/// Read-only AST walk. Override a hook and call the matching `walk_*`
/// function to keep descending.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        program.body.iter().for_each(|s| self.visit_statement(s))
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt)
    }

    fn visit_block(&mut self, block: &BlockStatement) {
        block.body.iter().for_each(|s| self.visit_statement(s))
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr)
    }

    fn visit_identifier(&mut self, _ident: &Identifier) {}

    fn visit_literal(&mut self, _literal: &Literal) {}
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, stmt: &Statement) {
    match stmt {
        Statement::VariableDeclaration(d) => d.declarations.iter().for_each(|decl| {
            v.visit_identifier(&decl.id);
            v.visit_expr(&decl.init)
        }),
        Statement::ExpressionStatement(e) => v.visit_expr(&e.expression),
        Statement::ReturnStatement(r) => v.visit_expr(&r.argument),
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match expr {
        Expr::Identifier(i) => v.visit_identifier(i),
        Expr::Literal(l) => v.visit_literal(l),
        Expr::PipeSubstitution(_) => {}
        Expr::BinaryExpression(b) => {
            v.visit_expr(&b.left);
            v.visit_expr(&b.right)
        }
        Expr::CallExpression(c) => {
            v.visit_identifier(&c.callee);
            c.arguments.iter().for_each(|a| v.visit_expr(a))
        }
        Expr::FunctionExpression(f) => {
            f.params.iter().for_each(|p| v.visit_identifier(p));
            v.visit_block(&f.body)
        }
        Expr::SketchExpression(s) => v.visit_block(&s.body),
        Expr::PipeExpression(p) => p.body.iter().for_each(|e| v.visit_expr(e)),
        Expr::ArrayExpression(a) => a.elements.iter().for_each(|e| v.visit_expr(e)),
        Expr::ObjectExpression(o) => o.properties.iter().for_each(|p| {
            v.visit_identifier(&p.key);
            v.visit_expr(&p.value)
        }),
    })
}

/// Mutable walk that reaches every span in the tree.
pub trait VisitorMut {
    fn visit_span(&mut self, _span: &mut Span) {}

    fn visit_program(&mut self, program: &mut Program) {
        self.visit_span(&mut program.span);
        program.body.iter_mut().for_each(|s| self.visit_statement(s))
    }

    fn visit_statement(&mut self, stmt: &mut Statement) {
        match stmt {
            Statement::VariableDeclaration(d) => {
                self.visit_span(&mut d.span);
                d.declarations.iter_mut().for_each(|decl| {
                    self.visit_span(&mut decl.span);
                    self.visit_identifier(&mut decl.id);
                    self.visit_expr(&mut decl.init)
                })
            }
            Statement::ExpressionStatement(e) => {
                self.visit_span(&mut e.span);
                self.visit_expr(&mut e.expression)
            }
            Statement::ReturnStatement(r) => {
                self.visit_span(&mut r.span);
                self.visit_expr(&mut r.argument)
            }
        }
    }

    fn visit_block(&mut self, block: &mut BlockStatement) {
        self.visit_span(&mut block.span);
        block.body.iter_mut().for_each(|s| self.visit_statement(s))
    }

    fn visit_identifier(&mut self, ident: &mut Identifier) {
        self.visit_span(&mut ident.span)
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match expr {
            Expr::Identifier(i) => self.visit_identifier(i),
            Expr::Literal(l) => self.visit_span(&mut l.span),
            Expr::PipeSubstitution(p) => self.visit_span(&mut p.span),
            Expr::BinaryExpression(b) => {
                self.visit_span(&mut b.span);
                self.visit_expr(&mut b.left);
                self.visit_expr(&mut b.right)
            }
            Expr::CallExpression(c) => {
                self.visit_span(&mut c.span);
                self.visit_identifier(&mut c.callee);
                c.arguments.iter_mut().for_each(|a| self.visit_expr(a))
            }
            Expr::FunctionExpression(f) => {
                self.visit_span(&mut f.span);
                f.params.iter_mut().for_each(|p| self.visit_identifier(p));
                self.visit_block(&mut f.body)
            }
            Expr::SketchExpression(s) => {
                self.visit_span(&mut s.span);
                self.visit_block(&mut s.body)
            }
            Expr::PipeExpression(p) => {
                self.visit_span(&mut p.span);
                p.body.iter_mut().for_each(|e| self.visit_expr(e))
            }
            Expr::ArrayExpression(a) => {
                self.visit_span(&mut a.span);
                a.elements.iter_mut().for_each(|e| self.visit_expr(e))
            }
            Expr::ObjectExpression(o) => {
                self.visit_span(&mut o.span);
                o.properties.iter_mut().for_each(|p| {
                    self.visit_span(&mut p.span);
                    self.visit_identifier(&mut p.key);
                    self.visit_expr(&mut p.value)
                })
            }
        })
    }
}

struct SpanEraser;

impl VisitorMut for SpanEraser {
    fn visit_span(&mut self, span: &mut Span) {
        *span = Span::default();
    }
}

impl Program {
    /// Copy of this program with every span reset, for comparing trees
    /// structurally across a print/parse cycle.
    pub fn without_spans(&self) -> Program {
        let mut program = self.clone();
        SpanEraser.visit_program(&mut program);
        program
    }
}

/// Collects every identifier name and string literal value in a program.
#[derive(Debug, Default)]
pub struct NameCollector {
    pub names: std::collections::BTreeSet<String>,
}

impl Visitor for NameCollector {
    fn visit_identifier(&mut self, ident: &Identifier) {
        self.names.insert(ident.name.clone());
    }

    fn visit_literal(&mut self, literal: &Literal) {
        if let LiteralValue::String(s) = &literal.value {
            self.names.insert(s.clone());
        }
    }
}
