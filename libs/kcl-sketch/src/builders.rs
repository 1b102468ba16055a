//! # Node Builders
//!
//! Constructors for synthesized AST nodes. Built nodes carry
//! `Span::default()` since they have no source text yet.

use config::constants::SketchConfig;
use kcl_ast::{
    ArrayExpression, CallExpression, Expr, Identifier, Literal, ObjectExpression, ObjectProperty,
    PipeSubstitution, Span,
};

/// Number literal rounded to the configured coordinate precision.
pub fn create_literal(value: f64, config: &SketchConfig) -> Expr {
    Expr::Literal(Literal::number(config.round(value)))
}

pub fn create_string_literal(value: impl Into<String>) -> Expr {
    Expr::Literal(Literal::string(value))
}

pub fn create_array(elements: Vec<Expr>) -> Expr {
    Expr::ArrayExpression(ArrayExpression {
        elements,
        span: Span::default(),
    })
}

/// Object expression with properties in the given order.
pub fn create_object<'k>(properties: impl IntoIterator<Item = (&'k str, Expr)>) -> Expr {
    Expr::ObjectExpression(ObjectExpression {
        properties: properties
            .into_iter()
            .map(|(key, value)| create_property(key, value))
            .collect(),
        span: Span::default(),
    })
}

pub fn create_property(key: &str, value: Expr) -> ObjectProperty {
    ObjectProperty {
        key: Identifier::new(key),
        value,
        span: Span::default(),
    }
}

pub fn create_pipe_substitution() -> Expr {
    Expr::PipeSubstitution(PipeSubstitution::default())
}

pub fn create_call_expression(name: &str, arguments: Vec<Expr>) -> Expr {
    Expr::CallExpression(CallExpression {
        callee: Identifier::new(name),
        arguments,
        optional: false,
        span: Span::default(),
    })
}

/// Sets `key` on `object`, replacing the value in place if the key exists
/// and appending it otherwise.
pub fn set_property(object: &mut ObjectExpression, key: &str, value: Expr) {
    match object.properties.iter_mut().find(|p| p.key.name == key) {
        Some(property) => property.value = value,
        None => object.properties.push(create_property(key, value)),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kcl_ast::printer::print_expression;

    #[test]
    fn test_literal_is_rounded() {
        let literal = create_literal(1.23456, &SketchConfig::default());
        assert_eq!(literal.as_number(), Some(1.23));
        assert_eq!(print_expression(&literal), "1.23");
    }

    #[test]
    fn test_call_prints_as_pipe_stage() {
        let config = SketchConfig::default();
        let call = create_call_expression(
            "lineTo",
            vec![
                create_array(vec![create_literal(3.0, &config), create_literal(-4.5, &config)]),
                create_pipe_substitution(),
            ],
        );
        assert_eq!(print_expression(&call), "lineTo([3, -4.5], %)");
        assert!(call.span().is_empty());
    }

    #[test]
    fn test_set_property_keeps_order() {
        let Expr::ObjectExpression(mut object) = create_object([
            ("to", create_string_literal("a")),
            ("tag", create_string_literal("seg01")),
        ]) else {
            panic!("Expected object");
        };
        set_property(&mut object, "to", create_string_literal("b"));
        set_property(&mut object, "offset", create_string_literal("c"));
        let keys: Vec<_> = object.properties.iter().map(|p| p.key.name.as_str()).collect();
        assert_eq!(keys, vec!["to", "tag", "offset"]);
        assert_eq!(object.get("to").and_then(Expr::as_str), Some("b"));
    }
}
