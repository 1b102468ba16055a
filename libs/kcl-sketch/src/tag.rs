use config::constants::SketchConfig;
use kcl_ast::visitor::NameCollector;
use kcl_ast::{Program, Visitor};

/// First `<prefix><nn>` name, counting from 1, that appears nowhere in
/// `program` as an identifier or string literal.
pub fn unique_tag(program: &Program, config: &SketchConfig) -> String {
    let mut collector = NameCollector::default();
    collector.visit_program(program);
    (1..)
        .map(|index| config.tag_name(index))
        .find(|name| !collector.names.contains(name))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcl_parser::parse;

    #[test]
    fn test_first_tag_on_untagged_program() {
        let program = parse("const part = startSketchAt([0, 0]) |> lineTo([1, 1], %)").unwrap();
        assert_eq!(unique_tag(&program, &SketchConfig::default()), "seg01");
    }

    #[test]
    fn test_skips_names_in_use() {
        let program =
            parse("const seg02 = 1\nconst p = lineTo({ to: [1, 1], tag: 'seg01' }, %)").unwrap();
        assert_eq!(unique_tag(&program, &SketchConfig::default()), "seg03");
    }

    #[test]
    fn test_configured_prefix() {
        let config = SketchConfig::new("edge", 3, 2).unwrap();
        let program = parse("const edge001 = 1").unwrap();
        assert_eq!(unique_tag(&program, &config), "edge002");
    }
}
