//! # Sketch Transform Tests
//!
//! Gestures applied to parsed programs, checked through the printed result
//! and the numbers written into the new calls.

use approx::assert_abs_diff_eq;
use config::constants::SketchConfig;
use glam::DVec2;
use indoc::indoc;
use kcl_ast::{print, resolve_path, Expr, PathField, PathToNode, Program};
use kcl_parser::parse;
use kcl_sketch::{
    AddCall, MemoryItem, ModifyAstBase, ProgramMemory, SketchGroup, SketchLineHelper,
    SketchPrimitive, TransformError, UpdateArgs,
};

const SOURCE: &str = indoc! {"
    const part = startSketchAt([0, 0])
      |> lineTo([2, 0], %)
"};

fn parse_ok(source: &str) -> Program {
    parse(source).unwrap_or_else(|e| panic!("Failed to parse {source:?}: {e}"))
}

/// `body[0].declarations[0].init`, the pipe of the first declaration.
fn pipe_path() -> PathToNode {
    PathToNode::root()
        .push_index(PathField::Body, 0)
        .push_index(PathField::Declarations, 0)
        .push(PathField::Init)
}

fn stage_path(index: usize) -> PathToNode {
    pipe_path().push_index(PathField::Body, index)
}

fn base<'a>(
    program: &'a Program,
    memory: &'a ProgramMemory,
    path: &'a PathToNode,
) -> ModifyAstBase<'a> {
    ModifyAstBase {
        node: program,
        previous_program_memory: memory,
        path_to_node: path,
    }
}

fn memory_with_base_segment() -> ProgramMemory {
    let mut memory = ProgramMemory::new();
    memory.insert(
        "part",
        MemoryItem::SketchGroup(SketchGroup::new([0.0, 0.0]).line_to([4.0, 0.0], "seg01")),
    );
    memory
}

fn point_argument(program: &Program, path: &PathToNode) -> [f64; 2] {
    let expr = resolve_path(program, path)
        .and_then(|node| node.as_expr())
        .expect("stage exists");
    let call = expr.as_call().expect("call stage");
    match &call.arguments[0] {
        Expr::ArrayExpression(array) => [
            array.elements[0].as_number().expect("x literal"),
            array.elements[1].as_number().expect("y literal"),
        ],
        other => panic!("Expected point array, got {}", other.type_name()),
    }
}

// =============================================================================
// ADD
// =============================================================================

#[test]
fn test_two_successive_adds_append_stages() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let helper = SketchPrimitive::LineTo.helper();
    let path = pipe_path();

    let first = helper
        .add(AddCall::new(
            base(&program, &memory, &path),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 3.456),
        ))
        .unwrap();
    assert_eq!(first.path_to_node, stage_path(2));

    let second = helper
        .add(AddCall::new(
            base(&first.modified_ast, &memory, &first.path_to_node),
            DVec2::new(2.0, 3.46),
            DVec2::new(-1.5, 3.46),
        ))
        .unwrap();
    assert_eq!(second.path_to_node, stage_path(3));
    assert_eq!(second.path_to_node.to_string(), "body[0].declarations[0].init.body[3]");

    let [x1, y1] = point_argument(&second.modified_ast, &stage_path(2));
    assert_abs_diff_eq!(x1, 2.0, epsilon = 0.005);
    assert_abs_diff_eq!(y1, 3.456, epsilon = 0.005);
    let [x2, y2] = point_argument(&second.modified_ast, &stage_path(3));
    assert_abs_diff_eq!(x2, -1.5, epsilon = 0.005);
    assert_abs_diff_eq!(y2, 3.46, epsilon = 0.005);

    assert_eq!(
        print(&second.modified_ast),
        indoc! {"
            const part = startSketchAt([0, 0])
              |> lineTo([2, 0], %)
              |> lineTo([2, 3.46], %)
              |> lineTo([-1.5, 3.46], %)
        "}
    );
    // the input tree is a snapshot that later edits never reach
    assert_eq!(program, parse_ok(SOURCE));
}

#[test]
fn test_added_program_reparses_to_same_tree() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let path = pipe_path();
    let result = SketchPrimitive::AngledLineOfXLength
        .helper()
        .add(AddCall::new(
            base(&program, &memory, &path),
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 2.0),
        ))
        .unwrap();
    let printed = print(&result.modified_ast);
    assert!(printed.contains("|> angledLineOfXLength([135, 2], %)"), "{printed}");
    assert_eq!(
        parse_ok(&printed).without_spans(),
        result.modified_ast.without_spans()
    );
}

#[test]
fn test_splice_between_inserts_after_addressed_stage() {
    let program = parse_ok(indoc! {"
        const part = startSketchAt([0, 0])
          |> lineTo([2, 0], %)
          |> close(%)
    "});
    let memory = ProgramMemory::new();
    let path = stage_path(1);
    let result = SketchPrimitive::Line
        .helper()
        .add(
            AddCall::new(
                base(&program, &memory, &path),
                DVec2::new(2.0, 0.0),
                DVec2::new(2.5, 1.0),
            )
            .splicing(),
        )
        .unwrap();
    assert_eq!(result.path_to_node, stage_path(2));
    assert_eq!(
        print(&result.modified_ast),
        indoc! {"
            const part = startSketchAt([0, 0])
              |> lineTo([2, 0], %)
              |> line([0.5, 1], %)
              |> close(%)
        "}
    );
}

#[test]
fn test_replace_existing_uses_primitive_callback() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let path = stage_path(1);
    let result = SketchPrimitive::AngledLine
        .helper()
        .add(
            AddCall::new(base(&program, &memory, &path), DVec2::ZERO, DVec2::new(3.0, 3.0))
                .replacing(None),
        )
        .unwrap();
    assert_eq!(result.path_to_node, path);
    assert_eq!(result.value_used_in_transform, Some(45.0));
    assert_eq!(
        print(&result.modified_ast),
        indoc! {"
            const part = startSketchAt([0, 0])
              |> angledLine([45, 4.24], %)
        "}
    );
}

#[test]
fn test_replace_existing_with_custom_callback() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let path = stage_path(1);
    let result = SketchPrimitive::LineTo
        .helper()
        .add(
            AddCall::new(base(&program, &memory, &path), DVec2::ZERO, DVec2::new(7.0, 2.0))
                .replacing(Some(SketchPrimitive::XLine.create_callback())),
        )
        .unwrap();
    let stage = resolve_path(&result.modified_ast, &path)
        .and_then(|n| n.as_expr())
        .and_then(Expr::as_call)
        .unwrap();
    assert_eq!(stage.callee.name, "xLine");
    assert_eq!(stage.arguments[0].as_number(), Some(7.0));
}

#[test]
fn test_intersecting_line_references_tagged_segment() {
    let program = parse_ok(SOURCE);
    let memory = memory_with_base_segment();
    let path = pipe_path();
    let helper = SketchPrimitive::AngledLineThatIntersects.helper();
    let added = helper
        .add(
            AddCall::new(
                base(&program, &memory, &path),
                DVec2::new(4.0, 0.0),
                DVec2::new(6.0, 2.5),
            )
            .referencing("seg01"),
        )
        .unwrap();
    let printed = print(&added.modified_ast);
    assert!(
        printed.contains(
            "|> angledLineThatIntersects({ angle: 51.34, offset: 2.5, intersectTag: 'seg01' }, %)"
        ),
        "{printed}"
    );

    // dragging again reads the tag back out of the call
    let updated = helper
        .update_args(UpdateArgs {
            base: base(&added.modified_ast, &memory, &added.path_to_node),
            from: DVec2::new(4.0, 0.0),
            to: DVec2::new(6.0, -1.0),
        })
        .unwrap();
    let printed = print(&updated.modified_ast);
    assert!(
        printed.contains("angledLineThatIntersects({ angle: -26.57, offset: -1, intersectTag: 'seg01' }, %)"),
        "{printed}"
    );
}

#[test]
fn test_missing_segment_fails_without_touching_input() {
    let program = parse_ok(SOURCE);
    let snapshot = program.clone();
    let memory = memory_with_base_segment();
    let path = pipe_path();
    let err = SketchPrimitive::AngledLineThatIntersects
        .helper()
        .add(
            AddCall::new(base(&program, &memory, &path), DVec2::ZERO, DVec2::ONE)
                .referencing("seg09"),
        )
        .unwrap_err();
    assert_eq!(err, TransformError::SegmentNotFound("seg09".into()));
    assert_eq!(program, snapshot);
}

#[test]
fn test_intersecting_line_without_reference() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let path = pipe_path();
    let err = SketchPrimitive::AngledLineThatIntersects
        .helper()
        .add(AddCall::new(base(&program, &memory, &path), DVec2::ZERO, DVec2::ONE))
        .unwrap_err();
    assert!(matches!(err, TransformError::MissingReference(_)));
}

// =============================================================================
// UPDATE ARGS
// =============================================================================

#[test]
fn test_update_args_keeps_tag() {
    let program = parse_ok(indoc! {"
        const part = startSketchAt([0, 0])
          |> lineTo({ to: [2, 0], tag: 'seg01' }, %)
          |> line([1, 1], %)
    "});
    let memory = ProgramMemory::new();

    let first_path = stage_path(1);
    let moved = SketchPrimitive::LineTo
        .helper()
        .update_args(UpdateArgs {
            base: base(&program, &memory, &first_path),
            from: DVec2::ZERO,
            to: DVec2::new(5.0, 1.234),
        })
        .unwrap();
    assert_eq!(moved.path_to_node, first_path);

    let second_path = stage_path(2);
    let moved = SketchPrimitive::Line
        .helper()
        .update_args(UpdateArgs {
            base: base(&moved.modified_ast, &memory, &second_path),
            from: DVec2::new(5.0, 1.23),
            to: DVec2::new(6.0, 3.0),
        })
        .unwrap();

    assert_eq!(
        print(&moved.modified_ast),
        indoc! {"
            const part = startSketchAt([0, 0])
              |> lineTo({ to: [5, 1.23], tag: 'seg01' }, %)
              |> line([1, 1.77], %)
        "}
    );
}

#[test]
fn test_update_args_on_scalar_and_angle_objects() {
    let program = parse_ok(indoc! {"
        const part = startSketchAt([0, 0])
          |> xLine({ length: 4, tag: 'seg01' }, %)
          |> angledLineToY({ angle: 30, to: 2, tag: 'seg02' }, %)
    "});
    let memory = ProgramMemory::new();

    let x_path = stage_path(1);
    let moved = SketchPrimitive::XLine
        .helper()
        .update_args(UpdateArgs {
            base: base(&program, &memory, &x_path),
            from: DVec2::ZERO,
            to: DVec2::new(-3.0, 9.0),
        })
        .unwrap();

    let angle_path = stage_path(2);
    let moved = SketchPrimitive::AngledLineToY
        .helper()
        .update_args(UpdateArgs {
            base: base(&moved.modified_ast, &memory, &angle_path),
            from: DVec2::new(-3.0, 0.0),
            to: DVec2::new(-3.0, 5.0),
        })
        .unwrap();

    assert_eq!(
        print(&moved.modified_ast),
        indoc! {"
            const part = startSketchAt([0, 0])
              |> xLine({ length: -3, tag: 'seg01' }, %)
              |> angledLineToY({ angle: 90, to: 5, tag: 'seg02' }, %)
        "}
    );
}

#[test]
fn test_update_args_rejects_non_call() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let path = pipe_path();
    let err = SketchPrimitive::LineTo
        .helper()
        .update_args(UpdateArgs {
            base: base(&program, &memory, &path),
            from: DVec2::ZERO,
            to: DVec2::ONE,
        })
        .unwrap_err();
    assert_eq!(
        err,
        TransformError::NotACall {
            path,
            found: "PipeExpression".into()
        }
    );
}

// =============================================================================
// ADD TAG
// =============================================================================

#[test]
fn test_add_tag_converts_point_argument() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let path = stage_path(1);
    let helper = SketchPrimitive::LineTo.helper();

    let tagged = helper.add_tag(base(&program, &memory, &path)).unwrap();
    assert_eq!(tagged.tag, "seg01");
    assert_eq!(
        print(&tagged.modified_ast),
        indoc! {"
            const part = startSketchAt([0, 0])
              |> lineTo({ to: [2, 0], tag: 'seg01' }, %)
        "}
    );

    // a second request reports the tag already there
    let again = helper.add_tag(base(&tagged.modified_ast, &memory, &path)).unwrap();
    assert_eq!(again.tag, "seg01");
    assert_eq!(again.modified_ast, tagged.modified_ast);
}

#[test]
fn test_add_tag_picks_unused_name() {
    let program = parse_ok(indoc! {"
        const part = startSketchAt([0, 0])
          |> lineTo({ to: [2, 0], tag: 'seg01' }, %)
          |> angledLine([45, 3], %)
          |> xLine(4, %)
    "});
    let memory = ProgramMemory::new();

    let angle_path = stage_path(2);
    let tagged = SketchPrimitive::AngledLine
        .helper()
        .add_tag(base(&program, &memory, &angle_path))
        .unwrap();
    assert_eq!(tagged.tag, "seg02");

    let x_path = stage_path(3);
    let tagged = SketchPrimitive::XLine
        .helper()
        .add_tag(base(&tagged.modified_ast, &memory, &x_path))
        .unwrap();
    assert_eq!(tagged.tag, "seg03");

    assert_eq!(
        print(&tagged.modified_ast),
        indoc! {"
            const part = startSketchAt([0, 0])
              |> lineTo({ to: [2, 0], tag: 'seg01' }, %)
              |> angledLine({ angle: 45, length: 3, tag: 'seg02' }, %)
              |> xLine({ length: 4, tag: 'seg03' }, %)
        "}
    );
}

#[test]
fn test_add_tag_with_configured_names() {
    let program = parse_ok(SOURCE);
    let memory = ProgramMemory::new();
    let path = stage_path(1);
    let config = SketchConfig::new("edge", 3, 1).unwrap();
    let helper = SketchPrimitive::LineTo.helper().with_config(config);

    let tagged = helper.add_tag(base(&program, &memory, &path)).unwrap();
    assert_eq!(tagged.tag, "edge001");

    let added = helper
        .add(AddCall::new(
            base(&tagged.modified_ast, &memory, &path),
            DVec2::new(2.0, 0.0),
            DVec2::new(1.26, 1.0),
        ))
        .unwrap();
    assert_eq!(point_argument(&added.modified_ast, &added.path_to_node), [1.3, 1.0]);
}

// =============================================================================
// ADDRESSING ERRORS
// =============================================================================

#[test]
fn test_addressing_errors() {
    let program = parse_ok("const width = 5\n");
    let memory = ProgramMemory::new();
    let helper = SketchPrimitive::Line.helper();

    let init = pipe_path();
    let err = helper
        .add(AddCall::new(base(&program, &memory, &init), DVec2::ZERO, DVec2::ONE))
        .unwrap_err();
    assert_eq!(err, TransformError::NotAPipe(init));

    let stale = PathToNode::root().push_index(PathField::Body, 7);
    let err = helper.add_tag(base(&program, &memory, &stale)).unwrap_err();
    assert_eq!(err, TransformError::PathNotFound(stale));
}
