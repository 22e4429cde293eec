use json_plan_md as jpm;
use jpm::{DiagnosticCode, Node, Plan};
use pretty_assertions::assert_eq;

fn doc(json: &str) -> Node {
    Node::parse(json.as_bytes()).expect("test document must parse")
}

#[test]
fn flat_object_becomes_named_bullets() {
    let root = doc(r#"{"a": "x", "b": 1}"#);
    let plan = jpm::generate_plan(&root).unwrap();

    assert_eq!(plan.version, 1);
    assert_eq!(plan.directives.len(), 1);
    let directive = &plan.directives[0];
    assert_eq!(directive.op, "named_bullets");
    assert_eq!(directive.path, ".");
    let labels: Vec<&str> = directive.fields.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);

    assert_eq!(
        jpm::render_markdown(&root, &plan).unwrap(),
        "- **a:** x\n- **b:** 1"
    );
}

#[test]
fn scalar_array_becomes_bullet_list() {
    let root = doc(r#"["x", "y"]"#);
    let plan = jpm::generate_plan(&root).unwrap();

    assert_eq!(plan.directives.len(), 1);
    assert_eq!(plan.directives[0].op, "bullet_list");
    assert_eq!(plan.directives[0].path, ".");
    assert!(plan.directives[0].fields.is_empty());

    assert_eq!(jpm::render_markdown(&root, &plan).unwrap(), "- x\n- y");
}

#[test]
fn array_of_flat_objects_becomes_a_table_in_first_appearance_order() {
    let root = doc(r#"[{"a": 1}, {"a": 2, "b": 3}]"#);
    let plan = jpm::generate_plan(&root).unwrap();

    assert_eq!(plan.directives.len(), 1);
    let directive = &plan.directives[0];
    assert_eq!(directive.op, "table");
    let labels: Vec<&str> = directive.fields.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);

    // The union-of-keys plan is strict at render time: row 0 has no "b".
    let err = jpm::render_markdown(&root, &plan).unwrap_err();
    let diagnostic = err.diagnostic().expect("expected diagnostic");
    assert_eq!(diagnostic.code, DiagnosticCode::MissingField);
    assert_eq!(diagnostic.directive, Some(0));
}

#[test]
fn uniform_table_plan_renders() {
    let root = doc(r#"[{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]"#);
    let plan = jpm::generate_plan(&root).unwrap();

    assert_eq!(
        jpm::render_markdown(&root, &plan).unwrap(),
        "| id | name |\n| --- | --- |\n| 1 | a |\n| 2 | b |"
    );
}

#[test]
fn empty_array_becomes_an_empty_bullet_list() {
    let root = doc("[]");
    let plan = jpm::generate_plan(&root).unwrap();

    assert_eq!(plan.directives[0].op, "bullet_list");
    jpm::validate_plan(&root, &plan).unwrap();
    assert_eq!(jpm::render_markdown(&root, &plan).unwrap(), "");
}

#[test]
fn generated_plans_round_trip_through_the_wire_format() {
    for json in [
        r#"{"a": "x", "b": 1}"#,
        r#"["x", "y"]"#,
        r#"[{"a": 1}, {"a": 2, "b": 3}]"#,
    ] {
        let plan = jpm::generate_plan(&doc(json)).unwrap();
        let reparsed = Plan::parse(plan.to_json().unwrap().as_bytes()).unwrap();
        assert_eq!(reparsed, plan, "round trip failed for document {json}");
    }
}

#[test]
fn keys_with_pointer_characters_generate_resolvable_paths() {
    let root = doc(r#"{"a/b": 1, "c~d": 2}"#);
    let plan = jpm::generate_plan(&root).unwrap();

    let paths: Vec<&str> = plan.directives[0]
        .fields
        .iter()
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(paths, vec!["a~1b", "c~0d"]);
    let labels: Vec<&str> = plan.directives[0]
        .fields
        .iter()
        .map(|f| f.label.as_str())
        .collect();
    assert_eq!(labels, vec!["a/b", "c~d"]);

    jpm::validate_plan(&root, &plan).unwrap();
}

#[test]
fn nested_structure_is_refused() {
    for json in [
        r#"{"a": {"b": 1}}"#,
        r#"{"a": [1]}"#,
        r#"[{"a": {"b": 1}}]"#,
        r#"[{"a": 1}, "scalar"]"#,
        r#"[[1], [2]]"#,
        r#""just a string""#,
        "42",
        "null",
    ] {
        let err = jpm::generate_plan(&doc(json)).unwrap_err();
        assert!(
            matches!(err, jpm::Error::Generate(_)),
            "expected generation failure for {json}, got {err:?}"
        );
    }
}
