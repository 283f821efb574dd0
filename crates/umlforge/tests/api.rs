//! Integration tests for the public API

use umlforge::prelude::*;
use umlforge::{convert, parse, render};

fn diagram(cells: &str) -> String {
    format!(
        r#"<mxfile><diagram name="Page-1"><mxGraphModel><root><mxCell id="0"/><mxCell id="1" parent="0"/>{}</root></mxGraphModel></diagram></mxfile>"#,
        cells
    )
}

fn edge_between_a_and_b(style: &str) -> String {
    diagram(&format!(
        r#"<mxCell id="1a" value="A" style="swimlane;" vertex="1" parent="1"/>
           <mxCell id="2" value="B" style="swimlane;" vertex="1" parent="1"/>
           <mxCell id="3" style="{}" edge="1" parent="1" source="1a" target="2"/>"#,
        style
    ))
}

#[test]
fn test_punctuation_is_stripped_from_identifiers() {
    let input = diagram(
        r#"<mxCell id="2" value="Item" style="swimlane;" vertex="1" parent="1"/>
           <mxCell id="3" value="- na-me: String" style="text;" vertex="1" parent="2"/>
           <mxCell id="4" value="+ do-it(first-arg: int): void" style="text;" vertex="1" parent="2"/>"#,
    );
    let db = parse(&input).unwrap();
    let item = &db.classes()[0];
    assert_eq!(item.attributes[0].name, "name");
    assert_eq!(item.methods[0].name, "doit");
    assert_eq!(item.methods[0].parameters[0].name, "firstarg");

    let content = &render(&input).unwrap()[0].content;
    assert!(content.contains("private String name;"));
    assert!(content.contains("public void doit(int firstarg) {"));
}

#[test]
fn test_visibility_default_asymmetry() {
    let input = diagram(
        r#"<mxCell id="2" value="V" style="swimlane;" vertex="1" parent="1"/>
           <mxCell id="3" value="value:int" style="text;" vertex="1" parent="2"/>
           <mxCell id="4" value="value()" style="text;" vertex="1" parent="2"/>"#,
    );
    let db = parse(&input).unwrap();
    let class = &db.classes()[0];
    assert_eq!(class.attributes[0].visibility, Visibility::Private);
    assert_eq!(class.methods[0].visibility, Visibility::Public);
}

#[test]
fn test_inheritance_edge_sets_superclass() {
    let db = parse(&edge_between_a_and_b("endArrow=block;html=1;")).unwrap();
    let a = db.get_class("A").unwrap();
    assert_eq!(a.superclasses, vec!["B"]);
    assert!(a.relations.is_empty());
}

#[test]
fn test_composition_edge_sets_relation() {
    let db = parse(&edge_between_a_and_b("endArrow=diamond;html=1;")).unwrap();
    let a = db.get_class("A").unwrap();
    assert!(a.superclasses.is_empty());
    assert_eq!(a.relations.len(), 1);
    assert_eq!(a.relations[0].kind, RelationKind::Composition);
    assert_eq!(a.relations[0].target, "B");
    assert_eq!(db.edge_count(), 1);
}

#[test]
fn test_return_type_literals() {
    let input = diagram(
        r#"<mxCell id="2" value="R" style="swimlane;" vertex="1" parent="1"/>
           <mxCell id="3" value="a(): int" style="text;" vertex="1" parent="2"/>
           <mxCell id="4" value="b(): boolean" style="text;" vertex="1" parent="2"/>
           <mxCell id="5" value="c(): double" style="text;" vertex="1" parent="2"/>
           <mxCell id="6" value="d(): Object" style="text;" vertex="1" parent="2"/>
           <mxCell id="7" value="e(): void" style="text;" vertex="1" parent="2"/>"#,
    );
    let content = &render(&input).unwrap()[0].content;
    assert!(content.contains("public int a() {\n        return 0;\n    }"));
    assert!(content.contains("public boolean b() {\n        return false;\n    }"));
    assert!(content.contains("public double c() {\n        return 0.0;\n    }"));
    assert!(content.contains("public Object d() {\n        return null;\n    }"));
    assert!(content.contains("public void e() {\n    }"));
}

#[test]
fn test_idempotent_reparse() {
    let input = fs_fixture();
    let first = parse(&input).unwrap();
    let second = parse(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_class_unit() {
    let input = diagram(r#"<mxCell id="2" value="Empty" style="swimlane;" vertex="1" parent="1"/>"#);
    let content = &render(&input).unwrap()[0].content;
    assert!(content.contains("public class Empty\n{\n"));
    assert!(content.contains("    public Empty() {\n    }"));
    assert!(content.ends_with('}'));
    assert!(!content.contains(" get"));
    assert!(!content.contains(" set"));
    assert!(!content.contains("private "));
}

#[test]
fn test_convert_writes_directory() {
    let dir = tempfile::tempdir().unwrap();
    let report = convert(&fs_fixture(), dir.path()).unwrap();
    assert!(report.is_success());
    assert_eq!(report.written.len(), 3);
    for name in ["Shape.java", "Circle.java", "Canvas.java"] {
        assert!(dir.path().join(name).exists(), "{name} should be written");
    }
}

#[test]
fn test_orchestrator_round_trip_with_memory_writer() {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register_default_detectors();
    let input = fs_fixture();
    assert_eq!(orchestrator.detect_diagram_type(&input).unwrap(), "drawio");

    let mut writer = MemoryWriter::new();
    let report = orchestrator.convert(&input, &mut writer).unwrap();
    assert_eq!(report.written, vec!["Shape.java", "Circle.java", "Canvas.java"]);
    assert!(writer
        .get("Circle.java")
        .unwrap()
        .contains("public class Circle extends Shape"));
}

fn fs_fixture() -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shapes.drawio");
    std::fs::read_to_string(path).unwrap()
}
