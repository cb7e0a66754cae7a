//! Model tests: insertion order, anonymous naming, strict duplicate rejection.

use protoprint::{Entry, Field, Format, ModelError, Module, Protocol, Structure, Type};

#[test]
fn test_entry_order_is_insertion_order() {
    let mut m = Module::new("M");
    m.insert("b", Entry::constant(Type::uint8(Format::Dec), 2)).expect("insert");
    m.insert("a", Entry::constant(Type::uint8(Format::Dec), 1)).expect("insert");
    m.insert("c", Entry::constant(Type::uint8(Format::Dec), 3)).expect("insert");
    let names: Vec<_> = m.entries().map(|(n, _)| n.to_string()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_anonymous_entries_get_distinct_ordered_names() {
    let mut m = Module::new("M");
    let first = m.insert_anonymous(Entry::Blank);
    m.insert("x", Entry::constant(Type::uint8(Format::Dec), 1)).expect("insert");
    let second = m.insert_anonymous(Entry::LineComment("note".to_string()));
    let third = m.insert_anonymous(Entry::Blank);
    assert_eq!(first, "__internal__1");
    assert_eq!(second, "__internal__2");
    assert_eq!(third, "__internal__3");
    let names: Vec<_> = m.entries().map(|(n, _)| n.to_string()).collect();
    assert_eq!(names, vec!["__internal__1", "x", "__internal__2", "__internal__3"]);
}

#[test]
fn test_duplicate_entry_name_is_rejected() {
    let mut m = Module::new("M");
    m.insert("x", Entry::constant(Type::uint8(Format::Dec), 1)).expect("insert");
    match m.insert("x", Entry::Blank) {
        Err(ModelError::DuplicateEntry { module, name }) => {
            assert_eq!(module, "M");
            assert_eq!(name, "x");
        }
        other => panic!("expected DuplicateEntry, got {:?}", other),
    }
    // Prior entry keeps its slot and payload.
    assert_eq!(m.get("x"), Some(&Entry::constant(Type::uint8(Format::Dec), 1)));
}

#[test]
fn test_empty_entry_name_is_rejected() {
    let mut m = Module::new("M");
    assert!(matches!(m.insert("", Entry::Blank), Err(ModelError::EmptyName { .. })));
}

#[test]
fn test_structure_preserves_field_order_and_rejects_duplicates() {
    let s = Structure::with_fields(
        vec![],
        vec![
            Field::new("first", Type::uint16(Format::Dec)),
            Field::new("second", Type::uint8(Format::Dec)),
            Field::new("third", Type::uint32(Format::Hex)),
        ],
    )
    .expect("build");
    let names: Vec<_> = s.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);

    let dup = Structure::with_fields(
        vec![],
        vec![
            Field::new("a", Type::uint8(Format::Dec)),
            Field::new("a", Type::uint8(Format::Dec)),
        ],
    );
    assert!(matches!(dup, Err(ModelError::DuplicateField { .. })));
}

#[test]
fn test_protocol_keeps_module_declaration_order() {
    let mut p = Protocol::new("P", vec![]);
    p.add_module(Module::new("Second"));
    p.add_module(Module::new("First"));
    let names: Vec<_> = p.modules().iter().map(|m| m.name().to_string()).collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[test]
fn test_imports_keep_declaration_order() {
    let a = Module::new("A");
    let b = Module::new("B");
    let mut m = Module::new("M");
    m.add_import(&b);
    m.add_import(&a);
    assert_eq!(m.imports(), &["B".to_string(), "A".to_string()]);
}
