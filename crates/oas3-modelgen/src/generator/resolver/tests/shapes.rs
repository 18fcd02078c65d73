use crate::generator::{
  model::{FieldType, ModelShape},
  raw::{RawSchema, RawType},
  tests::support::{animal_hierarchy, names, object, ref_prop, resolve, string_prop},
};

#[test]
fn test_one_of_union_becomes_sealed_interface() {
  let arena = resolve(animal_hierarchy());

  assert_eq!(arena.get("Animal").unwrap().shape, ModelShape::SealedInterface { extends: vec![] });
  for child in ["Dog", "Cat"] {
    assert_eq!(
      arena.get(child).unwrap().shape,
      ModelShape::DataClass {
        extend: None,
        implements: names(&["Animal"]),
      },
      "{child} should implement the union exactly once"
    );
  }
}

#[test]
fn test_array_schema_becomes_type_alias() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Tags")
      .is_array_schema(true)
      .array_item_type(RawType::reference("Tag"))
      .build(),
    object("Tag", vec![("label", string_prop(true))]),
  ]);

  assert_eq!(
    arena.get("Tags").unwrap().shape,
    ModelShape::TypeAlias {
      target: FieldType::list(FieldType::reference("Tag", false), false),
    }
  );
  assert!(arena.get("Tags").unwrap().fields.is_empty());
}

#[test]
fn test_enum_schema_becomes_enum_class() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Status")
      .enum_values(names(&["available", "sold"]))
      .build(),
  ]);

  assert_eq!(
    arena.get("Status").unwrap().shape,
    ModelShape::EnumClass {
      values: names(&["available", "sold"]),
    }
  );
}

#[test]
fn test_unused_all_of_parent_becomes_sealed_interface() {
  let arena = resolve(vec![
    object("Base", vec![("id", string_prop(true))]),
    RawSchema::builder()
      .original_name("Child")
      .all_of_parents(names(&["Base"]))
      .build(),
  ]);

  assert_eq!(arena.get("Base").unwrap().shape, ModelShape::sealed_interface());
  assert_eq!(
    arena.get("Child").unwrap().shape,
    ModelShape::DataClass {
      extend: None,
      implements: names(&["Base"]),
    }
  );
}

#[test]
fn test_used_all_of_parent_becomes_open_class() {
  let arena = resolve(vec![
    object("Holder", vec![("base", ref_prop("Base", false))]),
    object("Base", vec![("id", string_prop(true))]),
    RawSchema::builder()
      .original_name("Child")
      .all_of_parents(names(&["Base"]))
      .build(),
  ]);

  assert_eq!(arena.get("Base").unwrap().shape, ModelShape::open_class());
  assert_eq!(
    arena.get("Child").unwrap().shape,
    ModelShape::DataClass {
      extend: Some("Base".to_string()),
      implements: vec![],
    }
  );
}

#[test]
fn test_multiple_class_parents_keep_the_first() {
  let arena = resolve(vec![
    object(
      "Holder",
      vec![("first", ref_prop("First", false)), ("second", ref_prop("Second", false))],
    ),
    object("First", vec![]),
    object("Second", vec![]),
    RawSchema::builder()
      .original_name("Both")
      .all_of_parents(names(&["First", "Second"]))
      .build(),
  ]);

  assert_eq!(
    arena.get("Both").unwrap().shape,
    ModelShape::DataClass {
      extend: Some("First".to_string()),
      implements: vec![],
    }
  );
}

#[test]
fn test_sealed_interface_extends_sealed_parents() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Shape")
      .one_of_children(names(&["Polygon"]))
      .build(),
    RawSchema::builder()
      .original_name("Polygon")
      .all_of_parents(names(&["Shape"]))
      .one_of_children(names(&["Square"]))
      .build(),
    object("Square", vec![("side", string_prop(true))]),
  ]);

  assert_eq!(
    arena.get("Polygon").unwrap().shape,
    ModelShape::SealedInterface {
      extends: names(&["Shape"]),
    }
  );
  assert_eq!(
    arena.get("Square").unwrap().shape,
    ModelShape::DataClass {
      extend: None,
      implements: names(&["Polygon"]),
    }
  );
}

#[test]
fn test_enum_and_alias_parents_are_not_linked() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Kind")
      .enum_values(names(&["a"]))
      .build(),
    RawSchema::builder()
      .original_name("Odd")
      .all_of_parents(names(&["Kind", "Missing"]))
      .build(),
  ]);

  assert_eq!(arena.get("Odd").unwrap().shape, ModelShape::data_class());
}
