use super::{render, render_with};
use crate::generator::{
  codegen::Visibility,
  raw::{Constraints, RawPrimitiveType, RawProperty, RawSchema, RawType},
  tests::support::{animal_hierarchy, names, object, props, ref_prop, string_prop, typed_prop},
};

#[test]
fn test_fields_are_renamed_and_optional() {
  let code = render(vec![object(
    "Person",
    vec![
      ("firstName", string_prop(true)),
      ("nickname", string_prop(false)),
      ("type", string_prop(true)),
    ],
  )]);

  assert!(code.contains("pub struct Person {"), "{code}");
  assert!(code.contains("#[serde(rename = \"firstName\")]"));
  assert!(code.contains("pub first_name: String,"));
  assert!(code.contains("#[serde(default, skip_serializing_if = \"Option::is_none\")]"));
  assert!(code.contains("pub nickname: Option<String>,"));
  assert!(code.contains("pub r#type: String,"));
  assert!(!code.contains("rename = \"type\""), "raw identifiers keep the wire name");
}

#[test]
fn test_self_reference_is_boxed() {
  let node = RawSchema::builder()
    .original_name("Node")
    .own_properties(props(vec![
      ("next", ref_prop("Node", false)),
      (
        "children",
        RawProperty::builder()
          .raw_type(RawType::array_of(RawType::reference("Node")))
          .required(true)
          .build(),
      ),
    ]))
    .build();
  let code = render(vec![node]);

  assert!(code.contains("pub next: Option<Box<Node>>,"), "{code}");
  assert!(code.contains("pub children: Vec<Node>,"), "lists need no box");
}

#[test]
fn test_trivial_kinds_map_to_rust_types() {
  let code = render(vec![object(
    "Sample",
    vec![
      ("count", typed_prop(RawPrimitiveType::Int32, true)),
      ("total", typed_prop(RawPrimitiveType::Integer, true)),
      ("ratio", typed_prop(RawPrimitiveType::Number, true)),
      ("born", typed_prop(RawPrimitiveType::Date, true)),
      ("seen", typed_prop(RawPrimitiveType::DateTime, true)),
      ("blob", typed_prop(RawPrimitiveType::Binary, true)),
      ("extra", typed_prop(RawPrimitiveType::Any, true)),
    ],
  )]);

  for expected in [
    "pub count: i32,",
    "pub total: i32,",
    "pub ratio: f64,",
    "pub born: chrono::NaiveDate,",
    "pub seen: chrono::DateTime<chrono::Utc>,",
    "pub blob: Vec<u8>,",
    "pub extra: serde_json::Value,",
  ] {
    assert!(code.contains(expected), "missing `{expected}` in:\n{code}");
  }
}

#[test]
fn test_constraints_become_validation() {
  let username = RawProperty::builder()
    .raw_type(RawPrimitiveType::String.into())
    .required(true)
    .constraints(Constraints {
      min_length: Some(3),
      max_length: Some(32),
      pattern: Some("^[a-z]+$".to_string()),
      ..Default::default()
    })
    .build();
  let age = RawProperty::builder()
    .raw_type(RawPrimitiveType::Int32.into())
    .constraints(Constraints {
      minimum: Some(0.into()),
      ..Default::default()
    })
    .build();
  let code = render(vec![object("Account", vec![("username", username), ("age", age)])]);

  assert!(code.contains("validator::Validate"), "{code}");
  assert!(code.contains("#[validate(length(min = 3, max = 32))]"));
  assert!(code.contains("#[validate(range(min = 0))]"));
  assert!(code.contains("Pattern: `^[a-z]+$`"));
}

#[test]
fn test_plain_struct_has_no_validate_derive() {
  let code = render(vec![object("Tag", vec![("label", string_prop(true))])]);

  assert!(code.contains("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]"), "{code}");
  assert!(!code.contains("validate"));
}

#[test]
fn test_docs_mention_defaults_and_deprecation() {
  let limit = RawProperty::builder()
    .raw_type(RawPrimitiveType::Int32.into())
    .default_value(serde_json::json!(20))
    .description("Page size.")
    .build();
  let legacy = RawProperty::builder()
    .raw_type(RawPrimitiveType::String.into())
    .deprecated(true)
    .build();
  let code = render(vec![object("Page", vec![("limit", limit), ("legacy", legacy)])]);

  assert!(code.contains("Page size."), "{code}");
  assert!(code.contains("Default: `20`"));
  assert!(code.contains("#[deprecated]"));
}

#[test]
fn test_tagged_children_leave_discriminator_to_the_enum() {
  let code = render(animal_hierarchy());

  assert!(code.contains("pub struct Dog {"), "{code}");
  assert!(code.contains("pub bark: String,"));
  assert!(!code.contains("pub r#type"), "discriminator is written by the enum");
  assert!(code.contains("Implements [`Animal`]."));
}

#[test]
fn test_extend_linkage_is_documented() {
  let schemas = vec![
    object("Base", vec![("id", string_prop(true))]),
    RawSchema::builder()
      .original_name("Derived")
      .all_of_parents(names(&["Base"]))
      .own_properties(props(vec![("extra", string_prop(false))]))
      .build(),
    object("Holder", vec![("base", ref_prop("Base", true))]),
  ];
  let code = render(schemas);

  assert!(code.contains("Extends [`Base`]."), "{code}");
  assert!(code.contains("pub struct Derived {"));
  assert!(code.contains("pub id: String,"));
}

#[test]
fn test_visibility_applies_to_structs_and_fields() {
  let schemas = || vec![object("Tag", vec![("label", string_prop(true))])];

  let crate_code = render_with(schemas(), Visibility::Crate);
  assert!(crate_code.contains("pub(crate) struct Tag {"), "{crate_code}");
  assert!(crate_code.contains("pub(crate) label: String,"));

  let file_code = render_with(schemas(), Visibility::File);
  assert!(file_code.contains("struct Tag {"), "{file_code}");
  assert!(!file_code.contains("pub "));
}
