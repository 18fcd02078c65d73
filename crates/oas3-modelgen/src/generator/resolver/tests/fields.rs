use serde_json::json;

use crate::generator::{
  config::MappingConfig,
  metrics::GenerationWarning,
  model::{Field, FieldType, ModelArena, ModelShape, TrivialKind},
  raw::{RawPrimitiveType, RawProperty, RawSchema, RawType},
  resolver::FieldResolver,
  tests::support::{animal_hierarchy, names, object, props, ref_prop, resolve, string_prop, typed_prop},
  type_mapping::TypeMapper,
};

fn field_names(arena: &ModelArena, schema: &str) -> Vec<String> {
  arena
    .get(schema)
    .unwrap()
    .fields
    .iter()
    .map(|field| field.original_name.clone())
    .collect()
}

#[test]
fn test_discriminator_field_is_injected_first() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Pet")
      .discriminator_property_name("petType")
      .own_properties(props(vec![("name", string_prop(true))]))
      .build(),
  ]);

  let pet = arena.get("Pet").unwrap();
  assert_eq!(
    pet.fields[0],
    Field::builder()
      .original_name("petType")
      .generated_name("petType")
      .field_type(FieldType::trivial(TrivialKind::String, false))
      .required(true)
      .build()
  );
  assert_eq!(field_names(&arena, "Pet"), names(&["petType", "name"]));
}

#[test]
fn test_declared_discriminator_is_not_duplicated() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Pet")
      .discriminator_property_name("kind")
      .own_properties(props(vec![("name", string_prop(true)), ("kind", string_prop(true))]))
      .build(),
  ]);

  assert_eq!(field_names(&arena, "Pet"), names(&["name", "kind"]));
}

#[test]
fn test_union_members_inherit_discriminator_field() {
  let arena = resolve(animal_hierarchy());

  let dog = arena.get("Dog").unwrap();
  assert_eq!(field_names(&arena, "Dog"), names(&["type", "bark"]));
  assert!(dog.fields[0].required);
  assert!(dog.fields[0].overridden);

  let bark = dog.field("bark").unwrap();
  assert!(bark.required);
  assert_eq!(bark.field_type, FieldType::trivial(TrivialKind::String, false));
  assert!(!bark.overridden);
}

#[test]
fn test_self_referencing_schema_resolves() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Node")
      .own_properties(props(vec![(
        "children",
        RawProperty::builder()
          .raw_type(RawType::array_of(RawType::reference("Node")))
          .build(),
      )]))
      .build(),
  ]);

  let node = arena.get("Node").unwrap();
  assert_eq!(node.fields.len(), 1);
  assert_eq!(
    node.fields[0].field_type,
    FieldType::list(FieldType::reference("Node", false), true)
  );
}

#[test]
fn test_ancestor_fields_come_first_and_are_overridden() {
  let arena = resolve(vec![
    object("Base", vec![("id", string_prop(true)), ("note", string_prop(false))]),
    RawSchema::builder()
      .original_name("Child")
      .all_of_parents(names(&["Base"]))
      .own_properties(props(vec![("extra", string_prop(false)), ("note", string_prop(false))]))
      .build(),
  ]);

  let child = arena.get("Child").unwrap();
  assert_eq!(field_names(&arena, "Child"), names(&["id", "note", "extra"]));
  assert!(child.field("id").unwrap().overridden);
  assert!(child.field("note").unwrap().overridden, "own redeclaration of an inherited name");
  assert!(!child.field("extra").unwrap().overridden);
}

#[test]
fn test_requiredness_is_monotone_down_the_chain() {
  let arena = resolve(vec![
    object("Root", vec![("id", string_prop(true))]),
    RawSchema::builder()
      .original_name("Middle")
      .all_of_parents(names(&["Root"]))
      .own_properties(props(vec![("id", string_prop(false))]))
      .build(),
    RawSchema::builder()
      .original_name("Leaf")
      .all_of_parents(names(&["Middle"]))
      .own_properties(props(vec![("id", string_prop(false))]))
      .build(),
  ]);

  for schema in ["Middle", "Leaf"] {
    let id = arena.get(schema).unwrap().field("id").unwrap();
    assert!(id.required, "{schema}.id must stay required");
    assert!(!id.field_type.nullable());
  }
}

#[test]
fn test_own_required_upgrades_optional_ancestor() {
  let arena = resolve(vec![
    object("Base", vec![("name", string_prop(false))]),
    RawSchema::builder()
      .original_name("Child")
      .all_of_parents(names(&["Base"]))
      .own_properties(props(vec![("name", string_prop(true))]))
      .build(),
  ]);

  assert!(arena.get("Child").unwrap().field("name").unwrap().required);
  assert!(!arena.get("Base").unwrap().field("name").unwrap().required);
}

#[test]
fn test_conflicting_ancestor_types_keep_first_seen() {
  let arena = resolve(vec![
    object("Left", vec![("code", typed_prop(RawPrimitiveType::Int32, false))]),
    object("Right", vec![("code", string_prop(true))]),
    RawSchema::builder()
      .original_name("Joined")
      .all_of_parents(names(&["Left", "Right"]))
      .build(),
  ]);

  let code = arena.get("Joined").unwrap().field("code").unwrap();
  assert_eq!(code.field_type, FieldType::trivial(TrivialKind::Int, false));
  assert!(code.required, "requiredness is OR'd across both declarations");
}

#[test]
fn test_diamond_ancestor_is_collected_once() {
  let arena = resolve(vec![
    object("Base", vec![("id", string_prop(true))]),
    RawSchema::builder()
      .original_name("Left")
      .all_of_parents(names(&["Base"]))
      .own_properties(props(vec![("left", string_prop(false))]))
      .build(),
    RawSchema::builder()
      .original_name("Right")
      .all_of_parents(names(&["Base"]))
      .own_properties(props(vec![("right", string_prop(false))]))
      .build(),
    RawSchema::builder()
      .original_name("Bottom")
      .all_of_parents(names(&["Left", "Right"]))
      .build(),
  ]);

  assert_eq!(field_names(&arena, "Bottom"), names(&["id", "left", "right"]));
}

#[test]
fn test_cyclic_all_of_terminates() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("A")
      .all_of_parents(names(&["B"]))
      .own_properties(props(vec![("a", string_prop(true))]))
      .build(),
    RawSchema::builder()
      .original_name("B")
      .all_of_parents(names(&["A"]))
      .own_properties(props(vec![("b", string_prop(true))]))
      .build(),
  ]);

  assert_eq!(field_names(&arena, "A"), names(&["b", "a"]));
  assert_eq!(field_names(&arena, "B"), names(&["a", "b"]));
}

#[test]
fn test_parent_requiredness_flows_through_generated_names() {
  let arena = resolve(vec![
    object("Holder", vec![("base", ref_prop("Base", false))]),
    object("Base", vec![("first_name", string_prop(true))]),
    RawSchema::builder()
      .original_name("Child")
      .all_of_parents(names(&["Base"]))
      .own_properties(props(vec![("firstName", string_prop(false))]))
      .build(),
  ]);

  let child = arena.get("Child").unwrap();
  assert_eq!(child.shape.extend(), Some("Base"));

  let camel = child
    .fields
    .iter()
    .find(|field| field.original_name == "firstName")
    .unwrap();
  assert!(camel.required);
  assert!(!camel.field_type.nullable());
}

#[test]
fn test_nullability_matches_requiredness_everywhere() {
  let mut schemas = animal_hierarchy();
  schemas.extend([
    object("Holder", vec![("animal", ref_prop("Animal", false)), ("base", ref_prop("Base", true))]),
    object("Base", vec![("id", string_prop(true)), ("tags", string_prop(false))]),
    RawSchema::builder()
      .original_name("Child")
      .all_of_parents(names(&["Base"]))
      .discriminator_property_name("kind")
      .own_properties(props(vec![("tags", string_prop(true)), ("size", typed_prop(RawPrimitiveType::Int64, false))]))
      .build(),
  ]);
  let arena = resolve(schemas);

  for model in &arena {
    for field in &model.fields {
      assert_eq!(
        field.field_type.nullable(),
        !field.required,
        "{}.{} breaks nullable == !required",
        model.name(),
        field.original_name
      );
    }
  }
}

#[test]
fn test_enum_and_alias_have_no_fields() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Status")
      .enum_values(names(&["on", "off"]))
      .own_properties(props(vec![("ignored", string_prop(true))]))
      .build(),
    RawSchema::builder()
      .original_name("Ids")
      .is_array_schema(true)
      .array_item_type(RawPrimitiveType::Int64.into())
      .build(),
  ]);

  assert!(arena.get("Status").unwrap().fields.is_empty());
  assert!(arena.get("Ids").unwrap().fields.is_empty());
}

#[test]
fn test_default_values_render_as_literals() {
  let arena = resolve(vec![object(
    "Settings",
    vec![
      (
        "mode",
        RawProperty::builder()
          .raw_type(RawPrimitiveType::String.into())
          .default_value(json!("fast"))
          .build(),
      ),
      (
        "retries",
        RawProperty::builder()
          .raw_type(RawPrimitiveType::Int32.into())
          .default_value(json!(3))
          .build(),
      ),
    ],
  )]);

  let settings = arena.get("Settings").unwrap();
  assert_eq!(settings.field("mode").unwrap().default_value_code.as_deref(), Some("\"fast\""));
  assert_eq!(settings.field("retries").unwrap().default_value_code.as_deref(), Some("3"));
}

#[test]
fn test_undecided_models_become_empty_data_classes() {
  let config = MappingConfig::default();
  let mut arena = ModelArena::new(vec![object("Loose", vec![("id", string_prop(true))])], "models");

  let warnings = FieldResolver::new(TypeMapper::new(&config)).resolve(&mut arena);

  let loose = arena.get("Loose").unwrap();
  assert_eq!(loose.shape, ModelShape::data_class());
  assert!(loose.fields.is_empty());
  assert_eq!(
    warnings,
    vec![GenerationWarning::UndecidedShape {
      schema_name: "Loose".to_string(),
    }]
  );
}

#[test]
fn test_colliding_generated_names_are_reported() {
  let config = MappingConfig::default();
  let mut arena = ModelArena::new(
    vec![
      object("Person", vec![("first_name", string_prop(true))]),
      RawSchema::builder()
        .original_name("Employee")
        .all_of_parents(names(&["Person"]))
        .own_properties(props(vec![("firstName", string_prop(false))]))
        .build(),
    ],
    "models",
  );
  for model in arena.iter_mut() {
    model.shape = ModelShape::data_class();
  }

  let warnings = FieldResolver::new(TypeMapper::new(&config)).resolve(&mut arena);

  assert_eq!(field_names(&arena, "Employee"), names(&["first_name", "firstName"]));
  assert_eq!(
    warnings,
    vec![GenerationWarning::DuplicateFieldName {
      schema_name: "Employee".to_string(),
      generated_name: "firstName".to_string(),
    }]
  );
  assert_eq!(warnings[0].to_string(), "Schema 'Employee' has several properties named 'firstName'");
}
