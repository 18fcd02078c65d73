use indexmap::IndexMap;

use crate::generator::{
  model::{FieldAnnotation, ModelAnnotation, ValidationRule},
  raw::{Constraints, RawPrimitiveType, RawProperty, RawSchema},
  tests::support::{animal_hierarchy, names, object, props, resolve, string_prop},
};

fn mapping(entries: &[(&str, &str)]) -> IndexMap<String, String> {
  entries
    .iter()
    .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
    .collect()
}

#[test]
fn test_mapping_is_inverted_in_child_order() {
  let arena = resolve(animal_hierarchy());

  let animal = arena.get("Animal").unwrap();
  let polymorphism = animal.polymorphism.as_ref().unwrap();
  assert_eq!(polymorphism.discriminator_property_original_name, "type");
  assert_eq!(polymorphism.discriminator_property_generated_name, "type");
  assert_eq!(
    polymorphism.schema_name_to_discriminator_value,
    mapping(&[("Dog", "dog"), ("Cat", "cat")])
  );
  assert_eq!(
    animal.annotations,
    vec![ModelAnnotation::Tagged {
      property: "type".to_string(),
    }]
  );

  let dog = arena.get("Dog").unwrap();
  assert!(dog.used_as_discriminator_child);
  assert_eq!(
    dog.annotations,
    vec![ModelAnnotation::DiscriminatorValue {
      parent: "Animal".to_string(),
      value: "dog".to_string(),
    }]
  );
}

#[test]
fn test_unmapped_children_use_their_schema_name() {
  let mut schemas = animal_hierarchy();
  schemas[0].discriminator_mapping = mapping(&[("cat", "Cat"), ("canine", "Dog")]);
  let arena = resolve(schemas);

  let values = &arena.get("Animal").unwrap().polymorphism.as_ref().unwrap().schema_name_to_discriminator_value;
  assert_eq!(values.keys().cloned().collect::<Vec<_>>(), names(&["Dog", "Cat"]));
  assert_eq!(values["Dog"], "canine");

  let mut schemas = animal_hierarchy();
  schemas[0].discriminator_mapping = mapping(&[("dog", "Dog")]);
  let arena = resolve(schemas);
  let values = &arena.get("Animal").unwrap().polymorphism.as_ref().unwrap().schema_name_to_discriminator_value;
  assert_eq!(values["Cat"], "Cat");
}

#[test]
fn test_all_of_parent_with_discriminator_is_polymorphic() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Shape")
      .discriminator_property_name("shape_type")
      .own_properties(props(vec![("shape_type", string_prop(true))]))
      .build(),
    RawSchema::builder()
      .original_name("Circle")
      .all_of_parents(names(&["Shape"]))
      .own_properties(props(vec![("radius", string_prop(true))]))
      .build(),
    RawSchema::builder()
      .original_name("Square")
      .all_of_parents(names(&["Shape"]))
      .build(),
  ]);

  let shape = arena.get("Shape").unwrap();
  let polymorphism = shape.polymorphism.as_ref().unwrap();
  assert_eq!(polymorphism.discriminator_property_generated_name, "shapeType");
  assert_eq!(
    polymorphism.schema_name_to_discriminator_value,
    mapping(&[("Circle", "Circle"), ("Square", "Square")])
  );
  assert!(arena.get("Square").unwrap().used_as_discriminator_child);
}

#[test]
fn test_discriminator_without_children_has_no_polymorphism() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Pet")
      .discriminator_property_name("petType")
      .build(),
  ]);

  let pet = arena.get("Pet").unwrap();
  assert!(pet.polymorphism.is_none());
  assert!(pet.annotations.is_empty());
}

#[test]
fn test_union_without_discriminator_is_untagged() {
  let arena = resolve(vec![
    RawSchema::builder()
      .original_name("Payload")
      .one_of_children(names(&["Text", "Blob"]))
      .build(),
    object("Text", vec![("body", string_prop(true))]),
    object("Blob", vec![("bytes", string_prop(true))]),
  ]);

  let payload = arena.get("Payload").unwrap();
  assert!(payload.polymorphism.is_none());
  assert_eq!(payload.annotations, vec![ModelAnnotation::Untagged]);
  assert!(!arena.get("Text").unwrap().used_as_discriminator_child);
}

#[test]
fn test_field_annotations() {
  let arena = resolve(vec![object(
    "Account",
    vec![
      (
        "user_name",
        RawProperty::builder()
          .raw_type(RawPrimitiveType::String.into())
          .required(true)
          .deprecated(true)
          .constraints(Constraints {
            min_length: Some(3),
            max_length: Some(32),
            pattern: Some("^[a-z]+$".to_string()),
            ..Default::default()
          })
          .build(),
      ),
      (
        "age",
        RawProperty::builder()
          .raw_type(RawPrimitiveType::Int32.into())
          .constraints(Constraints {
            minimum: Some(0.into()),
            ..Default::default()
          })
          .build(),
      ),
    ],
  )]);

  let account = arena.get("Account").unwrap();
  assert_eq!(
    account.field("userName").unwrap().annotations,
    vec![
      FieldAnnotation::Rename {
        wire_name: "user_name".to_string(),
      },
      FieldAnnotation::Deprecated,
      FieldAnnotation::Validation(ValidationRule::Length {
        min: Some(3),
        max: Some(32),
      }),
      FieldAnnotation::Validation(ValidationRule::Pattern {
        regex: "^[a-z]+$".to_string(),
      }),
    ]
  );
  assert_eq!(
    account.field("age").unwrap().annotations,
    vec![FieldAnnotation::Validation(ValidationRule::Range {
      min: Some(0.into()),
      max: None,
    })]
  );
}
