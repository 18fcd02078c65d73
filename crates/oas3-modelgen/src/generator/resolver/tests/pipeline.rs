use crate::generator::{
  config::MappingConfig,
  model::ModelShape,
  raw::{RawSchema, RawType},
  resolver::{FieldResolver, PolymorphismResolver, ShapeResolver},
  tests::support::{animal_hierarchy, names, object, props, ref_prop, resolve, resolve_with, string_prop},
  type_mapping::TypeMapper,
};

fn sample() -> Vec<RawSchema> {
  let mut schemas = animal_hierarchy();
  schemas.extend([
    object("Zoo", vec![("star", ref_prop("Animal", true)), ("tags", ref_prop("Tags", false))]),
    RawSchema::builder()
      .original_name("Tags")
      .is_array_schema(true)
      .array_item_type(RawType::reference("Tag"))
      .build(),
    object("Tag", vec![("label", string_prop(true))]),
    RawSchema::builder()
      .original_name("Puppy")
      .all_of_parents(names(&["Dog"]))
      .own_properties(props(vec![("age", string_prop(false))]))
      .build(),
  ]);
  schemas
}

#[test]
fn test_resolution_is_deterministic() {
  assert_eq!(resolve(sample()), resolve(sample()));
}

#[test]
fn test_rerunning_late_passes_is_idempotent() {
  let config = MappingConfig::default();
  let mapper = TypeMapper::new(&config);
  let resolved = resolve(sample());

  let mut again = resolved.clone();
  ShapeResolver::new(mapper).resolve(&mut again);
  let warnings = FieldResolver::new(mapper).resolve(&mut again);
  PolymorphismResolver::resolve(&mut again);

  assert!(warnings.is_empty());
  assert_eq!(again, resolved);
}

#[test]
fn test_every_model_gets_a_shape() {
  let arena = resolve(sample());
  assert!(arena.iter().all(|model| model.shape != ModelShape::Undecided));
  assert_eq!(arena.len(), 7);
}

#[test]
fn test_subclass_of_union_member_extends_it() {
  let arena = resolve(sample());

  // Dog is reachable from Zoo.star and has an allOf child.
  assert_eq!(
    arena.get("Dog").unwrap().shape,
    ModelShape::OpenClass {
      extend: None,
      implements: names(&["Animal"]),
    }
  );
  let puppy = arena.get("Puppy").unwrap();
  assert_eq!(puppy.shape.extend(), Some("Dog"));
  assert!(puppy.shape.interfaces().is_empty());
  assert_eq!(
    puppy.fields.iter().map(|field| field.original_name.as_str()).collect::<Vec<_>>(),
    vec!["type", "bark", "age"]
  );
}

#[test]
fn test_cycles_are_reported() {
  let result = resolve_with(
    vec![object("Node", vec![("next", ref_prop("Node", false))])],
    &[],
    &MappingConfig::default(),
  );

  assert_eq!(result.cycles.cycles(), &[names(&["Node"])]);
  assert!(result.warnings.is_empty());
}
