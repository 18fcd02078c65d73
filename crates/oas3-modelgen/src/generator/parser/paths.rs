use std::collections::{BTreeMap, BTreeSet};

use mediatype::MediaType;
use oas3::{
  Spec,
  spec::{MediaType as ContentMedia, ObjectOrReference, ObjectSchema, Operation, Parameter, Schema, SchemaType},
};

use super::schemas::{nested_schema_refs, primary_type, single_composition_ref, type_name};
use crate::{
  generator::raw::{
    RawOperation, RawParameter, RawPath, RawPrimitiveType, RawRequestBody, RawResponse, RawType,
  },
  utils::extract_schema_ref_name,
};

const DEFAULT_GROUP: &str = "default";

/// Groups `paths` operations into [`RawPath`]s.
pub(super) struct PathCollector<'a> {
  spec: &'a Spec,
}

impl<'a> PathCollector<'a> {
  pub(super) fn new(spec: &'a Spec) -> Self {
    Self { spec }
  }

  pub(super) fn collect(&self) -> Vec<RawPath> {
    let mut groups: BTreeMap<String, Vec<RawOperation>> = BTreeMap::new();

    for (path, method, operation) in self.spec.operations() {
      let group = group_name(&path, operation);
      let raw = self.operation(path, method, operation);
      groups.entry(group).or_default().push(raw);
    }

    groups
      .into_iter()
      .map(|(name, mut operations)| {
        operations.sort_by(|a, b| {
          (&a.operation_id, a.method.as_str(), &a.path).cmp(&(&b.operation_id, b.method.as_str(), &b.path))
        });
        RawPath { name, operations }
      })
      .collect()
  }

  fn operation(&self, path: String, method: http::Method, operation: &Operation) -> RawOperation {
    let mut inline_refs = BTreeSet::new();

    let request_body = operation
      .request_body
      .as_ref()
      .and_then(|body| body.resolve(self.spec).ok())
      .and_then(|body| {
        let (content_type, media) = preferred_content(&body.content)?;
        let schema = media.schema.as_ref();
        inline_refs.extend(schema.map(inline_schema_refs).unwrap_or_default());
        Some(RawRequestBody {
          content_type: content_type.clone(),
          raw_type: schema.map_or(RawPrimitiveType::Any.into(), operation_type),
          required: body.required.unwrap_or(false),
        })
      });

    let responses: Vec<RawResponse> = operation
      .responses
      .iter()
      .flatten()
      .filter_map(|(status_code, response)| {
        let response = response.resolve(self.spec).ok()?;
        let content = preferred_content(&response.content);
        let schema = content.and_then(|(_, media)| media.schema.as_ref());
        inline_refs.extend(schema.map(inline_schema_refs).unwrap_or_default());
        Some(RawResponse {
          status_code: status_code.clone(),
          content_type: content.map(|(content_type, _)| content_type.clone()),
          raw_type: schema.map(operation_type),
          description: response.description.clone(),
        })
      })
      .collect();

    let parameters = self.parameters(&path, operation, &mut inline_refs);

    RawOperation {
      operation_id: operation.operation_id.clone(),
      parameters,
      method,
      path,
      summary: operation.summary.clone(),
      deprecated: operation.deprecated.unwrap_or(false),
      request_body,
      responses,
      inline_refs: inline_refs.into_iter().collect(),
    }
  }

  /// Path-item parameters merged with operation parameters; the operation wins
  /// on (location, name).
  fn parameters(&self, path: &str, operation: &Operation, inline_refs: &mut BTreeSet<String>) -> Vec<RawParameter> {
    let mut params: Vec<Parameter> = self
      .spec
      .paths
      .as_ref()
      .and_then(|paths| paths.get(path))
      .map(|item| item.parameters.iter().filter_map(|param| param.resolve(self.spec).ok()).collect())
      .unwrap_or_default();

    for param in operation.parameters.iter().filter_map(|param| param.resolve(self.spec).ok()) {
      params.retain(|existing| existing.location != param.location || existing.name != param.name);
      params.push(param);
    }

    inline_refs.extend(params.iter().filter_map(|param| param.schema.as_ref()).flat_map(inline_schema_refs));

    params
      .into_iter()
      .map(|param| RawParameter {
        raw_type: param.schema.as_ref().map_or(RawPrimitiveType::String.into(), operation_type),
        location: param.location.into(),
        required: param.required.unwrap_or(false),
        description: param.description,
        name: param.name,
      })
      .collect()
  }
}

/// First tag, else first literal path segment, else `default`.
fn group_name(path: &str, operation: &Operation) -> String {
  operation
    .tags
    .first()
    .cloned()
    .or_else(|| {
      path
        .split('/')
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .map(str::to_string)
    })
    .unwrap_or_else(|| DEFAULT_GROUP.to_string())
}

fn is_json(content_type: &str) -> bool {
  let Ok(media) = MediaType::parse(content_type) else {
    return false;
  };
  let suffix = media.suffix.as_ref().map(mediatype::Name::as_str);
  matches!((media.ty.as_str(), media.subty.as_str(), suffix), ("application", "json", _) | (_, _, Some("json")))
}

fn preferred_content(content: &BTreeMap<String, ContentMedia>) -> Option<(&String, &ContentMedia)> {
  content
    .iter()
    .find(|(content_type, _)| is_json(content_type))
    .or_else(|| content.iter().next())
}

/// Types in operations are not hoisted; inline objects and unions become `Any`.
/// Single-ref wrappers collapse to the ref, as they do for properties.
fn operation_type(schema_ref: &ObjectOrReference<ObjectSchema>) -> RawType {
  let ObjectOrReference::Object(schema) = schema_ref else {
    return extract_schema_ref_name(schema_ref).map_or(RawPrimitiveType::Any.into(), RawType::Ref);
  };

  if let Some(target) = single_composition_ref(schema) {
    return RawType::Ref(target);
  }

  match primary_type(schema) {
    Some(SchemaType::Array) => match schema.items.as_deref() {
      Some(Schema::Object(items)) => RawType::array_of(operation_type(items)),
      Some(Schema::Boolean(_)) | None => RawType::array_of(RawPrimitiveType::Any.into()),
    },
    Some(SchemaType::Object) | None => RawPrimitiveType::Any.into(),
    Some(schema_type) => RawPrimitiveType::from_type_and_format(type_name(schema_type), schema.format.as_deref()).into(),
  }
}

/// Schemas named inside an inline operation schema; empty for a plain `$ref`.
fn inline_schema_refs(schema_ref: &ObjectOrReference<ObjectSchema>) -> Vec<String> {
  match schema_ref {
    ObjectOrReference::Object(schema) => nested_schema_refs(schema),
    ObjectOrReference::Ref { .. } => vec![],
  }
}
