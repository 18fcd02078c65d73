use std::collections::BTreeSet;

use super::{
  model::{ApiBody, ApiDescriptor, ApiOperation, ApiParam, ApiResponse},
  raw::{RawOperation, RawPath, RawResponse},
  type_mapping::TypeMapper,
};
use crate::naming::identifiers::{ensure_unique, to_generated_field_name, to_generated_type_name, to_operation_name};

/// Turns grouped raw operations into [`ApiDescriptor`]s.
///
/// Independent of the model pipeline: types stay as schema names and are
/// looked up by renderers.
pub(crate) struct ApiResolver<'a> {
  mapper: TypeMapper<'a>,
}

impl<'a> ApiResolver<'a> {
  pub(crate) fn new(mapper: TypeMapper<'a>) -> Self {
    Self { mapper }
  }

  pub(crate) fn resolve(&self, paths: &[RawPath]) -> Vec<ApiDescriptor> {
    paths.iter().map(|path| self.resolve_group(path)).collect()
  }

  fn resolve_group(&self, path: &RawPath) -> ApiDescriptor {
    let mut used_names = BTreeSet::new();
    let operations = path
      .operations
      .iter()
      .map(|operation| {
        let base_name = to_operation_name(operation.operation_id.as_deref(), operation.method.as_str(), &operation.path);
        let generated_name = ensure_unique(&base_name, &used_names);
        if generated_name != base_name {
          tracing::debug!(group = %path.name, %base_name, %generated_name, "renamed colliding operation");
        }
        used_names.insert(generated_name.clone());
        self.resolve_operation(operation, generated_name)
      })
      .collect();

    ApiDescriptor {
      original_name: path.name.clone(),
      generated_name: format!("{}Api", to_generated_type_name(&path.name)),
      operations,
    }
  }

  fn resolve_operation(&self, operation: &RawOperation, generated_name: String) -> ApiOperation {
    let params = operation
      .parameters
      .iter()
      .map(|param| ApiParam {
        original_name: param.name.clone(),
        generated_name: to_generated_field_name(&param.name),
        location: param.location,
        field_type: self.mapper.map(&param.raw_type, param.required),
        required: param.required,
        description: param.description.clone(),
      })
      .collect();

    let body = operation.request_body.as_ref().map(|body| ApiBody {
      content_type: body.content_type.clone(),
      field_type: self.mapper.map(&body.raw_type, body.required),
      required: body.required,
    });

    let success_response = success_response(&operation.responses).map(|response| ApiResponse {
      status_code: response.status_code.clone(),
      content_type: response.content_type.clone(),
      field_type: response.raw_type.as_ref().map(|raw_type| self.mapper.map(raw_type, true)),
    });

    ApiOperation {
      generated_name,
      operation_id: operation.operation_id.clone(),
      method: operation.method.to_string(),
      path: operation.path.clone(),
      summary: operation.summary.clone(),
      deprecated: operation.deprecated,
      params,
      body,
      success_response,
    }
  }
}

/// First 2xx response, else `default`.
fn success_response(responses: &[RawResponse]) -> Option<&RawResponse> {
  responses
    .iter()
    .find(|response| response.status_code.starts_with('2'))
    .or_else(|| responses.iter().find(|response| response.status_code == "default"))
}
