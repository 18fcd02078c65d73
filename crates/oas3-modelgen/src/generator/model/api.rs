use serde::Serialize;

use super::FieldType;
use crate::generator::raw::ParameterLocation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiParam {
  pub original_name: String,
  pub generated_name: String,
  pub location: ParameterLocation,
  #[serde(rename = "type")]
  pub field_type: FieldType,
  pub required: bool,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiBody {
  pub content_type: String,
  #[serde(rename = "type")]
  pub field_type: FieldType,
  pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
  pub status_code: String,
  pub content_type: Option<String>,
  /// `None` for responses without a body.
  #[serde(rename = "type")]
  pub field_type: Option<FieldType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiOperation {
  pub generated_name: String,
  pub operation_id: Option<String>,
  pub method: String,
  pub path: String,
  pub summary: Option<String>,
  pub deprecated: bool,
  pub params: Vec<ApiParam>,
  pub body: Option<ApiBody>,
  pub success_response: Option<ApiResponse>,
}

/// One resolved operation group, consumed by interface renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiDescriptor {
  pub original_name: String,
  pub generated_name: String,
  pub operations: Vec<ApiOperation>,
}
