pub mod refs;
pub mod spec;

pub(crate) use refs::{extract_schema_ref_name, mapping_target_name};
