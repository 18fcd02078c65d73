pub(crate) mod analyzer;
pub(crate) mod apis;
pub mod codegen;
pub mod config;
pub mod metrics;
pub mod model;
pub mod orchestrator;
pub(crate) mod parser;
pub mod raw;
pub(crate) mod resolver;
pub(crate) mod type_mapping;

#[cfg(test)]
mod tests;
