//! Sampler state declarations.

pub(crate) mod codegen;
pub(crate) mod typecheck;
