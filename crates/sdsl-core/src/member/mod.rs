//! Shader-level variables.

pub(crate) mod codegen;
pub(crate) mod typecheck;
