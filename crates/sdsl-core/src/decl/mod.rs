//! Type-level declarations: structs, generic parameters and composes.

pub(crate) mod codegen;
pub(crate) mod typecheck;
