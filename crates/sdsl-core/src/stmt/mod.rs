//! Statements.

pub(crate) mod codegen;
pub(crate) mod typecheck;
