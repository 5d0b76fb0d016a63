//! Code generation.
//!
//! Nodes implement [`Compile`] against a [`CompilerUnit`], which pairs
//! the module-wide [`ModuleContext`] with the [`FunctionBuilder`] for the
//! function being emitted.

mod builder;
mod scope;

use core::ops::{Deref, DerefMut};

pub use builder::{FunctionBuilder, FunctionRecord};
pub use scope::{Binding, ScopeStack};

use crate::{
    ast::ShaderClass,
    context::ModuleContext,
    error::SdslResult,
    options::CompileOptions,
    symbols::SymbolTable,
};

/// Everything code generation writes into.
pub struct CompilerUnit {
    pub builder: FunctionBuilder,
    pub context: ModuleContext,
}

impl CompilerUnit {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            builder: FunctionBuilder::new(),
            context: ModuleContext::new(options),
        }
    }

    /// Open a lexical scope that closes when the guard is dropped.
    pub fn enter_scope(&mut self) -> ScopeGuard<'_> {
        ScopeGuard::new(self)
    }
}

/// A node that emits instructions.
pub trait Compile {
    fn compile(
        &self,
        table: &SymbolTable,
        shader: &ShaderClass,
        compiler: &mut CompilerUnit,
    ) -> SdslResult<()>;
}

/// RAII guard for scope entry/exit.
pub struct ScopeGuard<'a> {
    unit: &'a mut CompilerUnit,
}

impl<'a> ScopeGuard<'a> {
    pub fn new(unit: &'a mut CompilerUnit) -> Self {
        unit.builder.push_scope();
        Self { unit }
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = CompilerUnit;

    fn deref(&self) -> &CompilerUnit {
        self.unit
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut CompilerUnit {
        self.unit
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        let _ = self.unit.builder.pop_scope();
    }
}
