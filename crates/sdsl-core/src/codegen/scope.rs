//! Scope management for codegen.
//!
//! Maps source names to the ids that hold their values, one map per
//! lexical scope.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use sdsl_spirv::Id;

use crate::{
    error::{SdslError, SdslResult},
    types::SymbolType,
};

/// How a name is bound in generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A value used directly (function parameters)
    Value { id: Id, ty: SymbolType },
    /// A variable, read with `OpLoad` and written with `OpStore`
    Variable { id: Id, ty: SymbolType },
    /// A generic parameter; it has no value until the shader is specialized
    Generic { ty: SymbolType },
}

impl Binding {
    pub fn ty(&self) -> &SymbolType {
        match self {
            Binding::Value { ty, .. } | Binding::Variable { ty, .. } | Binding::Generic { ty } => ty,
        }
    }
}

/// Stack of scopes.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<BTreeMap<String, Binding>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn push(&mut self) {
        self.scopes.push(BTreeMap::new());
    }

    pub fn pop(&mut self) -> SdslResult<()> {
        self.scopes.pop().map(|_| ()).ok_or(SdslError::ScopeUnderflow)
    }

    /// Bind a name in the innermost scope.
    pub fn declare(&mut self, name: impl Into<String>, binding: Binding) -> SdslResult<()> {
        let scope = self.scopes.last_mut().ok_or(SdslError::NoActiveScope)?;
        scope.insert(name.into(), binding);
        Ok(())
    }

    /// Look a name up, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
    }
}
