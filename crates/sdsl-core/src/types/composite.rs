//! Composite type payloads: structs, functions, symbol groups and shaders.

use alloc::{boxed::Box, format, string::String, vec::Vec};
use core::hash::{Hash, Hasher};

use super::SymbolType;
use crate::{
    error::{SdslError, SdslResult},
    symbols::{Symbol, SymbolKind},
};

/// A named struct with ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<(String, SymbolType)>,
}

impl StructType {
    pub fn new(name: impl Into<String>, fields: Vec<(String, SymbolType)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field's index and type by name.
    pub fn try_get_field(&self, name: &str) -> Option<(usize, &SymbolType)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, (field, _))| field == name)
            .map(|(index, (_, ty))| (index, ty))
    }

    pub fn try_get_field_type(&self, name: &str) -> Option<&SymbolType> {
        self.try_get_field(name).map(|(_, ty)| ty)
    }

    /// Position of a field in declaration order.
    pub fn try_get_field_index(&self, name: &str) -> Option<usize> {
        self.try_get_field(name).map(|(index, _)| index)
    }
}

/// A function signature.
///
/// Two function types are equal when their return types are equal and
/// their parameter types are equal element-wise, in order.
#[derive(Debug, Clone)]
pub struct FunctionType {
    pub return_type: Box<SymbolType>,
    pub parameter_types: Vec<SymbolType>,
}

impl FunctionType {
    pub fn new(return_type: SymbolType, parameter_types: Vec<SymbolType>) -> Self {
        Self {
            return_type: Box::new(return_type),
            parameter_types,
        }
    }
}

impl PartialEq for FunctionType {
    fn eq(&self, other: &Self) -> bool {
        self.return_type == other.return_type
            && self.parameter_types.len() == other.parameter_types.len()
            && self
                .parameter_types
                .iter()
                .zip(&other.parameter_types)
                .all(|(a, b)| a == b)
    }
}

impl Eq for FunctionType {}

impl Hash for FunctionType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.return_type.hash(state);
        state.write_usize(self.parameter_types.len());
        for param in &self.parameter_types {
            param.hash(state);
        }
    }
}

/// A named group of symbols (constant buffers, params, effects).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolGroup {
    pub name: String,
    pub symbols: Vec<Symbol>,
}

impl SymbolGroup {
    pub fn new(name: impl Into<String>, symbols: Vec<Symbol>) -> Self {
        Self {
            name: name.into(),
            symbols,
        }
    }
}

/// A shader class and the symbols it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderSymbol {
    pub name: String,
    pub components: Vec<Symbol>,
}

impl ShaderSymbol {
    pub fn new(name: impl Into<String>, components: Vec<Symbol>) -> Self {
        Self {
            name: name.into(),
            components,
        }
    }

    /// Find a component by name and kind.
    pub fn try_get(&self, name: &str, kind: SymbolKind) -> Option<&Symbol> {
        self.components
            .iter()
            .find(|symbol| symbol.id.name == name && symbol.id.kind == kind)
    }

    /// Find a component by name and kind, failing if it is absent.
    pub fn get(&self, name: &str, kind: SymbolKind) -> SdslResult<&Symbol> {
        self.try_get(name, kind)
            .ok_or_else(|| SdslError::MissingMember {
                container: format!("shader {}", self.name),
                name: name.into(),
                kind,
            })
    }
}
