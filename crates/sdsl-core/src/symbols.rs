//! Symbol table for semantic analysis.
//!
//! Holds the stack of lexical frames, the declared-types registry, the
//! per-name function overload slots and the annotations side-table.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::{
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{
    annotations::Annotations,
    error::{SdslError, SdslResult},
    types::{FunctionType, SymbolType},
};

/// What a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Variable,
    Constant,
    Method,
    Struct,
    Shader,
    ConstantBuffer,
    /// A `compose` slot filled by another shader
    Compose,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Method => "method",
            SymbolKind::Struct => "struct",
            SymbolKind::Shader => "shader",
            SymbolKind::ConstantBuffer => "cbuffer",
            SymbolKind::Compose => "compose",
        })
    }
}

/// Where a symbol's value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Storage {
    None,
    Function,
    Stream,
    Static,
    Uniform,
    /// A generic parameter of the shader class
    Generic,
}

/// Key of a symbol within a frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId {
    pub name: String,
    pub kind: SymbolKind,
    pub storage: Storage,
}

impl SymbolId {
    pub fn new(name: impl Into<String>, kind: SymbolKind, storage: Storage) -> Self {
        Self {
            name: name.into(),
            kind,
            storage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub id: SymbolId,
    pub ty: SymbolType,
}

impl Symbol {
    pub fn new(id: SymbolId, ty: SymbolType) -> Self {
        Self { id, ty }
    }
}

/// One lexical frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    symbols: BTreeMap<SymbolId, Symbol>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
        }
    }

    /// Add a symbol. Re-declaring the same id replaces the earlier symbol.
    pub fn add(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.id.clone(), symbol);
    }

    pub fn get(&self, id: &SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Find a symbol by name and kind, whatever its storage.
    pub fn find(&self, name: &str, kind: SymbolKind) -> Option<&Symbol> {
        self.symbols
            .values()
            .find(|s| s.id.name == name && s.id.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

/// One overload slot for a method name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionOverload {
    pub parameters: Vec<Symbol>,
    /// Filled in once the return type is resolved
    pub ty: Option<FunctionType>,
}

/// Symbol table for tracking frames, declared types and functions.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    frames: Vec<Frame>,
    /// First registration of a name wins
    declared_types: BTreeMap<String, SymbolType>,
    function_symbols: BTreeMap<String, Vec<FunctionOverload>>,
    /// Name and slot index of the function being registered
    current_function: Option<(String, usize)>,
    annotations: Annotations,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Frames

    /// Push a new empty frame.
    pub fn push(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Pop the innermost frame.
    pub fn pop(&mut self) -> SdslResult<Frame> {
        self.frames.pop().ok_or(SdslError::ScopeUnderflow)
    }

    /// Push a frame that is popped when the guard is dropped.
    pub fn enter_scope(&mut self) -> FrameGuard<'_> {
        FrameGuard::new(self)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Declare a symbol in the innermost frame.
    pub fn declare(&mut self, symbol: Symbol) -> SdslResult<()> {
        let frame = self.frames.last_mut().ok_or(SdslError::NoActiveScope)?;
        frame.add(symbol);
        Ok(())
    }

    /// Look up a symbol by name and kind, from the innermost frame outward.
    pub fn lookup(&self, name: &str, kind: SymbolKind) -> Option<&Symbol> {
        self.frames.iter().rev().find_map(|frame| frame.find(name, kind))
    }

    // Declared types

    /// Register a named type. Returns false if the name was already taken,
    /// in which case the earlier registration is kept.
    pub fn declare_type(&mut self, name: impl Into<String>, ty: SymbolType) -> bool {
        let name = name.into();
        if self.declared_types.contains_key(&name) {
            return false;
        }
        self.declared_types.insert(name, ty);
        true
    }

    pub fn declared_type(&self, name: &str) -> Option<&SymbolType> {
        self.declared_types.get(name)
    }

    /// Resolve a type name: numeric names first, then built-in objects,
    /// then declared types.
    pub fn resolve_type(&self, name: &str) -> Option<SymbolType> {
        SymbolType::try_resolve_numeric(name)
            .or_else(|| SymbolType::try_resolve_object(name))
            .or_else(|| self.declared_type(name).cloned())
    }

    // Functions

    /// Open a new overload slot for `name` and make it current.
    pub fn register_function(&mut self, name: impl Into<String>) {
        let name = name.into();
        let slots = self.function_symbols.entry(name.clone()).or_default();
        slots.push(FunctionOverload::default());
        let index = slots.len() - 1;
        self.current_function = Some((name, index));
    }

    pub fn current_function_mut(&mut self) -> Option<&mut FunctionOverload> {
        let (name, index) = self.current_function.as_ref()?;
        self.function_symbols.get_mut(name)?.get_mut(*index)
    }

    /// Append a parameter to the current overload slot.
    pub fn add_parameter(&mut self, parameter: Symbol) -> SdslResult<()> {
        let slot = self
            .current_function_mut()
            .ok_or_else(|| SdslError::codegen("parameter declared outside a function"))?;
        slot.parameters.push(parameter);
        Ok(())
    }

    /// Record the resolved type of the current overload and close it.
    pub fn complete_function(&mut self, ty: FunctionType) -> SdslResult<()> {
        let slot = self
            .current_function_mut()
            .ok_or_else(|| SdslError::codegen("no function is being registered"))?;
        slot.ty = Some(ty);
        self.current_function = None;
        Ok(())
    }

    pub fn function_overloads(&self, name: &str) -> &[FunctionOverload] {
        self.function_symbols
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Annotations

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

/// Frame guard: pushes a frame on creation and pops it on drop.
///
/// Derefs to the table, so code inside the scope keeps using it normally.
pub struct FrameGuard<'a> {
    table: &'a mut SymbolTable,
}

impl<'a> FrameGuard<'a> {
    pub fn new(table: &'a mut SymbolTable) -> Self {
        table.push();
        Self { table }
    }
}

impl Deref for FrameGuard<'_> {
    type Target = SymbolTable;

    fn deref(&self) -> &SymbolTable {
        self.table
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut SymbolTable {
        self.table
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let _ = self.table.pop();
    }
}
