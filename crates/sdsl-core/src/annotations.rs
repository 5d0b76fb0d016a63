//! Analysis results keyed by AST node.

use alloc::collections::BTreeMap;

use crate::{ast::NodeId, method::EntryPoint, types::ShaderSymbol, types::SymbolType};

/// Progress of a method through analysis and code generation.
///
/// `Unprocessed → TypeResolved → Declared → [BlockOpen → BlockClosed] → Finalized`;
/// the block states are skipped for methods without a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MethodState {
    Unprocessed,
    TypeResolved,
    Declared,
    BlockOpen,
    BlockClosed,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    pub entry_point: Option<EntryPoint>,
    pub state: MethodState,
}

/// Side-table of resolved types and method information.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    types: BTreeMap<NodeId, SymbolType>,
    methods: BTreeMap<NodeId, MethodInfo>,
    shader: Option<ShaderSymbol>,
}

impl Annotations {
    pub fn set_type(&mut self, node: NodeId, ty: SymbolType) {
        self.types.insert(node, ty);
    }

    /// Resolved type of a node, if analysis produced one.
    pub fn node_type(&self, node: NodeId) -> Option<&SymbolType> {
        self.types.get(&node)
    }

    pub fn set_method(&mut self, node: NodeId, info: MethodInfo) {
        self.methods.insert(node, info);
    }

    pub fn method(&self, node: NodeId) -> Option<&MethodInfo> {
        self.methods.get(&node)
    }

    pub fn set_shader(&mut self, shader: ShaderSymbol) {
        self.shader = Some(shader);
    }

    /// The shader symbol of the class being compiled.
    pub fn shader(&self) -> Option<&ShaderSymbol> {
        self.shader.as_ref()
    }
}
