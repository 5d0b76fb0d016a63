//! Instruction buffer.

use alloc::{string::String, vec::Vec};

use crate::{
    id::Id,
    inst::{FunctionControl, Inst, StorageClass},
};

/// An append-only buffer of instructions.
///
/// Instructions are kept in structured form; turning them into words is
/// left to whoever consumes the finished module.
#[derive(Debug, Clone, Default)]
pub struct InstBuffer {
    instructions: Vec<Inst>,
}

impl InstBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Append an instruction.
    pub fn emit(&mut self, inst: Inst) {
        self.instructions.push(inst);
    }

    // Convenience methods for the instructions the code generator emits most

    /// Emit OpName
    pub fn push_name(&mut self, target: Id, name: impl Into<String>) {
        self.emit(Inst::Name {
            target,
            name: name.into(),
        });
    }

    /// Emit OpSDSLDecorateSemantic
    pub fn push_decorate_semantic(&mut self, target: Id, semantic: impl Into<String>) {
        self.emit(Inst::DecorateSemantic {
            target,
            semantic: semantic.into(),
        });
    }

    /// Emit OpVariable
    pub fn push_variable(&mut self, result: Id, result_type: Id, storage: StorageClass) {
        self.emit(Inst::Variable {
            result_type,
            result,
            storage,
        });
    }

    /// Emit OpFunction
    pub fn push_function(&mut self, result: Id, result_type: Id, function_type: Id) {
        self.emit(Inst::Function {
            result_type,
            result,
            control: FunctionControl::None,
            function_type,
        });
    }

    /// Emit OpFunctionParameter
    pub fn push_function_parameter(&mut self, result: Id, result_type: Id) {
        self.emit(Inst::FunctionParameter {
            result_type,
            result,
        });
    }

    /// Emit OpLabel
    pub fn push_label(&mut self, result: Id) {
        self.emit(Inst::Label { result });
    }

    /// Emit OpLoad
    pub fn push_load(&mut self, result: Id, result_type: Id, pointer: Id) {
        self.emit(Inst::Load {
            result_type,
            result,
            pointer,
        });
    }

    /// Emit OpStore
    pub fn push_store(&mut self, pointer: Id, object: Id) {
        self.emit(Inst::Store { pointer, object });
    }

    /// Emit OpFunctionEnd
    pub fn push_function_end(&mut self) {
        self.emit(Inst::FunctionEnd);
    }

    /// Get the emitted instructions.
    pub fn instructions(&self) -> &[Inst] {
        &self.instructions
    }

    /// Get the last emitted instruction.
    pub fn last(&self) -> Option<&Inst> {
        self.instructions.last()
    }

    /// Number of emitted instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over the emitted instructions.
    pub fn iter(&self) -> impl Iterator<Item = &Inst> {
        self.instructions.iter()
    }

    /// Consume the buffer and return its instructions.
    pub fn into_instructions(self) -> Vec<Inst> {
        self.instructions
    }
}
