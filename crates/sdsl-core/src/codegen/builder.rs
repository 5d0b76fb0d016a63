//! Function emission.
//!
//! Tracks the function currently being emitted and walks it through the
//! method states, so instructions always come out in a valid order:
//! `OpFunction`, parameters, optional body block, `OpFunctionEnd`.

use alloc::{collections::BTreeMap, format, string::String, vec::Vec};

use sdsl_spirv::{Id, Inst};

use super::scope::{Binding, ScopeStack};
use crate::{
    annotations::MethodState,
    ast::TextLocation,
    context::ModuleContext,
    debug::debug_codegen,
    error::{SdslError, SdslResult},
    method::EntryPoint,
    types::{FunctionType, SymbolType},
};

/// A function that has been fully emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    pub id: Id,
    pub entry_point: Option<EntryPoint>,
    pub state: MethodState,
}

#[derive(Debug)]
struct OpenFunction {
    name: String,
    id: Id,
    return_type: SymbolType,
    entry_point: Option<EntryPoint>,
    state: MethodState,
    /// The open block already ends in a return
    terminated: bool,
}

/// Builds functions into a [`ModuleContext`].
#[derive(Debug)]
pub struct FunctionBuilder {
    current: Option<OpenFunction>,
    functions: Vec<FunctionRecord>,
    scopes: ScopeStack,
    /// Shader-level bindings: members and generics
    members: BTreeMap<String, Binding>,
}

impl FunctionBuilder {
    pub fn new() -> Self {
        Self {
            current: None,
            functions: Vec::new(),
            scopes: ScopeStack::new(),
            members: BTreeMap::new(),
        }
    }

    /// Start a function: emits `OpEntryPoint` (for entry points), then
    /// `OpFunction` and the function's name.
    pub fn create_function(
        &mut self,
        context: &mut ModuleContext,
        name: &str,
        function: &FunctionType,
        entry_point: Option<EntryPoint>,
    ) -> SdslResult<Id> {
        if let Some(open) = &self.current {
            return Err(SdslError::codegen(format!(
                "cannot start '{}' while '{}' is still open",
                name, open.name
            )));
        }

        let function_type = context.get_or_register(&SymbolType::Function(function.clone()))?;
        let return_type = context.get_or_register(&function.return_type)?;
        let id = context.next_id();

        if let Some(entry_point) = entry_point {
            context.buffer_mut().emit(Inst::EntryPoint {
                model: entry_point.execution_model(),
                function: id,
                name: name.into(),
            });
        }
        context.buffer_mut().push_function(id, return_type, function_type);
        context.add_name(id, name)?;
        debug_codegen!("function {} = {}", name, id);

        self.scopes.push();
        self.current = Some(OpenFunction {
            name: name.into(),
            id,
            return_type: (*function.return_type).clone(),
            entry_point,
            state: MethodState::Declared,
            terminated: false,
        });
        Ok(id)
    }

    /// Declare the next parameter of the open function.
    pub fn add_function_parameter(
        &mut self,
        context: &mut ModuleContext,
        name: &str,
        ty: &SymbolType,
    ) -> SdslResult<Id> {
        self.expect_state(MethodState::Declared, "add a parameter")?;
        let result_type = context.get_or_register(ty)?;
        let id = context.next_id();
        context.buffer_mut().push_function_parameter(id, result_type);
        context.add_name(id, name)?;
        self.scopes.declare(
            name,
            Binding::Value {
                id,
                ty: ty.clone(),
            },
        )?;
        Ok(id)
    }

    /// Open the function's body block.
    pub fn create_block(&mut self, context: &mut ModuleContext) -> SdslResult<Id> {
        self.expect_state(MethodState::Declared, "open a block")?;
        let label = context.next_id();
        context.buffer_mut().push_label(label);
        if let Some(open) = &mut self.current {
            open.state = MethodState::BlockOpen;
        }
        Ok(label)
    }

    /// Close the open function. A void body that does not end in a
    /// return gets an implicit `OpReturn`.
    pub fn end_function(&mut self, context: &mut ModuleContext) -> SdslResult<FunctionRecord> {
        let mut open = self
            .current
            .take()
            .ok_or_else(|| SdslError::codegen("no function is open"))?;

        if open.state == MethodState::BlockOpen {
            if !open.terminated {
                if !open.return_type.is_void() {
                    return Err(SdslError::MissingReturn {
                        method: open.name,
                        location: TextLocation::default(),
                    });
                }
                context.buffer_mut().emit(Inst::Return);
            }
            open.state = MethodState::BlockClosed;
        }
        context.buffer_mut().push_function_end();
        open.state = MethodState::Finalized;
        self.scopes.clear();

        let record = FunctionRecord {
            name: open.name,
            id: open.id,
            entry_point: open.entry_point,
            state: open.state,
        };
        self.functions.push(record.clone());
        Ok(record)
    }

    fn expect_state(&self, state: MethodState, action: &str) -> SdslResult<()> {
        match &self.current {
            Some(open) if open.state == state => Ok(()),
            Some(open) => Err(SdslError::codegen(format!(
                "cannot {} in '{}' while it is {:?}",
                action, open.name, open.state
            ))),
            None => Err(SdslError::codegen(format!(
                "cannot {} with no function open",
                action
            ))),
        }
    }

    /// State of the open function.
    pub fn state(&self) -> Option<MethodState> {
        self.current.as_ref().map(|open| open.state)
    }

    /// Whether the open block already ended with a return.
    pub fn is_terminated(&self) -> bool {
        self.current.as_ref().is_some_and(|open| open.terminated)
    }

    /// Emit a return from the open block.
    pub fn emit_return(&mut self, context: &mut ModuleContext, value: Option<Id>) -> SdslResult<()> {
        self.expect_state(MethodState::BlockOpen, "return")?;
        let inst = match value {
            Some(value) => Inst::ReturnValue { value },
            None => Inst::Return,
        };
        context.buffer_mut().emit(inst);
        if let Some(open) = &mut self.current {
            open.terminated = true;
        }
        Ok(())
    }

    /// Functions emitted so far, in order.
    pub fn functions(&self) -> &[FunctionRecord] {
        &self.functions
    }

    pub fn into_functions(self) -> Vec<FunctionRecord> {
        self.functions
    }

    // Name bindings

    pub fn push_scope(&mut self) {
        self.scopes.push();
    }

    pub fn pop_scope(&mut self) -> SdslResult<()> {
        self.scopes.pop()
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Bind a local name in the innermost scope.
    pub fn declare_local(&mut self, name: &str, binding: Binding) -> SdslResult<()> {
        self.scopes.declare(name, binding)
    }

    /// Bind a shader-level name.
    pub fn declare_member(&mut self, name: &str, binding: Binding) {
        self.members.insert(name.into(), binding);
    }

    pub fn member(&self, name: &str) -> Option<&Binding> {
        self.members.get(name)
    }

    /// Look a name up: local scopes first, then shader members.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.lookup(name).or_else(|| self.members.get(name))
    }
}

impl Default for FunctionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{options::CompileOptions, types::ScalarType};

    fn void_fn() -> FunctionType {
        FunctionType::new(SymbolType::void(), vec![])
    }

    #[test]
    fn test_states_in_order() {
        let mut context = ModuleContext::new(CompileOptions::default());
        let mut builder = FunctionBuilder::new();
        assert_eq!(builder.state(), None);

        builder.create_function(&mut context, "Foo", &void_fn(), None).unwrap();
        assert_eq!(builder.state(), Some(MethodState::Declared));
        builder.create_block(&mut context).unwrap();
        assert_eq!(builder.state(), Some(MethodState::BlockOpen));
        let record = builder.end_function(&mut context).unwrap();
        assert_eq!(record.state, MethodState::Finalized);
        assert_eq!(builder.state(), None);
        assert_eq!(builder.functions().len(), 1);
    }

    #[test]
    fn test_parameters_after_block_are_rejected() {
        let mut context = ModuleContext::new(CompileOptions::default());
        let mut builder = FunctionBuilder::new();
        builder.create_function(&mut context, "Foo", &void_fn(), None).unwrap();
        builder.create_block(&mut context).unwrap();
        assert!(builder
            .add_function_parameter(&mut context, "x", &SymbolType::scalar(ScalarType::Float))
            .is_err());
    }

    #[test]
    fn test_nested_function_is_rejected() {
        let mut context = ModuleContext::new(CompileOptions::default());
        let mut builder = FunctionBuilder::new();
        builder.create_function(&mut context, "Foo", &void_fn(), None).unwrap();
        assert!(builder.create_function(&mut context, "Bar", &void_fn(), None).is_err());
        assert!(builder.end_function(&mut context).is_ok());
        assert!(builder.end_function(&mut context).is_err());
    }

    #[test]
    fn test_declaration_without_body() {
        let mut context = ModuleContext::new(CompileOptions::default());
        let mut builder = FunctionBuilder::new();
        builder.create_function(&mut context, "Foo", &void_fn(), None).unwrap();
        builder.end_function(&mut context).unwrap();
        let opcodes: Vec<_> = context.buffer().iter().map(Inst::opcode_name).collect();
        assert_eq!(
            opcodes,
            ["OpTypeVoid", "OpName", "OpTypeFunction", "OpName", "OpFunction", "OpName", "OpFunctionEnd"]
        );
    }

    #[test]
    fn test_non_void_body_needs_return() {
        let mut context = ModuleContext::new(CompileOptions::default());
        let mut builder = FunctionBuilder::new();
        let function = FunctionType::new(SymbolType::scalar(ScalarType::Float), vec![]);
        builder.create_function(&mut context, "Get", &function, None).unwrap();
        builder.create_block(&mut context).unwrap();
        assert!(matches!(
            builder.end_function(&mut context),
            Err(SdslError::MissingReturn { .. })
        ));
    }

    #[test]
    fn test_parameters_shadow_members() {
        let mut context = ModuleContext::new(CompileOptions::default());
        let mut builder = FunctionBuilder::new();
        let float = SymbolType::scalar(ScalarType::Float);
        builder.declare_member(
            "x",
            Binding::Variable {
                id: Id::new(99),
                ty: float.clone(),
            },
        );
        let function = FunctionType::new(SymbolType::void(), vec![float.clone()]);
        builder.create_function(&mut context, "Foo", &function, None).unwrap();
        let param = builder.add_function_parameter(&mut context, "x", &float).unwrap();
        assert_eq!(
            builder.lookup("x"),
            Some(&Binding::Value {
                id: param,
                ty: float.clone()
            })
        );
        builder.end_function(&mut context).unwrap();
        assert_eq!(builder.lookup("x").map(Binding::ty), Some(&float));
        assert_eq!(builder.scope_depth(), 0);
    }
}
