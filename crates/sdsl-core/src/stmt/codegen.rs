//! Code generation for statements.

use alloc::format;

use sdsl_spirv::{Id, StorageClass};

use crate::{
    ast::{ExpressionKind, ShaderClass, Statement},
    codegen::{Binding, Compile, CompilerUnit},
    error::{SdslError, SdslResult},
    expr::codegen::generate_expr,
    symbols::SymbolTable,
};

impl Compile for Statement {
    fn compile(
        &self,
        table: &SymbolTable,
        shader: &ShaderClass,
        compiler: &mut CompilerUnit,
    ) -> SdslResult<()> {
        match self {
            Statement::Declare {
                id, name, value, ..
            } => {
                let ty = table.annotations().node_type(*id).ok_or_else(|| {
                    SdslError::codegen(format!("local '{}' has no type", name.name))
                })?;
                let value = match value {
                    Some(value) => Some(generate_expr(table, value, compiler)?),
                    None => None,
                };

                let type_id = compiler.context.get_or_register(ty)?;
                let variable = compiler.context.next_id();
                compiler
                    .context
                    .buffer_mut()
                    .push_variable(variable, type_id, StorageClass::Function);
                compiler.context.add_name(variable, &name.name)?;
                if let Some(value) = value {
                    compiler.context.buffer_mut().push_store(variable, value);
                }
                compiler.builder.declare_local(
                    &name.name,
                    Binding::Variable {
                        id: variable,
                        ty: ty.clone(),
                    },
                )
            }
            Statement::Assign { target, value, .. } => {
                let value = generate_expr(table, value, compiler)?;
                let pointer = assignment_pointer(compiler, &target.kind)?;
                compiler.context.buffer_mut().push_store(pointer, value);
                Ok(())
            }
            Statement::Expression(expr) => generate_expr(table, expr, compiler).map(|_| ()),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(value) => Some(generate_expr(table, value, compiler)?),
                    None => None,
                };
                compiler.builder.emit_return(&mut compiler.context, value)
            }
            Statement::Block(block) => {
                let mut scope = compiler.enter_scope();
                for statement in &block.statements {
                    if scope.builder.is_terminated() {
                        break;
                    }
                    statement.compile(table, shader, &mut scope)?;
                }
                Ok(())
            }
        }
    }
}

/// The variable an assignment stores into.
fn assignment_pointer(compiler: &CompilerUnit, target: &ExpressionKind) -> SdslResult<Id> {
    let (name, binding) = match target {
        ExpressionKind::Identifier(name) => (name, compiler.builder.lookup(name)),
        ExpressionKind::Streams(name) => (name, compiler.builder.member(name)),
        _ => return Err(SdslError::codegen("assignment target is not a variable")),
    };
    match binding {
        Some(Binding::Variable { id, .. }) => Ok(*id),
        Some(Binding::Value { .. }) => Err(SdslError::codegen(format!(
            "parameter '{}' cannot be assigned",
            name
        ))),
        Some(Binding::Generic { .. }) => Err(SdslError::codegen(format!(
            "generic parameter '{}' cannot be assigned",
            name
        ))),
        None => Err(SdslError::codegen(format!("'{}' is not bound", name))),
    }
}
