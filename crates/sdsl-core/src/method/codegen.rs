//! Code generation for methods.

use alloc::format;

use crate::{
    annotations::MethodState,
    ast::{ShaderClass, ShaderMethod},
    codegen::{Compile, CompilerUnit},
    error::{SdslError, SdslResult},
    symbols::SymbolTable,
    types::SymbolType,
};

impl Compile for ShaderMethod {
    fn compile(
        &self,
        table: &SymbolTable,
        shader: &ShaderClass,
        compiler: &mut CompilerUnit,
    ) -> SdslResult<()> {
        let name = &self.name.name;
        let annotations = table.annotations();

        let info = annotations
            .method(self.id)
            .filter(|info| info.state == MethodState::TypeResolved)
            .ok_or_else(|| {
                SdslError::codegen(format!("method '{}' has not been type checked", name))
            })?;

        let function = match annotations.node_type(self.id) {
            Some(SymbolType::Function(function)) => function,
            other => {
                return Err(SdslError::InvalidSignature {
                    method: name.clone(),
                    found: other.map_or_else(|| "<unresolved>".into(), |ty| format!("{}", ty)),
                    location: self.location,
                })
            }
        };

        let CompilerUnit { builder, context } = compiler;
        builder.create_function(context, name, function, info.entry_point)?;

        for param in &self.parameters {
            let ty = annotations.node_type(param.id).ok_or_else(|| {
                SdslError::codegen(format!("parameter '{}' has no type", param.name.name))
            })?;
            builder.add_function_parameter(context, &param.name.name, ty)?;
        }

        if let Some(body) = &self.body {
            compiler.builder.create_block(&mut compiler.context)?;
            for statement in &body.statements {
                if compiler.builder.is_terminated() {
                    break;
                }
                statement.compile(table, shader, compiler)?;
            }
        }

        compiler.builder.end_function(&mut compiler.context)?;
        Ok(())
    }
}
