//! Code generation for shader members.

use alloc::format;

use sdsl_spirv::StorageClass;

use crate::{
    ast::{ShaderClass, ShaderMember},
    codegen::{Binding, Compile, CompilerUnit},
    error::{SdslError, SdslResult},
    expr::codegen::generate_expr,
    symbols::SymbolTable,
};

impl Compile for ShaderMember {
    /// Emits the member's variable, then its semantic and name.
    fn compile(
        &self,
        table: &SymbolTable,
        _shader: &ShaderClass,
        compiler: &mut CompilerUnit,
    ) -> SdslResult<()> {
        let name = &self.name.name;
        let ty = table
            .annotations()
            .node_type(self.id)
            .ok_or_else(|| SdslError::codegen(format!("member '{}' has no type", name)))?;

        let type_id = compiler.context.get_or_register(ty)?;
        let variable = compiler.context.next_id();
        compiler
            .context
            .buffer_mut()
            .push_variable(variable, type_id, StorageClass::Function);
        if let Some(semantic) = &self.semantic {
            compiler.context.add_decorate_semantic(variable, &semantic.name)?;
        }
        compiler.context.add_name(variable, name)?;

        if let Some(value) = &self.value {
            let value = generate_expr(table, value, compiler)?;
            compiler.context.buffer_mut().push_store(variable, value);
        }

        compiler.builder.declare_member(
            name,
            Binding::Variable {
                id: variable,
                ty: ty.clone(),
            },
        );
        Ok(())
    }
}
