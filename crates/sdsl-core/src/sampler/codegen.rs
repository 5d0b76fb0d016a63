//! Code generation for sampler states.

use alloc::format;

use sdsl_spirv::StorageClass;

use crate::{
    ast::{ShaderClass, ShaderSamplerState},
    codegen::{Binding, Compile, CompilerUnit},
    error::{SdslError, SdslResult},
    symbols::SymbolTable,
};

impl Compile for ShaderSamplerState {
    /// Emits a `UniformConstant` variable of the sampler type and names it.
    /// The sampler's assignments are left to the runtime.
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
            .ok_or_else(|| SdslError::codegen(format!("sampler '{}' has no type", name)))?;

        let type_id = compiler.context.get_or_register(ty)?;
        let variable = compiler.context.next_id();
        compiler
            .context
            .buffer_mut()
            .push_variable(variable, type_id, StorageClass::UniformConstant);
        compiler.context.add_name(variable, name)?;

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
