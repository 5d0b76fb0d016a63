//! Code generation for struct and generic parameter declarations.

use alloc::format;

use crate::{
    ast::{ShaderClass, ShaderParameter, ShaderStruct},
    codegen::{Binding, Compile, CompilerUnit},
    error::{SdslError, SdslResult},
    symbols::SymbolTable,
};

impl Compile for ShaderStruct {
    fn compile(
        &self,
        table: &SymbolTable,
        _shader: &ShaderClass,
        compiler: &mut CompilerUnit,
    ) -> SdslResult<()> {
        let ty = table.annotations().node_type(self.id).ok_or_else(|| {
            SdslError::codegen(format!("struct '{}' has no type", self.name.name))
        })?;
        compiler.context.get_or_register(ty)?;
        Ok(())
    }
}

impl Compile for ShaderParameter {
    /// Generic parameters are bound by name only; reading one is an error
    /// until the shader is specialized.
    fn compile(
        &self,
        table: &SymbolTable,
        _shader: &ShaderClass,
        compiler: &mut CompilerUnit,
    ) -> SdslResult<()> {
        let ty = table.annotations().node_type(self.id).ok_or_else(|| {
            SdslError::codegen(format!("generic '{}' has no type", self.name.name))
        })?;
        compiler
            .builder
            .declare_member(&self.name.name, Binding::Generic { ty: ty.clone() });
        Ok(())
    }
}
