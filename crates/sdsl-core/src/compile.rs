//! Whole-shader compilation.

use alloc::{vec, vec::Vec};

use sdsl_spirv::Module;

use crate::{
    ast::ShaderClass,
    codegen::{Compile, CompilerUnit, FunctionRecord},
    error::{SdslError, SdslResult},
    options::CompileOptions,
    symbols::SymbolTable,
    typecheck::TypeChecker,
};

/// Output of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    pub module: Module,
    /// Every emitted function, in emission order
    pub functions: Vec<FunctionRecord>,
}

/// Type check and compile a shader class.
///
/// All semantic errors are collected and returned together; code
/// generation only runs on a shader that type checked cleanly, and stops
/// at its first error.
pub fn compile_shader(
    shader: &ShaderClass,
    options: CompileOptions,
) -> Result<CompiledShader, Vec<SdslError>> {
    let mut checker = TypeChecker::new();
    checker.check_shader(shader);
    let (table, diagnostics) = checker.finish();
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let mut compiler = CompilerUnit::new(options);
    compile_elements(&table, shader, &mut compiler).map_err(|e| vec![e])?;

    let CompilerUnit { builder, context } = compiler;
    Ok(CompiledShader {
        module: context.finish(),
        functions: builder.into_functions(),
    })
}

/// Emit a type-checked shader into `compiler`: generics, structs,
/// members, sampler states, then methods. Composes have nothing to emit
/// until their mixins are resolved.
pub fn compile_elements(
    table: &SymbolTable,
    shader: &ShaderClass,
    compiler: &mut CompilerUnit,
) -> SdslResult<()> {
    for generic in &shader.generics {
        generic.compile(table, shader, compiler)?;
    }
    for s in shader.structs() {
        s.compile(table, shader, compiler)?;
    }
    for member in shader.members() {
        member.compile(table, shader, compiler)?;
    }
    for sampler in shader.sampler_states() {
        sampler.compile(table, shader, compiler)?;
    }
    for method in shader.methods() {
        method.compile(table, shader, compiler)?;
    }
    Ok(())
}
