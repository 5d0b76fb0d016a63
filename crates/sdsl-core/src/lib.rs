//! SDSL shader compiler core.
//!
//! This crate models the shading language's type universe and turns an
//! annotated shader AST into a SPIR-V-like instruction stream. The
//! pipeline is: AST (from an external parser) → type checking (symbol
//! table + annotations side-table) → code generation into a
//! `ModuleContext` → `sdsl_spirv::Module`.

#![no_std]

extern crate alloc;

mod debug;

mod annotations;
mod ast;
mod codegen;
mod compile;
mod context;
mod decl;
mod error;
mod expr;
mod member;
mod method;
mod options;
mod sampler;
mod stmt;
mod symbols;
mod typecheck;
mod types;

pub use annotations::{Annotations, MethodInfo, MethodState};
pub use ast::{
    BinaryOperator, BlockStatement, Expression, ExpressionKind, Identifier,
    InterpolationModifier, Literal, MethodParameter, Mixin, NodeId, NodeIdGen, SamplerKind,
    SamplerStateAssign, ShaderAttribute, ShaderClass, ShaderCompose, ShaderElement,
    ShaderMember, ShaderMethod, ShaderParameter, ShaderSamplerState, ShaderStruct, Statement,
    StorageModifier, StreamKind, StructField, TextLocation, TypeModifier, TypeName,
};
pub use codegen::{Binding, Compile, CompilerUnit, FunctionBuilder, FunctionRecord, ScopeGuard};
pub use compile::{compile_elements, compile_shader, CompiledShader};
pub use context::{ModuleContext, FIRST_ID};
pub use error::{SdslError, SdslResult};
pub use method::EntryPoint;
pub use options::CompileOptions;
pub use symbols::{
    Frame, FrameGuard, FunctionOverload, Storage, Symbol, SymbolId, SymbolKind, SymbolTable,
};
pub use typecheck::TypeChecker;
pub use types::{
    FunctionType, MatrixType, ScalarType, ShaderSymbol, StructType, SymbolGroup, SymbolType,
    VectorType,
};
