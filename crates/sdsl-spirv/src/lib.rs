//! SPIR-V-like instruction stream for the SDSL compiler.
//!
//! This crate defines the pieces the shader compiler emits into:
//! - Ids (result identifiers sharing one id space per module)
//! - Instructions (type declarations, debug names, functions, memory ops)
//! - InstBuffer (append-only instruction sequence)
//! - Module (finished instruction stream plus its id bound)
//! - A text format mirroring SPIR-V disassembly, with a parser for it

#![no_std]

extern crate alloc;

mod buffer;
mod id;
mod inst;
mod module;
mod parser;

pub use buffer::InstBuffer;
pub use id::Id;
pub use inst::{BinaryOp, ConstantValue, Dim, ExecutionModel, FunctionControl, Inst, StorageClass};
pub use module::Module;
pub use parser::{parse_instructions, parse_module, ParseError};
