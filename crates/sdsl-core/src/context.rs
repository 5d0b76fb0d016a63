//! Module-wide code generation state.
//!
//! Owns the id counter (`bound`), the instruction buffer, and the
//! registries that keep type and constant declarations unique.

use alloc::{collections::BTreeMap, format, string::String, vec::Vec};

use hashbrown::HashMap;
use sdsl_spirv::{ConstantValue, Dim, Id, Inst, InstBuffer, Module, StorageClass};

use crate::{
    ast::TextLocation,
    debug::debug_codegen,
    error::{SdslError, SdslResult},
    options::CompileOptions,
    types::{ScalarType, SymbolType},
};

/// First id handed out; id 0 is never used.
pub const FIRST_ID: u32 = 1;

/// Per-module code generation state.
pub struct ModuleContext {
    /// Next unused id
    bound: u32,
    buffer: InstBuffer,
    types: HashMap<SymbolType, Id>,
    constants: HashMap<(ScalarType, ConstantValue), Id>,
    names: BTreeMap<Id, String>,
    semantics: BTreeMap<Id, String>,
    options: CompileOptions,
}

impl ModuleContext {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            bound: FIRST_ID,
            buffer: InstBuffer::new(),
            types: HashMap::new(),
            constants: HashMap::new(),
            names: BTreeMap::new(),
            semantics: BTreeMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// One past the largest id allocated so far.
    pub fn bound(&self) -> u32 {
        self.bound
    }

    /// Allocate a fresh id.
    pub fn next_id(&mut self) -> Id {
        let id = Id::new(self.bound);
        self.bound += 1;
        id
    }

    pub fn buffer(&self) -> &InstBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut InstBuffer {
        &mut self.buffer
    }

    /// Id of an already registered type.
    pub fn type_id(&self, ty: &SymbolType) -> Option<Id> {
        self.types.get(ty).copied()
    }

    /// Return the id of `ty`, declaring it (and everything it is built
    /// from) the first time it is seen.
    pub fn get_or_register(&mut self, ty: &SymbolType) -> SdslResult<Id> {
        if let Some(id) = self.types.get(ty) {
            return Ok(*id);
        }
        if *ty == SymbolType::SamplerComparisonState {
            // Comparison is a property of how a sampler is used, not of its type
            let id = self.get_or_register(&SymbolType::SamplerState)?;
            self.types.insert(ty.clone(), id);
            return Ok(id);
        }

        let id = self.declare_type(ty)?;
        self.types.insert(ty.clone(), id);
        if self.options.type_names {
            self.names.insert(id, ty.to_id());
            self.buffer.push_name(id, ty.to_id());
        }
        debug_codegen!("registered type {} as {}", ty.to_id(), id);
        Ok(id)
    }

    /// Emit the declaration of a type not registered yet.
    fn declare_type(&mut self, ty: &SymbolType) -> SdslResult<Id> {
        match ty {
            SymbolType::Undefined(name) => Err(SdslError::unresolved_type(
                name.clone(),
                TextLocation::default(),
            )),
            SymbolType::Scalar(scalar) => {
                let result = self.next_id();
                let inst = match scalar {
                    ScalarType::Void => Inst::TypeVoid { result },
                    ScalarType::Bool => Inst::TypeBool { result },
                    ScalarType::Int => int_type(result, 32, true),
                    ScalarType::UInt => int_type(result, 32, false),
                    ScalarType::Long => int_type(result, 64, true),
                    ScalarType::ULong => int_type(result, 64, false),
                    ScalarType::Half => Inst::TypeFloat { result, width: 16 },
                    ScalarType::Float => Inst::TypeFloat { result, width: 32 },
                    ScalarType::Double => Inst::TypeFloat { result, width: 64 },
                };
                self.buffer.emit(inst);
                Ok(result)
            }
            SymbolType::Vector(vector) => {
                let component = self.get_or_register(&SymbolType::Scalar(vector.base))?;
                let result = self.next_id();
                self.buffer.emit(Inst::TypeVector {
                    result,
                    component,
                    count: vector.size,
                });
                Ok(result)
            }
            SymbolType::Matrix(matrix) => {
                let column = self.get_or_register(&SymbolType::Vector(matrix.column()))?;
                let result = self.next_id();
                self.buffer.emit(Inst::TypeMatrix {
                    result,
                    column,
                    count: matrix.columns,
                });
                Ok(result)
            }
            SymbolType::Array { base, size } => {
                let element = self.get_or_register(base)?;
                let length =
                    self.get_or_register_constant(ScalarType::UInt, ConstantValue::Int(*size as i64))?;
                let result = self.next_id();
                self.buffer.emit(Inst::TypeArray {
                    result,
                    element,
                    length,
                });
                Ok(result)
            }
            SymbolType::Pointer(base) => {
                let pointee = self.get_or_register(base)?;
                let result = self.next_id();
                self.buffer.emit(Inst::TypePointer {
                    result,
                    storage: StorageClass::Function,
                    pointee,
                });
                Ok(result)
            }
            SymbolType::Struct(s) => {
                let members = s
                    .fields
                    .iter()
                    .map(|(_, field)| self.get_or_register(field))
                    .collect::<SdslResult<Vec<_>>>()?;
                let result = self.next_id();
                self.buffer.emit(Inst::TypeStruct { result, members });
                if self.options.debug_names {
                    for (index, (name, _)) in s.fields.iter().enumerate() {
                        self.buffer.emit(Inst::MemberName {
                            ty: result,
                            member: index as u32,
                            name: name.clone(),
                        });
                    }
                }
                Ok(result)
            }
            SymbolType::Function(function) => {
                let return_type = self.get_or_register(&function.return_type)?;
                let params = function
                    .parameter_types
                    .iter()
                    .map(|param| self.get_or_register(param))
                    .collect::<SdslResult<Vec<_>>>()?;
                let result = self.next_id();
                self.buffer.emit(Inst::TypeFunction {
                    result,
                    return_type,
                    params,
                });
                Ok(result)
            }
            SymbolType::SamplerState | SymbolType::SamplerComparisonState => {
                let result = self.next_id();
                self.buffer.emit(Inst::TypeSampler { result });
                Ok(result)
            }
            SymbolType::Buffer { base, .. } => self.declare_image(base, Dim::Buffer),
            SymbolType::Texture1D { base, .. } => self.declare_image(base, Dim::Dim1D),
            SymbolType::Texture2D { base, .. } => self.declare_image(base, Dim::Dim2D),
            SymbolType::Texture3D { base, .. } => self.declare_image(base, Dim::Dim3D),
            SymbolType::Streams
            | SymbolType::ConstantBuffer(_)
            | SymbolType::Params(_)
            | SymbolType::Effect(_)
            | SymbolType::Shader(_) => Err(SdslError::codegen(format!(
                "type '{}' has no instruction form",
                ty
            ))),
        }
    }

    /// `OpTypeImage` has no operand for sizes. Sized images of the same
    /// base and dimensionality still get one id per size, and the sizes
    /// only show up in the type's `OpName`.
    fn declare_image(&mut self, base: &SymbolType, dim: Dim) -> SdslResult<Id> {
        let sampled_type = self.get_or_register(base)?;
        let result = self.next_id();
        self.buffer.emit(Inst::TypeImage {
            result,
            sampled_type,
            dim,
        });
        Ok(result)
    }

    /// Return the id of a scalar constant, declaring it on first use.
    pub fn get_or_register_constant(
        &mut self,
        scalar: ScalarType,
        value: ConstantValue,
    ) -> SdslResult<Id> {
        if let Some(id) = self.constants.get(&(scalar, value)) {
            return Ok(*id);
        }
        if scalar == ScalarType::Void {
            return Err(SdslError::codegen("void has no constants"));
        }

        let result_type = self.get_or_register(&SymbolType::Scalar(scalar))?;
        let result = self.next_id();
        let inst = match (scalar, value) {
            (ScalarType::Bool, ConstantValue::Int(0)) => Inst::ConstantFalse {
                result_type,
                result,
            },
            (ScalarType::Bool, _) => Inst::ConstantTrue {
                result_type,
                result,
            },
            _ => Inst::Constant {
                result_type,
                result,
                value,
            },
        };
        self.buffer.emit(inst);
        self.constants.insert((scalar, value), result);
        Ok(result)
    }

    /// Record a debug name for an allocated id, emitting `OpName` when
    /// debug names are enabled.
    pub fn add_name(&mut self, id: Id, name: &str) -> SdslResult<()> {
        self.check_allocated(id)?;
        self.names.insert(id, name.into());
        if self.options.debug_names {
            self.buffer.push_name(id, name);
        }
        Ok(())
    }

    /// Attach a semantic to an allocated id.
    pub fn add_decorate_semantic(&mut self, id: Id, semantic: &str) -> SdslResult<()> {
        self.check_allocated(id)?;
        self.semantics.insert(id, semantic.into());
        self.buffer.push_decorate_semantic(id, semantic);
        Ok(())
    }

    pub fn name_of(&self, id: Id) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn semantic_of(&self, id: Id) -> Option<&str> {
        self.semantics.get(&id).map(String::as_str)
    }

    fn check_allocated(&self, id: Id) -> SdslResult<()> {
        if id.index() < FIRST_ID || id.index() >= self.bound {
            return Err(SdslError::codegen(format!("{} has not been allocated", id)));
        }
        Ok(())
    }

    /// Finish the module.
    pub fn finish(self) -> Module {
        Module::new(self.bound, self.buffer.into_instructions())
    }
}

fn int_type(result: Id, width: u32, signed: bool) -> Inst {
    Inst::TypeInt {
        result,
        width,
        signed,
    }
}
