//! The shading language's type universe.
//!
//! Every type has two textual forms: `to_id()`, a compact identifier used
//! as a debug token and dedup key, and `Display`, a readable description.
//! Equality is structural, so two independently built types with the same
//! shape compare and hash equal.

mod composite;
mod numeric;

use alloc::{
    boxed::Box,
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

pub use composite::{FunctionType, ShaderSymbol, StructType, SymbolGroup};
pub use numeric::{MatrixType, ScalarType, VectorType};

/// A type in the shading language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolType {
    /// A name that has not been resolved yet
    Undefined(String),
    Pointer(Box<SymbolType>),
    Scalar(ScalarType),
    Vector(VectorType),
    Matrix(MatrixType),
    Array {
        base: Box<SymbolType>,
        size: u32,
    },
    Struct(StructType),
    Buffer {
        base: Box<SymbolType>,
        size: u32,
    },
    Texture1D {
        base: Box<SymbolType>,
        size: u32,
    },
    Texture2D {
        base: Box<SymbolType>,
        width: u32,
        height: u32,
    },
    Texture3D {
        base: Box<SymbolType>,
        width: u32,
        height: u32,
        depth: u32,
    },
    Function(FunctionType),
    SamplerState,
    SamplerComparisonState,
    /// The stream variables of the current shader
    Streams,
    ConstantBuffer(SymbolGroup),
    Params(SymbolGroup),
    Effect(SymbolGroup),
    Shader(ShaderSymbol),
}

impl SymbolType {
    pub fn void() -> Self {
        SymbolType::Scalar(ScalarType::Void)
    }

    pub fn scalar(scalar: ScalarType) -> Self {
        SymbolType::Scalar(scalar)
    }

    pub fn vector(base: ScalarType, size: u32) -> Self {
        SymbolType::Vector(VectorType::new(base, size))
    }

    pub fn matrix(base: ScalarType, rows: u32, columns: u32) -> Self {
        SymbolType::Matrix(MatrixType::new(base, rows, columns))
    }

    pub fn array(base: SymbolType, size: u32) -> Self {
        SymbolType::Array {
            base: Box::new(base),
            size,
        }
    }

    pub fn pointer(base: SymbolType) -> Self {
        SymbolType::Pointer(Box::new(base))
    }

    pub fn function(return_type: SymbolType, parameter_types: Vec<SymbolType>) -> Self {
        SymbolType::Function(FunctionType::new(return_type, parameter_types))
    }

    /// Resolve a numeric type name: scalars, then vectors, then matrices,
    /// then `void`.
    pub fn try_resolve_numeric(name: &str) -> Option<SymbolType> {
        if let Some(scalar) = ScalarType::from_name(name) {
            return Some(SymbolType::Scalar(scalar));
        }
        if let Some(vector) = VectorType::from_name(name) {
            return Some(SymbolType::Vector(vector));
        }
        if let Some(matrix) = MatrixType::from_name(name) {
            return Some(SymbolType::Matrix(matrix));
        }
        if name == "void" {
            return Some(SymbolType::void());
        }
        None
    }

    /// Resolve the name of a built-in object type.
    pub fn try_resolve_object(name: &str) -> Option<SymbolType> {
        match name {
            "SamplerState" => Some(SymbolType::SamplerState),
            "SamplerComparisonState" => Some(SymbolType::SamplerComparisonState),
            _ => None,
        }
    }

    /// Every type `try_resolve_numeric` can produce.
    pub fn numeric_types() -> impl Iterator<Item = SymbolType> {
        ScalarType::TABLE
            .into_iter()
            .map(SymbolType::Scalar)
            .chain(VectorType::table().map(SymbolType::Vector))
            .chain(MatrixType::table().map(SymbolType::Matrix))
            .chain(core::iter::once(SymbolType::void()))
    }

    /// The scalar a numeric type is built from.
    pub fn element_scalar(&self) -> Option<ScalarType> {
        match self {
            SymbolType::Scalar(s) => Some(*s),
            SymbolType::Vector(v) => Some(v.base),
            SymbolType::Matrix(m) => Some(m.base),
            _ => None,
        }
    }

    /// Whether arithmetic operators apply to this type.
    pub fn is_numeric(&self) -> bool {
        self.element_scalar().is_some_and(ScalarType::is_numeric)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, SymbolType::Scalar(ScalarType::Void))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, SymbolType::Undefined(_))
    }

    /// Compact identifier, unique among distinct types.
    pub fn to_id(&self) -> String {
        match self {
            SymbolType::Undefined(name) => name.clone(),
            SymbolType::Pointer(base) => format!("ptr_{}", base.to_id()),
            SymbolType::Scalar(s) => s.name().to_string(),
            SymbolType::Vector(v) => v.to_string(),
            SymbolType::Matrix(m) => m.to_string(),
            SymbolType::Array { base, size } => format!("{}[{}]", base.to_id(), size),
            SymbolType::Struct(s) => s.name.clone(),
            SymbolType::Buffer { base, size } => format!("Buffer<{}, {}>", base.to_id(), size),
            SymbolType::Texture1D { base, size } => {
                format!("Texture<{}, {}>", base.to_id(), size)
            }
            SymbolType::Texture2D {
                base,
                width,
                height,
            } => format!("Texture<{}, {}, {}>", base.to_id(), width, height),
            SymbolType::Texture3D {
                base,
                width,
                height,
                depth,
            } => format!(
                "Texture<{}, {}, {}, {}>",
                base.to_id(),
                width,
                height,
                depth
            ),
            SymbolType::Function(func) => {
                let mut id = String::from("fn_");
                for param in &func.parameter_types {
                    id.push_str(&param.to_id());
                    id.push('_');
                }
                id.push_str(&func.return_type.to_id());
                id
            }
            SymbolType::SamplerState => "SamplerState".into(),
            SymbolType::SamplerComparisonState => "SamplerComparisonState".into(),
            SymbolType::Streams => "streams".into(),
            SymbolType::ConstantBuffer(group) => format!("cbuffer_{}", group.name),
            SymbolType::Params(group) => format!("params_{}", group.name),
            SymbolType::Effect(group) => format!("effect_{}", group.name),
            SymbolType::Shader(shader) => format!("shader_{}", shader.name),
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolType::Undefined(name) => f.write_str(name),
            SymbolType::Pointer(base) => write!(f, "*{}", base),
            SymbolType::Scalar(s) => write!(f, "{}", s),
            SymbolType::Vector(v) => write!(f, "{}", v),
            SymbolType::Matrix(m) => write!(f, "{}", m),
            SymbolType::Array { base, size } => write!(f, "{}[{}]", base, size),
            SymbolType::Struct(s) => {
                write!(f, "{}{{", s.name)?;
                for (i, (name, ty)) in s.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", ty, name)?;
                }
                f.write_str("}")
            }
            SymbolType::Buffer { base, size } => write!(f, "Buffer<{}, {}>", base, size),
            SymbolType::Texture1D { base, size } => write!(f, "Texture<{}, {}>", base, size),
            SymbolType::Texture2D {
                base,
                width,
                height,
            } => write!(f, "Texture<{}, {}, {}>", base, width, height),
            SymbolType::Texture3D {
                base,
                width,
                height,
                depth,
            } => write!(f, "Texture<{}, {}, {}, {}>", base, width, height, depth),
            SymbolType::Function(func) => {
                f.write_str("fn(")?;
                for (i, param) in func.parameter_types.iter().enumerate() {
                    if i > 0 {
                        f.write_str("*")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")->{}", func.return_type)
            }
            SymbolType::SamplerState => f.write_str("SamplerState"),
            SymbolType::SamplerComparisonState => f.write_str("SamplerComparisonState"),
            SymbolType::Streams => f.write_str("Streams"),
            SymbolType::ConstantBuffer(group) => write!(f, "cbuffer {}", group.name),
            SymbolType::Params(group) => write!(f, "params {}", group.name),
            SymbolType::Effect(group) => write!(f, "effect {}", group.name),
            SymbolType::Shader(shader) => write!(f, "shader {}", shader.name),
        }
    }
}
