//! Instructions.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::id::Id;

/// Storage class of a variable or pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Function-local storage
    Function,
    /// Module-private storage
    Private,
    /// Stage input
    Input,
    /// Stage output
    Output,
    /// Uniform block storage
    Uniform,
    /// Opaque uniform resources (textures, buffers)
    UniformConstant,
    /// Storage shared by a compute workgroup
    Workgroup,
}

impl StorageClass {
    /// Name used in the text format.
    pub fn name(self) -> &'static str {
        match self {
            StorageClass::Function => "Function",
            StorageClass::Private => "Private",
            StorageClass::Input => "Input",
            StorageClass::Output => "Output",
            StorageClass::Uniform => "Uniform",
            StorageClass::UniformConstant => "UniformConstant",
            StorageClass::Workgroup => "Workgroup",
        }
    }

    /// Look up a storage class by its text-format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Function" => Some(StorageClass::Function),
            "Private" => Some(StorageClass::Private),
            "Input" => Some(StorageClass::Input),
            "Output" => Some(StorageClass::Output),
            "Uniform" => Some(StorageClass::Uniform),
            "UniformConstant" => Some(StorageClass::UniformConstant),
            "Workgroup" => Some(StorageClass::Workgroup),
            _ => None,
        }
    }
}

/// Shader stage an entry point runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionModel {
    Vertex,
    TessellationControl,
    TessellationEvaluation,
    Geometry,
    Fragment,
    GLCompute,
}

impl ExecutionModel {
    /// Name used in the text format.
    pub fn name(self) -> &'static str {
        match self {
            ExecutionModel::Vertex => "Vertex",
            ExecutionModel::TessellationControl => "TessellationControl",
            ExecutionModel::TessellationEvaluation => "TessellationEvaluation",
            ExecutionModel::Geometry => "Geometry",
            ExecutionModel::Fragment => "Fragment",
            ExecutionModel::GLCompute => "GLCompute",
        }
    }

    /// Look up an execution model by its text-format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Vertex" => Some(ExecutionModel::Vertex),
            "TessellationControl" => Some(ExecutionModel::TessellationControl),
            "TessellationEvaluation" => Some(ExecutionModel::TessellationEvaluation),
            "Geometry" => Some(ExecutionModel::Geometry),
            "Fragment" => Some(ExecutionModel::Fragment),
            "GLCompute" => Some(ExecutionModel::GLCompute),
            _ => None,
        }
    }
}

/// Dimensionality of an image type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    Dim1D,
    Dim2D,
    Dim3D,
    Buffer,
}

impl Dim {
    /// Name used in the text format.
    pub fn name(self) -> &'static str {
        match self {
            Dim::Dim1D => "1D",
            Dim::Dim2D => "2D",
            Dim::Dim3D => "3D",
            Dim::Buffer => "Buffer",
        }
    }

    /// Look up a dimensionality by its text-format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "1D" => Some(Dim::Dim1D),
            "2D" => Some(Dim::Dim2D),
            "3D" => Some(Dim::Dim3D),
            "Buffer" => Some(Dim::Buffer),
            _ => None,
        }
    }
}

/// Function control hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionControl {
    None,
    Inline,
    DontInline,
    Pure,
    Const,
}

impl FunctionControl {
    /// Name used in the text format.
    pub fn name(self) -> &'static str {
        match self {
            FunctionControl::None => "None",
            FunctionControl::Inline => "Inline",
            FunctionControl::DontInline => "DontInline",
            FunctionControl::Pure => "Pure",
            FunctionControl::Const => "Const",
        }
    }

    /// Look up a function control by its text-format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(FunctionControl::None),
            "Inline" => Some(FunctionControl::Inline),
            "DontInline" => Some(FunctionControl::DontInline),
            "Pure" => Some(FunctionControl::Pure),
            "Const" => Some(FunctionControl::Const),
            _ => None,
        }
    }
}

/// Two-operand arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    IAdd,
    ISub,
    IMul,
    SDiv,
    UDiv,
    FAdd,
    FSub,
    FMul,
    FDiv,
}

impl BinaryOp {
    /// Opcode name used in the text format.
    pub fn opcode_name(self) -> &'static str {
        match self {
            BinaryOp::IAdd => "OpIAdd",
            BinaryOp::ISub => "OpISub",
            BinaryOp::IMul => "OpIMul",
            BinaryOp::SDiv => "OpSDiv",
            BinaryOp::UDiv => "OpUDiv",
            BinaryOp::FAdd => "OpFAdd",
            BinaryOp::FSub => "OpFSub",
            BinaryOp::FMul => "OpFMul",
            BinaryOp::FDiv => "OpFDiv",
        }
    }

    /// Look up an arithmetic operation by its opcode name.
    pub fn from_opcode_name(name: &str) -> Option<Self> {
        match name {
            "OpIAdd" => Some(BinaryOp::IAdd),
            "OpISub" => Some(BinaryOp::ISub),
            "OpIMul" => Some(BinaryOp::IMul),
            "OpSDiv" => Some(BinaryOp::SDiv),
            "OpUDiv" => Some(BinaryOp::UDiv),
            "OpFAdd" => Some(BinaryOp::FAdd),
            "OpFSub" => Some(BinaryOp::FSub),
            "OpFMul" => Some(BinaryOp::FMul),
            "OpFDiv" => Some(BinaryOp::FDiv),
            _ => None,
        }
    }
}

/// Literal payload of an `OpConstant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    /// Integer literal
    Int(i64),
    /// Floating point literal (stored as bits for Eq compatibility)
    FloatBits(u64),
}

impl ConstantValue {
    /// Create a floating point constant.
    pub fn float(value: f64) -> Self {
        ConstantValue::FloatBits(value.to_bits())
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(v) => write!(f, "{}", v),
            // Debug keeps a '.' or exponent so the parser can tell floats apart
            ConstantValue::FloatBits(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
        }
    }
}

/// A single instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Inst {
    // Debug and annotation
    /// Debug name for an id
    Name { target: Id, name: String },
    /// Debug name for a struct member
    MemberName { ty: Id, member: u32, name: String },
    /// Shader semantic attached to an id
    DecorateSemantic { target: Id, semantic: String },
    /// Entry point declaration
    EntryPoint {
        model: ExecutionModel,
        function: Id,
        name: String,
    },

    // Types
    TypeVoid {
        result: Id,
    },
    TypeBool {
        result: Id,
    },
    TypeInt {
        result: Id,
        width: u32,
        signed: bool,
    },
    TypeFloat {
        result: Id,
        width: u32,
    },
    TypeVector {
        result: Id,
        component: Id,
        count: u32,
    },
    TypeMatrix {
        result: Id,
        column: Id,
        count: u32,
    },
    TypeArray {
        result: Id,
        element: Id,
        length: Id,
    },
    TypePointer {
        result: Id,
        storage: StorageClass,
        pointee: Id,
    },
    TypeStruct {
        result: Id,
        members: Vec<Id>,
    },
    TypeFunction {
        result: Id,
        return_type: Id,
        params: Vec<Id>,
    },
    TypeImage {
        result: Id,
        sampled_type: Id,
        dim: Dim,
    },
    TypeSampler {
        result: Id,
    },

    // Constants
    Constant {
        result_type: Id,
        result: Id,
        value: ConstantValue,
    },
    ConstantTrue {
        result_type: Id,
        result: Id,
    },
    ConstantFalse {
        result_type: Id,
        result: Id,
    },

    // Memory
    Variable {
        result_type: Id,
        result: Id,
        storage: StorageClass,
    },
    Load {
        result_type: Id,
        result: Id,
        pointer: Id,
    },
    Store {
        pointer: Id,
        object: Id,
    },

    // Functions and control flow
    Function {
        result_type: Id,
        result: Id,
        control: FunctionControl,
        function_type: Id,
    },
    FunctionParameter {
        result_type: Id,
        result: Id,
    },
    Label {
        result: Id,
    },
    Binary {
        op: BinaryOp,
        result_type: Id,
        result: Id,
        lhs: Id,
        rhs: Id,
    },
    Return,
    ReturnValue {
        value: Id,
    },
    FunctionEnd,
}

impl Inst {
    /// Get the opcode name of this instruction.
    pub fn opcode_name(&self) -> &'static str {
        match self {
            Inst::Name { .. } => "OpName",
            Inst::MemberName { .. } => "OpMemberName",
            Inst::DecorateSemantic { .. } => "OpSDSLDecorateSemantic",
            Inst::EntryPoint { .. } => "OpEntryPoint",
            Inst::TypeVoid { .. } => "OpTypeVoid",
            Inst::TypeBool { .. } => "OpTypeBool",
            Inst::TypeInt { .. } => "OpTypeInt",
            Inst::TypeFloat { .. } => "OpTypeFloat",
            Inst::TypeVector { .. } => "OpTypeVector",
            Inst::TypeMatrix { .. } => "OpTypeMatrix",
            Inst::TypeArray { .. } => "OpTypeArray",
            Inst::TypePointer { .. } => "OpTypePointer",
            Inst::TypeStruct { .. } => "OpTypeStruct",
            Inst::TypeFunction { .. } => "OpTypeFunction",
            Inst::TypeImage { .. } => "OpTypeImage",
            Inst::TypeSampler { .. } => "OpTypeSampler",
            Inst::Constant { .. } => "OpConstant",
            Inst::ConstantTrue { .. } => "OpConstantTrue",
            Inst::ConstantFalse { .. } => "OpConstantFalse",
            Inst::Variable { .. } => "OpVariable",
            Inst::Load { .. } => "OpLoad",
            Inst::Store { .. } => "OpStore",
            Inst::Function { .. } => "OpFunction",
            Inst::FunctionParameter { .. } => "OpFunctionParameter",
            Inst::Label { .. } => "OpLabel",
            Inst::Binary { op, .. } => op.opcode_name(),
            Inst::Return => "OpReturn",
            Inst::ReturnValue { .. } => "OpReturnValue",
            Inst::FunctionEnd => "OpFunctionEnd",
        }
    }

    /// Get the id this instruction defines, if any.
    pub fn result_id(&self) -> Option<Id> {
        match self {
            Inst::TypeVoid { result }
            | Inst::TypeBool { result }
            | Inst::TypeInt { result, .. }
            | Inst::TypeFloat { result, .. }
            | Inst::TypeVector { result, .. }
            | Inst::TypeMatrix { result, .. }
            | Inst::TypeArray { result, .. }
            | Inst::TypePointer { result, .. }
            | Inst::TypeStruct { result, .. }
            | Inst::TypeFunction { result, .. }
            | Inst::TypeImage { result, .. }
            | Inst::TypeSampler { result }
            | Inst::Constant { result, .. }
            | Inst::ConstantTrue { result, .. }
            | Inst::ConstantFalse { result, .. }
            | Inst::Variable { result, .. }
            | Inst::Load { result, .. }
            | Inst::Function { result, .. }
            | Inst::FunctionParameter { result, .. }
            | Inst::Label { result }
            | Inst::Binary { result, .. } => Some(*result),
            Inst::Name { .. }
            | Inst::MemberName { .. }
            | Inst::DecorateSemantic { .. }
            | Inst::EntryPoint { .. }
            | Inst::Store { .. }
            | Inst::Return
            | Inst::ReturnValue { .. }
            | Inst::FunctionEnd => None,
        }
    }

    /// Check if this instruction declares a type.
    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self,
            Inst::TypeVoid { .. }
                | Inst::TypeBool { .. }
                | Inst::TypeInt { .. }
                | Inst::TypeFloat { .. }
                | Inst::TypeVector { .. }
                | Inst::TypeMatrix { .. }
                | Inst::TypeArray { .. }
                | Inst::TypePointer { .. }
                | Inst::TypeStruct { .. }
                | Inst::TypeFunction { .. }
                | Inst::TypeImage { .. }
                | Inst::TypeSampler { .. }
        )
    }

    /// Check if this instruction ends a block.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Inst::Return | Inst::ReturnValue { .. })
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = self.result_id() {
            write!(f, "{} = ", result)?;
        }
        write!(f, "{}", self.opcode_name())?;
        match self {
            Inst::Name { target, name } => write!(f, " {} {}", target, Quoted(name)),
            Inst::MemberName { ty, member, name } => {
                write!(f, " {} {} {}", ty, member, Quoted(name))
            }
            Inst::DecorateSemantic { target, semantic } => {
                write!(f, " {} {}", target, Quoted(semantic))
            }
            Inst::EntryPoint {
                model,
                function,
                name,
            } => write!(f, " {} {} {}", model.name(), function, Quoted(name)),
            Inst::TypeVoid { .. }
            | Inst::TypeBool { .. }
            | Inst::TypeSampler { .. }
            | Inst::Label { .. } => Ok(()),
            Inst::TypeInt { width, signed, .. } => {
                write!(f, " {} {}", width, if *signed { 1 } else { 0 })
            }
            Inst::TypeFloat { width, .. } => write!(f, " {}", width),
            Inst::TypeVector {
                component, count, ..
            } => write!(f, " {} {}", component, count),
            Inst::TypeMatrix { column, count, .. } => write!(f, " {} {}", column, count),
            Inst::TypeArray {
                element, length, ..
            } => write!(f, " {} {}", element, length),
            Inst::TypePointer {
                storage, pointee, ..
            } => write!(f, " {} {}", storage.name(), pointee),
            Inst::TypeStruct { members, .. } => {
                for member in members {
                    write!(f, " {}", member)?;
                }
                Ok(())
            }
            Inst::TypeFunction {
                return_type,
                params,
                ..
            } => {
                write!(f, " {}", return_type)?;
                for param in params {
                    write!(f, " {}", param)?;
                }
                Ok(())
            }
            Inst::TypeImage {
                sampled_type, dim, ..
            } => write!(f, " {} {}", sampled_type, dim.name()),
            Inst::Constant {
                result_type, value, ..
            } => write!(f, " {} {}", result_type, value),
            Inst::ConstantTrue { result_type, .. } | Inst::ConstantFalse { result_type, .. } => {
                write!(f, " {}", result_type)
            }
            Inst::Variable {
                result_type,
                storage,
                ..
            } => write!(f, " {} {}", result_type, storage.name()),
            Inst::Load {
                result_type,
                pointer,
                ..
            } => write!(f, " {} {}", result_type, pointer),
            Inst::Store { pointer, object } => write!(f, " {} {}", pointer, object),
            Inst::Function {
                result_type,
                control,
                function_type,
                ..
            } => write!(f, " {} {} {}", result_type, control.name(), function_type),
            Inst::FunctionParameter { result_type, .. } => write!(f, " {}", result_type),
            Inst::Binary {
                result_type,
                lhs,
                rhs,
                ..
            } => write!(f, " {} {} {}", result_type, lhs, rhs),
            Inst::ReturnValue { value } => write!(f, " {}", value),
            Inst::Return | Inst::FunctionEnd => Ok(()),
        }
    }
}

/// A string operand: double-quoted, with `"` and `\` escaped.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            if c == '"' || c == '\\' {
                f.write_str("\\")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str("\"")
    }
}
