//! Shader methods.

pub(crate) mod codegen;
pub(crate) mod typecheck;

use sdsl_spirv::ExecutionModel;

/// Pipeline stage a method is the entry point of, recognized by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    VertexShader,
    PixelShader,
    ComputeShader,
    GeometryShader,
    DomainShader,
    HullShader,
}

impl EntryPoint {
    /// `VSMain`, `PSMain`, `CSMain`, `GSMain`, `DSMain` or `HSMain`.
    pub fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "VSMain" => Some(EntryPoint::VertexShader),
            "PSMain" => Some(EntryPoint::PixelShader),
            "CSMain" => Some(EntryPoint::ComputeShader),
            "GSMain" => Some(EntryPoint::GeometryShader),
            "DSMain" => Some(EntryPoint::DomainShader),
            "HSMain" => Some(EntryPoint::HullShader),
            _ => None,
        }
    }

    pub fn execution_model(self) -> ExecutionModel {
        match self {
            EntryPoint::VertexShader => ExecutionModel::Vertex,
            EntryPoint::PixelShader => ExecutionModel::Fragment,
            EntryPoint::ComputeShader => ExecutionModel::GLCompute,
            EntryPoint::GeometryShader => ExecutionModel::Geometry,
            EntryPoint::DomainShader => ExecutionModel::TessellationEvaluation,
            EntryPoint::HullShader => ExecutionModel::TessellationControl,
        }
    }
}
