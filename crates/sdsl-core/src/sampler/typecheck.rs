//! Type checking for sampler states.

use alloc::vec::Vec;

use crate::{
    ast::{SamplerKind, ShaderSamplerState},
    error::SdslError,
    symbols::{Storage, Symbol, SymbolId, SymbolKind, SymbolTable},
    typecheck::declare_unique,
    types::SymbolType,
};

/// Declare a sampler state as a uniform variable of the shader.
pub(crate) fn type_check_sampler_state(
    symbols: &mut SymbolTable,
    sampler: &ShaderSamplerState,
    diagnostics: &mut Vec<SdslError>,
) -> Symbol {
    let ty = match sampler.kind {
        SamplerKind::State => SymbolType::SamplerState,
        SamplerKind::ComparisonState => SymbolType::SamplerComparisonState,
    };
    symbols.annotations_mut().set_type(sampler.id, ty.clone());
    let symbol = Symbol::new(
        SymbolId::new(sampler.name.name.clone(), SymbolKind::Variable, Storage::Uniform),
        ty,
    );
    declare_unique(symbols, symbol.clone(), sampler.location, diagnostics);
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, NodeIdGen, SamplerStateAssign};

    #[test]
    fn test_comparison_sampler_symbol() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        symbols.push();
        let filter = Expression::identifier(&mut ids, "MIN_MAG_LINEAR_MIP_POINT");
        let sampler = ShaderSamplerState::new(&mut ids, SamplerKind::ComparisonState, "Shadow")
            .with_member(SamplerStateAssign::new("Filter", filter));
        let mut diagnostics = Vec::new();
        let symbol = type_check_sampler_state(&mut symbols, &sampler, &mut diagnostics);

        // Assigned values are configuration, never resolved as identifiers
        assert!(diagnostics.is_empty());
        assert_eq!(symbol.id.storage, Storage::Uniform);
        assert_eq!(symbol.ty, SymbolType::SamplerComparisonState);
        assert_eq!(
            symbols.annotations().node_type(sampler.id),
            Some(&SymbolType::SamplerComparisonState)
        );
    }

    #[test]
    fn test_sampler_redeclared() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        symbols.push();
        let first = ShaderSamplerState::new(&mut ids, SamplerKind::State, "Linear");
        let second = ShaderSamplerState::new(&mut ids, SamplerKind::ComparisonState, "Linear");
        let mut diagnostics = Vec::new();
        type_check_sampler_state(&mut symbols, &first, &mut diagnostics);
        type_check_sampler_state(&mut symbols, &second, &mut diagnostics);
        assert!(matches!(
            diagnostics.as_slice(),
            [SdslError::Redeclaration { name, .. }] if name == "Linear"
        ));
    }
}
