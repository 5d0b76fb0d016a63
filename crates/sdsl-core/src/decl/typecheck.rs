//! Type checking for struct, generic parameter and compose declarations.

use alloc::vec::Vec;

use crate::{
    ast::{ShaderCompose, ShaderParameter, ShaderStruct},
    error::SdslError,
    symbols::{Storage, Symbol, SymbolId, SymbolKind, SymbolTable},
    typecheck::{declare_unique, report, resolve_or_report},
    types::{ShaderSymbol, StructType, SymbolType},
};

/// Resolve a struct's fields and register it as a declared type.
///
/// Fields may only use types declared before the struct. A name that
/// already resolves to a type, built-in or declared, is a redeclaration
/// and the earlier type is kept.
pub(crate) fn type_check_struct(
    symbols: &mut SymbolTable,
    s: &ShaderStruct,
    diagnostics: &mut Vec<SdslError>,
) -> Symbol {
    let fields = s
        .fields
        .iter()
        .map(|field| {
            let ty = resolve_or_report(symbols, &field.type_name, diagnostics);
            (field.name.name.clone(), ty)
        })
        .collect();

    let name = &s.name.name;
    let ty = SymbolType::Struct(StructType::new(name.clone(), fields));
    let symbol = Symbol::new(
        SymbolId::new(name.clone(), SymbolKind::Struct, Storage::None),
        ty.clone(),
    );
    symbols.annotations_mut().set_type(s.id, ty.clone());

    if symbols.resolve_type(name).is_some() {
        diagnostics.push(SdslError::Redeclaration {
            kind: SymbolKind::Struct,
            name: name.clone(),
            location: s.location,
        });
        return symbol;
    }

    symbols.declare_type(name.clone(), ty);
    report(diagnostics, symbols.declare(symbol.clone()));
    symbol
}

/// Declare a generic parameter of the shader class.
pub(crate) fn type_check_generic(
    symbols: &mut SymbolTable,
    generic: &ShaderParameter,
    diagnostics: &mut Vec<SdslError>,
) -> Symbol {
    let ty = resolve_or_report(symbols, &generic.type_name, diagnostics);
    symbols.annotations_mut().set_type(generic.id, ty.clone());
    let symbol = Symbol::new(
        SymbolId::new(generic.name.name.clone(), SymbolKind::Variable, Storage::Generic),
        ty,
    );
    declare_unique(symbols, symbol.clone(), generic.name.location, diagnostics);
    symbol
}

/// Declare a composed mixin instance.
///
/// The mixin is not resolved here; the symbol only records the mixin's
/// name as an empty shader.
pub(crate) fn type_check_compose(
    symbols: &mut SymbolTable,
    compose: &ShaderCompose,
    diagnostics: &mut Vec<SdslError>,
) -> Symbol {
    let ty = SymbolType::Shader(ShaderSymbol::new(compose.mixin.name.name.clone(), Vec::new()));
    symbols.annotations_mut().set_type(compose.id, ty.clone());
    let symbol = Symbol::new(
        SymbolId::new(compose.name.name.clone(), SymbolKind::Compose, Storage::None),
        ty,
    );
    declare_unique(symbols, symbol.clone(), compose.location, diagnostics);
    symbol
}
