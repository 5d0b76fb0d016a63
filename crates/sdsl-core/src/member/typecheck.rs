//! Type checking for shader members.

use alloc::vec::Vec;

use crate::{
    ast::{ExpressionKind, ShaderMember, StorageModifier, StreamKind},
    error::SdslError,
    expr::typecheck::type_check_expr,
    symbols::{Storage, Symbol, SymbolId, SymbolKind, SymbolTable},
    typecheck::{check_assignable, declare_unique, resolve_or_report, BodyContext},
};

/// Resolve a member's type and declare it in the shader frame.
pub(crate) fn type_check_member(
    symbols: &mut SymbolTable,
    member: &ShaderMember,
    diagnostics: &mut Vec<SdslError>,
) -> Symbol {
    let ty = resolve_or_report(symbols, &member.type_name, diagnostics);

    if let Some(value) = &member.value {
        match &value.kind {
            ExpressionKind::Literal(_) => {
                let found =
                    type_check_expr(symbols, value, &BodyContext::shader_level(), diagnostics);
                check_assignable(&ty, &found, value.location, diagnostics);
            }
            _ => diagnostics.push(SdslError::NonConstantInitializer {
                name: member.name.name.clone(),
                location: value.location,
            }),
        }
    }

    symbols.annotations_mut().set_type(member.id, ty.clone());
    let symbol = Symbol::new(
        SymbolId::new(member.name.name.clone(), SymbolKind::Variable, member_storage(member)),
        ty,
    );
    declare_unique(symbols, symbol.clone(), member.location, diagnostics);
    symbol
}

fn member_storage(member: &ShaderMember) -> Storage {
    match (member.stream_kind, member.storage) {
        (StreamKind::Stream | StreamKind::PatchStream, _) => Storage::Stream,
        (StreamKind::None, StorageModifier::Static) => Storage::Static,
        (StreamKind::None, _) => Storage::None,
    }
}
