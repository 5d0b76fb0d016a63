//! Type checking for methods.

use alloc::{string::ToString, vec::Vec};

use super::EntryPoint;
use crate::{
    annotations::{MethodInfo, MethodState},
    ast::ShaderMethod,
    error::SdslError,
    stmt::typecheck::type_check_statement,
    symbols::{Storage, Symbol, SymbolId, SymbolKind, SymbolTable},
    typecheck::{report, resolve_or_report, BodyContext},
    types::{FunctionType, SymbolType},
};

/// Resolve a method's signature and register it.
///
/// Opens an overload slot, resolves the return type and each parameter
/// type, and records the resulting function type on the method node.
/// Resolved parameter types are also entered into the declared types.
/// Overloads must differ in their function type; an exact repeat of an
/// earlier signature is a redeclaration.
pub(crate) fn declare_method(
    symbols: &mut SymbolTable,
    method: &ShaderMethod,
    diagnostics: &mut Vec<SdslError>,
) -> Symbol {
    let name = &method.name.name;
    let earlier = symbols.function_overloads(name).len();
    symbols.register_function(name.clone());

    let return_type = resolve_or_report(symbols, &method.return_type, diagnostics);

    let mut parameter_types = Vec::with_capacity(method.parameters.len());
    for param in &method.parameters {
        let ty = resolve_or_report(symbols, &param.type_name, diagnostics);
        if !ty.is_undefined() {
            symbols.declare_type(ty.to_string(), ty.clone());
        }
        let symbol = Symbol::new(
            SymbolId::new(param.name.name.clone(), SymbolKind::Variable, Storage::Function),
            ty.clone(),
        );
        report(diagnostics, symbols.add_parameter(symbol));
        symbols.annotations_mut().set_type(param.id, ty.clone());
        parameter_types.push(ty);
    }

    let function = FunctionType::new(return_type, parameter_types);
    let repeated = symbols.function_overloads(name)[..earlier]
        .iter()
        .any(|overload| overload.ty.as_ref() == Some(&function));
    if repeated {
        diagnostics.push(SdslError::Redeclaration {
            kind: SymbolKind::Method,
            name: name.clone(),
            location: method.location,
        });
    }
    report(diagnostics, symbols.complete_function(function.clone()));

    let ty = SymbolType::Function(function);
    let annotations = symbols.annotations_mut();
    annotations.set_type(method.id, ty.clone());
    annotations.set_method(
        method.id,
        MethodInfo {
            entry_point: EntryPoint::from_method_name(name),
            state: MethodState::TypeResolved,
        },
    );

    let symbol = Symbol::new(
        SymbolId::new(name.clone(), SymbolKind::Method, Storage::None),
        ty,
    );
    report(diagnostics, symbols.declare(symbol.clone()));
    symbol
}

/// Check a method body in its own frame holding the parameters.
pub(crate) fn type_check_method_body(
    symbols: &mut SymbolTable,
    method: &ShaderMethod,
    diagnostics: &mut Vec<SdslError>,
) {
    let Some(body) = &method.body else {
        return;
    };

    let return_type = match symbols.annotations().node_type(method.id) {
        Some(SymbolType::Function(function)) => (*function.return_type).clone(),
        _ => SymbolType::void(),
    };
    let context = BodyContext {
        entry_point: symbols
            .annotations()
            .method(method.id)
            .and_then(|info| info.entry_point),
        return_type: return_type.clone(),
    };

    let mut scope = symbols.enter_scope();
    for param in &method.parameters {
        let ty = scope
            .annotations()
            .node_type(param.id)
            .cloned()
            .unwrap_or_else(|| SymbolType::Undefined(param.type_name.name.clone()));
        let symbol = Symbol::new(
            SymbolId::new(param.name.name.clone(), SymbolKind::Variable, Storage::Function),
            ty,
        );
        report(diagnostics, scope.declare(symbol));
    }

    for statement in &body.statements {
        type_check_statement(&mut scope, statement, &context, diagnostics);
    }

    if !return_type.is_void() && !return_type.is_undefined() && !body.ends_with_return() {
        diagnostics.push(SdslError::MissingReturn {
            method: method.name.name.clone(),
            location: method.location,
        });
    }
}
