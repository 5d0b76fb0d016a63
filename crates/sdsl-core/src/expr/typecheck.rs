//! Type checking for expressions.

use alloc::{format, string::String, vec::Vec};

use crate::{
    ast::{Expression, ExpressionKind, Literal, TextLocation},
    error::SdslError,
    symbols::{Storage, SymbolKind, SymbolTable},
    typecheck::{poisoned, BodyContext},
    types::{ScalarType, SymbolType},
};

/// Infer an expression's type, recording it on the node.
///
/// Errors are pushed to `diagnostics` and the expression gets an
/// undefined type, which later checks accept silently.
pub(crate) fn type_check_expr(
    symbols: &mut SymbolTable,
    expr: &Expression,
    context: &BodyContext,
    diagnostics: &mut Vec<SdslError>,
) -> SymbolType {
    let ty = match &expr.kind {
        ExpressionKind::Literal(literal) => {
            type_check_literal(literal, expr.location, diagnostics)
        }
        ExpressionKind::Identifier(name) => match symbols.lookup(name, SymbolKind::Variable) {
            Some(symbol) => symbol.ty.clone(),
            None => {
                diagnostics.push(SdslError::undefined_variable(name.clone(), expr.location));
                poisoned()
            }
        },
        ExpressionKind::Streams(name) => {
            type_check_streams(symbols, name, expr.location, context, diagnostics)
        }
        ExpressionKind::Binary { operator, lhs, rhs } => {
            let left = type_check_expr(symbols, lhs, context, diagnostics);
            let right = type_check_expr(symbols, rhs, context, diagnostics);
            if left.is_undefined() || right.is_undefined() {
                poisoned()
            } else if !left.is_numeric() {
                diagnostics.push(SdslError::InvalidOperand {
                    operator: operator.symbol(),
                    ty: left,
                    location: expr.location,
                });
                poisoned()
            } else if left != right {
                diagnostics.push(SdslError::type_mismatch(left, right, rhs.location));
                poisoned()
            } else {
                left
            }
        }
    };

    symbols.annotations_mut().set_type(expr.id, ty.clone());
    ty
}

/// `streams.name` resolves against the shader's stream members and is only
/// allowed inside an entry point.
fn type_check_streams(
    symbols: &SymbolTable,
    name: &str,
    location: TextLocation,
    context: &BodyContext,
    diagnostics: &mut Vec<SdslError>,
) -> SymbolType {
    if context.entry_point.is_none() {
        diagnostics.push(SdslError::StreamsOutsideEntryPoint {
            name: name.into(),
            location,
        });
        return poisoned();
    }

    let stream = symbols
        .annotations()
        .shader()
        .and_then(|shader| shader.try_get(name, SymbolKind::Variable))
        .filter(|symbol| symbol.id.storage == Storage::Stream);
    match stream {
        Some(symbol) => symbol.ty.clone(),
        None => {
            diagnostics.push(SdslError::MissingMember {
                container: String::from("streams"),
                name: name.into(),
                kind: SymbolKind::Variable,
            });
            poisoned()
        }
    }
}

/// Type a literal, reporting values that have no exact constant.
///
/// Integer literals are 32-bit `int`; floats must be finite.
fn type_check_literal(
    literal: &Literal,
    location: TextLocation,
    diagnostics: &mut Vec<SdslError>,
) -> SymbolType {
    let ty = literal_type(literal);
    let written = match literal {
        Literal::Bool(_) => None,
        Literal::Int(n) if i32::try_from(*n).is_err() => Some(format!("{}", n)),
        Literal::Float(v) if !v.is_finite() => Some(format!("{:?}", v)),
        Literal::Int(_) | Literal::Float(_) => None,
    };
    if let Some(literal) = written {
        diagnostics.push(SdslError::LiteralOutOfRange {
            literal,
            ty: ty.clone(),
            location,
        });
    }
    ty
}

fn literal_type(literal: &Literal) -> SymbolType {
    match literal {
        Literal::Bool(_) => SymbolType::scalar(ScalarType::Bool),
        Literal::Int(_) => SymbolType::scalar(ScalarType::Int),
        Literal::Float(_) => SymbolType::scalar(ScalarType::Float),
    }
}
