//! Type checking for statements.

use alloc::vec::Vec;

use crate::{
    ast::{ExpressionKind, Statement},
    error::SdslError,
    expr::typecheck::type_check_expr,
    symbols::{Storage, Symbol, SymbolId, SymbolKind, SymbolTable},
    typecheck::{check_assignable, report, resolve_or_report, BodyContext},
    types::SymbolType,
};

/// Type check a statement.
///
/// Blocks get their own frame, released when the block is done even if
/// checking its statements reported errors.
pub(crate) fn type_check_statement(
    symbols: &mut SymbolTable,
    statement: &Statement,
    context: &BodyContext,
    diagnostics: &mut Vec<SdslError>,
) {
    match statement {
        Statement::Declare {
            id,
            type_name,
            name,
            value,
            ..
        } => {
            let ty = resolve_or_report(symbols, type_name, diagnostics);
            // The initializer cannot see the name it initializes
            if let Some(value) = value {
                let found = type_check_expr(symbols, value, context, diagnostics);
                check_assignable(&ty, &found, value.location, diagnostics);
            }
            symbols.annotations_mut().set_type(*id, ty.clone());
            let symbol = Symbol::new(
                SymbolId::new(name.name.clone(), SymbolKind::Variable, Storage::Function),
                ty,
            );
            report(diagnostics, symbols.declare(symbol));
        }
        Statement::Assign {
            target,
            value,
            location,
        } => {
            let found = type_check_expr(symbols, value, context, diagnostics);
            match &target.kind {
                ExpressionKind::Identifier(_) | ExpressionKind::Streams(_) => {
                    let expected = type_check_expr(symbols, target, context, diagnostics);
                    check_assignable(&expected, &found, *location, diagnostics);
                }
                _ => diagnostics.push(SdslError::InvalidAssignmentTarget {
                    location: target.location,
                }),
            }
        }
        Statement::Expression(expr) => {
            type_check_expr(symbols, expr, context, diagnostics);
        }
        Statement::Return { value, location } => {
            let found = match value {
                Some(value) => type_check_expr(symbols, value, context, diagnostics),
                None => SymbolType::void(),
            };
            check_assignable(&context.return_type, &found, *location, diagnostics);
        }
        Statement::Block(block) => {
            let mut scope = symbols.enter_scope();
            for statement in &block.statements {
                type_check_statement(&mut scope, statement, context, diagnostics);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{
        ast::{Expression, Literal, NodeIdGen, TypeName},
        types::ScalarType,
    };

    fn check(symbols: &mut SymbolTable, statement: &Statement) -> Vec<SdslError> {
        let mut diagnostics = Vec::new();
        let context = BodyContext {
            entry_point: None,
            return_type: SymbolType::scalar(ScalarType::Float),
        };
        type_check_statement(symbols, statement, &context, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_declare_enters_symbol() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        symbols.push();
        let value = Expression::literal(&mut ids, Literal::Float(1.0));
        let statement = Statement::declare(&mut ids, TypeName::new("float"), "y", Some(value));
        assert!(check(&mut symbols, &statement).is_empty());
        assert_eq!(
            symbols.lookup("y", SymbolKind::Variable).map(|s| &s.ty),
            Some(&SymbolType::scalar(ScalarType::Float))
        );
    }

    #[test]
    fn test_declare_with_wrong_initializer() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        symbols.push();
        let value = Expression::literal(&mut ids, Literal::Int(1));
        let statement = Statement::declare(&mut ids, TypeName::new("float"), "y", Some(value));
        assert!(matches!(
            check(&mut symbols, &statement).as_slice(),
            [SdslError::TypeMismatch { .. }]
        ));
    }

    #[test]
    fn test_block_releases_frame() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        symbols.push();
        let inner = Statement::declare(&mut ids, TypeName::new("int"), "i", None);
        let use_outside = Statement::Expression(Expression::identifier(&mut ids, "i"));
        let block = Statement::block(vec![inner]);

        assert!(check(&mut symbols, &block).is_empty());
        assert_eq!(symbols.depth(), 1);
        assert!(matches!(
            check(&mut symbols, &use_outside).as_slice(),
            [SdslError::UndefinedVariable { .. }]
        ));
    }

    #[test]
    fn test_block_with_errors_releases_frame() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        symbols.push();
        let bad = Statement::declare(&mut ids, TypeName::new("Missing"), "m", None);
        let block = Statement::block(vec![Statement::block(vec![bad])]);
        assert_eq!(check(&mut symbols, &block).len(), 1);
        assert_eq!(symbols.depth(), 1);
    }

    #[test]
    fn test_return_type_checked() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        let good = Statement::ret(Some(Expression::literal(&mut ids, Literal::Float(1.0))));
        let bad = Statement::ret(Some(Expression::literal(&mut ids, Literal::Bool(true))));
        assert!(check(&mut symbols, &good).is_empty());
        assert_eq!(check(&mut symbols, &bad).len(), 1);
        assert_eq!(check(&mut symbols, &Statement::ret(None)).len(), 1);
    }

    #[test]
    fn test_assign_target_must_be_assignable() {
        let mut ids = NodeIdGen::new();
        let mut symbols = SymbolTable::new();
        let target = Expression::literal(&mut ids, Literal::Float(1.0));
        let value = Expression::literal(&mut ids, Literal::Float(2.0));
        assert!(matches!(
            check(&mut symbols, &Statement::assign(target, value)).as_slice(),
            [SdslError::InvalidAssignmentTarget { .. }]
        ));
    }
}
