//! Code generation for expressions.

use alloc::format;

use sdsl_spirv::{BinaryOp, ConstantValue, Id, Inst};

use crate::{
    ast::{BinaryOperator, Expression, ExpressionKind, Literal},
    codegen::{Binding, CompilerUnit},
    error::{SdslError, SdslResult},
    symbols::SymbolTable,
    types::ScalarType,
};

/// Generate code for an expression, returning the id holding its value.
pub(crate) fn generate_expr(
    table: &SymbolTable,
    expr: &Expression,
    compiler: &mut CompilerUnit,
) -> SdslResult<Id> {
    match &expr.kind {
        ExpressionKind::Literal(literal) => {
            let (scalar, value) = literal_constant(literal);
            compiler.context.get_or_register_constant(scalar, value)
        }
        ExpressionKind::Identifier(name) => {
            let binding = compiler
                .builder
                .lookup(name)
                .cloned()
                .ok_or_else(|| SdslError::codegen(format!("'{}' is not bound", name)))?;
            read_binding(compiler, name, &binding)
        }
        ExpressionKind::Streams(name) => {
            let binding = compiler.builder.member(name).cloned().ok_or_else(|| {
                SdslError::codegen(format!("stream '{}' is not bound", name))
            })?;
            read_binding(compiler, name, &binding)
        }
        ExpressionKind::Binary { operator, lhs, rhs } => {
            let lhs = generate_expr(table, lhs, compiler)?;
            let rhs = generate_expr(table, rhs, compiler)?;
            let ty = table.annotations().node_type(expr.id).ok_or_else(|| {
                SdslError::codegen(format!("'{}' expression has no type", operator.symbol()))
            })?;
            let scalar = ty.element_scalar().ok_or_else(|| SdslError::InvalidOperand {
                operator: operator.symbol(),
                ty: ty.clone(),
                location: expr.location,
            })?;
            let op = binary_op(*operator, scalar).ok_or_else(|| SdslError::InvalidOperand {
                operator: operator.symbol(),
                ty: ty.clone(),
                location: expr.location,
            })?;

            let result_type = compiler.context.get_or_register(ty)?;
            let result = compiler.context.next_id();
            compiler.context.buffer_mut().emit(Inst::Binary {
                op,
                result_type,
                result,
                lhs,
                rhs,
            });
            Ok(result)
        }
    }
}

/// Values are used directly; variables are loaded.
fn read_binding(compiler: &mut CompilerUnit, name: &str, binding: &Binding) -> SdslResult<Id> {
    match binding {
        Binding::Value { id, .. } => Ok(*id),
        Binding::Variable { id, ty } => {
            let result_type = compiler.context.get_or_register(ty)?;
            let result = compiler.context.next_id();
            compiler
                .context
                .buffer_mut()
                .push_load(result, result_type, *id);
            Ok(result)
        }
        Binding::Generic { .. } => Err(SdslError::codegen(format!(
            "generic parameter '{}' has no value before specialization",
            name
        ))),
    }
}

pub(crate) fn literal_constant(literal: &Literal) -> (ScalarType, ConstantValue) {
    match literal {
        Literal::Bool(b) => (ScalarType::Bool, ConstantValue::Int(*b as i64)),
        Literal::Int(v) => (ScalarType::Int, ConstantValue::Int(*v)),
        Literal::Float(v) => (ScalarType::Float, ConstantValue::float(*v)),
    }
}

/// Pick the instruction for an operator on the given element type.
fn binary_op(operator: BinaryOperator, scalar: ScalarType) -> Option<BinaryOp> {
    if !scalar.is_numeric() {
        return None;
    }
    let op = if scalar.is_float() {
        match operator {
            BinaryOperator::Add => BinaryOp::FAdd,
            BinaryOperator::Sub => BinaryOp::FSub,
            BinaryOperator::Mul => BinaryOp::FMul,
            BinaryOperator::Div => BinaryOp::FDiv,
        }
    } else {
        match operator {
            BinaryOperator::Add => BinaryOp::IAdd,
            BinaryOperator::Sub => BinaryOp::ISub,
            BinaryOperator::Mul => BinaryOp::IMul,
            BinaryOperator::Div if scalar.is_unsigned() => BinaryOp::UDiv,
            BinaryOperator::Div => BinaryOp::SDiv,
        }
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_selection() {
        assert_eq!(binary_op(BinaryOperator::Add, ScalarType::Float), Some(BinaryOp::FAdd));
        assert_eq!(binary_op(BinaryOperator::Div, ScalarType::Double), Some(BinaryOp::FDiv));
        assert_eq!(binary_op(BinaryOperator::Mul, ScalarType::Int), Some(BinaryOp::IMul));
        assert_eq!(binary_op(BinaryOperator::Div, ScalarType::Int), Some(BinaryOp::SDiv));
        assert_eq!(binary_op(BinaryOperator::Div, ScalarType::ULong), Some(BinaryOp::UDiv));
        assert_eq!(binary_op(BinaryOperator::Sub, ScalarType::UInt), Some(BinaryOp::ISub));
        assert_eq!(binary_op(BinaryOperator::Add, ScalarType::Bool), None);
    }

    #[test]
    fn test_literal_constants() {
        assert_eq!(
            literal_constant(&Literal::Bool(true)),
            (ScalarType::Bool, ConstantValue::Int(1))
        );
        assert_eq!(
            literal_constant(&Literal::Float(0.5)),
            (ScalarType::Float, ConstantValue::float(0.5))
        );
    }
}
