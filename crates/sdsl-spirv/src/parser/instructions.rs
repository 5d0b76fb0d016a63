//! Instruction parsers.

use nom::{
    branch::alt,
    character::complete::{char, space0},
    combinator::{fail, map},
    multi::many0,
    sequence::{pair, terminated, tuple},
    IResult,
};

use super::primitives::{
    constant_value, dim, execution_model, function_control, opcode, operand, parse_id, quoted,
    storage_class, unsigned,
};
use crate::inst::{BinaryOp, Inst};

/// Parse one instruction in either `%id = Op...` or `Op...` form.
pub(crate) fn parse_inst(input: &str) -> IResult<&str, Inst> {
    alt((parse_result_inst, parse_plain_inst))(input)
}

/// Parse an instruction that defines a result id.
fn parse_result_inst(input: &str) -> IResult<&str, Inst> {
    let (input, result) = terminated(parse_id, space0)(input)?;
    let (input, _) = terminated(char('='), space0)(input)?;
    let (input, op) = opcode(input)?;

    match op {
        "OpTypeVoid" => Ok((input, Inst::TypeVoid { result })),
        "OpTypeBool" => Ok((input, Inst::TypeBool { result })),
        "OpTypeSampler" => Ok((input, Inst::TypeSampler { result })),
        "OpLabel" => Ok((input, Inst::Label { result })),
        "OpTypeInt" => map(
            pair(operand(unsigned), operand(unsigned)),
            |(width, signedness)| Inst::TypeInt {
                result,
                width,
                signed: signedness != 0,
            },
        )(input),
        "OpTypeFloat" => map(operand(unsigned), |width| Inst::TypeFloat { result, width })(input),
        "OpTypeVector" => map(
            pair(operand(parse_id), operand(unsigned)),
            |(component, count)| Inst::TypeVector {
                result,
                component,
                count,
            },
        )(input),
        "OpTypeMatrix" => map(
            pair(operand(parse_id), operand(unsigned)),
            |(column, count)| Inst::TypeMatrix {
                result,
                column,
                count,
            },
        )(input),
        "OpTypeArray" => map(
            pair(operand(parse_id), operand(parse_id)),
            |(element, length)| Inst::TypeArray {
                result,
                element,
                length,
            },
        )(input),
        "OpTypePointer" => map(
            pair(operand(storage_class), operand(parse_id)),
            |(storage, pointee)| Inst::TypePointer {
                result,
                storage,
                pointee,
            },
        )(input),
        "OpTypeStruct" => map(many0(operand(parse_id)), |members| Inst::TypeStruct {
            result,
            members,
        })(input),
        "OpTypeFunction" => map(
            pair(operand(parse_id), many0(operand(parse_id))),
            |(return_type, params)| Inst::TypeFunction {
                result,
                return_type,
                params,
            },
        )(input),
        "OpTypeImage" => map(
            pair(operand(parse_id), operand(dim)),
            |(sampled_type, dim)| Inst::TypeImage {
                result,
                sampled_type,
                dim,
            },
        )(input),
        "OpConstant" => map(
            pair(operand(parse_id), operand(constant_value)),
            |(result_type, value)| Inst::Constant {
                result_type,
                result,
                value,
            },
        )(input),
        "OpConstantTrue" => map(operand(parse_id), |result_type| Inst::ConstantTrue {
            result_type,
            result,
        })(input),
        "OpConstantFalse" => map(operand(parse_id), |result_type| Inst::ConstantFalse {
            result_type,
            result,
        })(input),
        "OpVariable" => map(
            pair(operand(parse_id), operand(storage_class)),
            |(result_type, storage)| Inst::Variable {
                result_type,
                result,
                storage,
            },
        )(input),
        "OpLoad" => map(
            pair(operand(parse_id), operand(parse_id)),
            |(result_type, pointer)| Inst::Load {
                result_type,
                result,
                pointer,
            },
        )(input),
        "OpFunction" => map(
            tuple((
                operand(parse_id),
                operand(function_control),
                operand(parse_id),
            )),
            |(result_type, control, function_type)| Inst::Function {
                result_type,
                result,
                control,
                function_type,
            },
        )(input),
        "OpFunctionParameter" => map(operand(parse_id), |result_type| {
            Inst::FunctionParameter {
                result_type,
                result,
            }
        })(input),
        other => match BinaryOp::from_opcode_name(other) {
            Some(op) => map(
                tuple((operand(parse_id), operand(parse_id), operand(parse_id))),
                |(result_type, lhs, rhs)| Inst::Binary {
                    op,
                    result_type,
                    result,
                    lhs,
                    rhs,
                },
            )(input),
            None => fail(input),
        },
    }
}

/// Parse an instruction without a result id.
fn parse_plain_inst(input: &str) -> IResult<&str, Inst> {
    let (input, op) = opcode(input)?;

    match op {
        "OpName" => map(pair(operand(parse_id), operand(quoted)), |(target, name)| {
            Inst::Name { target, name }
        })(input),
        "OpMemberName" => map(
            tuple((operand(parse_id), operand(unsigned), operand(quoted))),
            |(ty, member, name)| Inst::MemberName { ty, member, name },
        )(input),
        "OpSDSLDecorateSemantic" => map(
            pair(operand(parse_id), operand(quoted)),
            |(target, semantic)| Inst::DecorateSemantic { target, semantic },
        )(input),
        "OpEntryPoint" => map(
            tuple((operand(execution_model), operand(parse_id), operand(quoted))),
            |(model, function, name)| Inst::EntryPoint {
                model,
                function,
                name,
            },
        )(input),
        "OpStore" => map(
            pair(operand(parse_id), operand(parse_id)),
            |(pointer, object)| Inst::Store { pointer, object },
        )(input),
        "OpReturnValue" => map(operand(parse_id), |value| Inst::ReturnValue { value })(input),
        "OpReturn" => Ok((input, Inst::Return)),
        "OpFunctionEnd" => Ok((input, Inst::FunctionEnd)),
        _ => fail(input),
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        format,
        string::{String, ToString},
        vec,
    };

    use super::*;
    use crate::{
        id::Id,
        inst::{ConstantValue, Dim, ExecutionModel, FunctionControl, StorageClass},
    };

    fn assert_parses_back(inst: Inst) {
        let text = format!("{}", inst);
        assert_eq!(parse_inst(&text), Ok(("", inst)), "text: {}", text);
    }

    #[test]
    fn test_parse_type_declarations() {
        assert_eq!(
            parse_inst("%1 = OpTypeVoid"),
            Ok(("", Inst::TypeVoid { result: Id::new(1) }))
        );
        assert_eq!(
            parse_inst("%2 = OpTypeInt 32 1"),
            Ok((
                "",
                Inst::TypeInt {
                    result: Id::new(2),
                    width: 32,
                    signed: true
                }
            ))
        );
        assert_eq!(
            parse_inst("%5 = OpTypeFunction %1"),
            Ok((
                "",
                Inst::TypeFunction {
                    result: Id::new(5),
                    return_type: Id::new(1),
                    params: vec![]
                }
            ))
        );
    }

    #[test]
    fn test_parse_stops_at_line_end() {
        let (rest, inst) = parse_inst("%4 = OpTypeStruct %2 %3\nOpReturn").unwrap();
        assert_eq!(rest, "\nOpReturn");
        assert_eq!(
            inst,
            Inst::TypeStruct {
                result: Id::new(4),
                members: vec![Id::new(2), Id::new(3)]
            }
        );
    }

    #[test]
    fn test_parse_plain_instructions() {
        assert_eq!(parse_inst("OpReturn"), Ok(("", Inst::Return)));
        assert_eq!(
            parse_inst("OpReturnValue %9"),
            Ok(("", Inst::ReturnValue { value: Id::new(9) }))
        );
        assert_eq!(
            parse_inst("OpSDSLDecorateSemantic %4 \"COLOR\""),
            Ok((
                "",
                Inst::DecorateSemantic {
                    target: Id::new(4),
                    semantic: "COLOR".to_string()
                }
            ))
        );
    }

    #[test]
    fn test_parse_unknown_opcode() {
        assert!(parse_inst("%1 = OpTypeSampledImage %2").is_err());
        assert!(parse_inst("OpNop").is_err());
    }

    #[test]
    fn test_display_parses_back() {
        assert_parses_back(Inst::TypeFloat {
            result: Id::new(2),
            width: 32,
        });
        assert_parses_back(Inst::TypeMatrix {
            result: Id::new(4),
            column: Id::new(3),
            count: 4,
        });
        assert_parses_back(Inst::TypeArray {
            result: Id::new(7),
            element: Id::new(2),
            length: Id::new(6),
        });
        assert_parses_back(Inst::TypePointer {
            result: Id::new(8),
            storage: StorageClass::Function,
            pointee: Id::new(2),
        });
        assert_parses_back(Inst::TypeImage {
            result: Id::new(9),
            sampled_type: Id::new(2),
            dim: Dim::Dim3D,
        });
        assert_parses_back(Inst::Constant {
            result_type: Id::new(2),
            result: Id::new(10),
            value: ConstantValue::float(0.5),
        });
        assert_parses_back(Inst::ConstantFalse {
            result_type: Id::new(11),
            result: Id::new(12),
        });
        assert_parses_back(Inst::Function {
            result_type: Id::new(1),
            result: Id::new(13),
            control: FunctionControl::None,
            function_type: Id::new(5),
        });
        assert_parses_back(Inst::Binary {
            op: BinaryOp::FAdd,
            result_type: Id::new(2),
            result: Id::new(14),
            lhs: Id::new(10),
            rhs: Id::new(10),
        });
        assert_parses_back(Inst::EntryPoint {
            model: ExecutionModel::Fragment,
            function: Id::new(13),
            name: "PSMain".to_string(),
        });
        assert_parses_back(Inst::MemberName {
            ty: Id::new(4),
            member: 1,
            name: "y".to_string(),
        });
        assert_parses_back(Inst::TypeSampler { result: Id::new(15) });
        assert_parses_back(Inst::Name {
            target: Id::new(4),
            name: "say \"hi\" \\ bye".to_string(),
        });
        assert_parses_back(Inst::DecorateSemantic {
            target: Id::new(4),
            semantic: String::new(),
        });
    }
}
