//! Primitive parsers for ids, literals, strings and enum operands.

use alloc::string::String;

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, tag, take_while1},
    character::complete::{char, digit0, digit1, none_of, one_of, space1},
    combinator::{map, map_opt, map_res, opt, recognize, value},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::{
    id::Id,
    inst::{ConstantValue, Dim, ExecutionModel, FunctionControl, StorageClass},
};

/// Parse an id (%0, %1, etc.)
pub(crate) fn parse_id(input: &str) -> IResult<&str, Id> {
    map(
        map_res(preceded(char('%'), digit1), |s: &str| s.parse::<u32>()),
        Id::new,
    )(input)
}

/// Parse an unsigned literal
pub(crate) fn unsigned(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

/// Parse a quoted string literal; `\"` and `\\` are escapes
pub(crate) fn quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('"'),
            opt(escaped_transform(
                none_of("\\\""),
                '\\',
                alt((value("\\", char('\\')), value("\"", char('"')))),
            )),
            char('"'),
        ),
        Option::unwrap_or_default,
    )(input)
}

/// Parse a bare word (opcode suffixes and enum operands)
pub(crate) fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// Parse an opcode name (OpTypeFloat, OpReturn, etc.)
pub(crate) fn opcode(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("Op"), word))(input)
}

/// Parse a constant literal; a '.' or exponent marks a float
pub(crate) fn constant_value(input: &str) -> IResult<&str, ConstantValue> {
    map_opt(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit0)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| {
            if s.contains(['.', 'e', 'E']) {
                s.parse::<f64>().ok().map(ConstantValue::float)
            } else {
                s.parse::<i64>().ok().map(ConstantValue::Int)
            }
        },
    )(input)
}

pub(crate) fn storage_class(input: &str) -> IResult<&str, StorageClass> {
    map_opt(word, StorageClass::from_name)(input)
}

pub(crate) fn execution_model(input: &str) -> IResult<&str, ExecutionModel> {
    map_opt(word, ExecutionModel::from_name)(input)
}

pub(crate) fn dim(input: &str) -> IResult<&str, Dim> {
    map_opt(word, Dim::from_name)(input)
}

pub(crate) fn function_control(input: &str) -> IResult<&str, FunctionControl> {
    map_opt(word, FunctionControl::from_name)(input)
}

/// An operand on the same line, separated by spaces.
pub(crate) fn operand<'a, O, F>(parser: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    preceded(space1, parser)
}
