//! Parser for the instruction text format (SPIR-V disassembly style).

mod error;
mod instructions;
mod primitives;
mod whitespace;

use alloc::vec::Vec;

use nom::{
    bytes::complete::tag,
    character::complete::space0,
    multi::many0,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use error::parse_error;
pub use error::ParseError;
use instructions::parse_inst;
use primitives::unsigned;
use whitespace::blank;

use crate::{inst::Inst, module::Module};

/// Parse a sequence of instructions, one per line.
///
/// Blank lines and `;` comments are ignored.
pub fn parse_instructions(input: &str) -> Result<Vec<Inst>, ParseError> {
    let trimmed = input.trim();
    match instruction_list(trimmed) {
        Ok(("", instructions)) => Ok(instructions),
        Ok((remaining, instructions)) => {
            if remaining.trim().is_empty() {
                Ok(instructions)
            } else {
                Err(parse_error(
                    trimmed,
                    remaining,
                    alloc::format!("Unexpected input remaining: {}", remaining),
                ))
            }
        }
        Err(e) => Err(parse_error(
            trimmed,
            trimmed,
            alloc::format!("Parse error: {:?}", e),
        )),
    }
}

/// Parse a module: a `; Bound: N` header followed by instructions.
pub fn parse_module(input: &str) -> Result<Module, ParseError> {
    let trimmed = input.trim();
    match tuple((bound_header, instruction_list))(trimmed) {
        Ok((remaining, (bound, instructions))) => {
            if remaining.trim().is_empty() {
                Ok(Module::new(bound, instructions))
            } else {
                Err(parse_error(
                    trimmed,
                    remaining,
                    alloc::format!("Unexpected input remaining: {}", remaining),
                ))
            }
        }
        Err(e) => Err(parse_error(
            trimmed,
            trimmed,
            alloc::format!("Parse error: {:?}", e),
        )),
    }
}

fn bound_header(input: &str) -> IResult<&str, u32> {
    preceded(terminated(tag("; Bound:"), space0), unsigned)(input)
}

fn instruction_list(input: &str) -> IResult<&str, Vec<Inst>> {
    preceded(blank, many0(terminated(parse_inst, blank)))(input)
}
