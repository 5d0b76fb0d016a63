//! Whitespace and comment parsing.

use nom::{
    branch::alt,
    character::complete::{char, multispace1, not_line_ending},
    combinator::map,
    multi::many0,
    sequence::pair,
    IResult,
};

/// Skip whitespace (including newlines) and `;` line comments.
pub(crate) fn blank(input: &str) -> IResult<&str, ()> {
    map(
        many0(alt((
            map(multispace1, |_| ()),
            map(pair(char(';'), not_line_ending), |_| ()),
        ))),
        |_| (),
    )(input)
}
