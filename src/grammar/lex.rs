//! Token level parsers: whitespace, names and escaped characters.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1, take_while_m_n},
    character::complete::char,
    combinator::{map_res, recognize},
    multi::many0,
    sequence::pair,
    IResult,
};

use super::error::SyntaxError;

/// Chars allowed in rule names.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Skip blanks and `#` comments. Line breaks are only skipped when
/// `newline_ok` is set.
pub fn space(input: &str, newline_ok: bool) -> &str {
    let blank = move |c: char| c == ' ' || c == '\t' || (newline_ok && (c == '\r' || c == '\n'));
    let skipped: IResult<&str, Vec<&str>> = many0(alt((
        take_while1(blank),
        recognize(pair(char('#'), take_while(|c: char| c != '\r' && c != '\n'))),
    )))(input);
    match skipped {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

/// A rule name.
pub fn name(input: &str) -> IResult<&str, &str> {
    take_while1(is_word_char)(input)
}

/// Fixed width hex number following `\x`, `\u` or `\U`.
fn hex(input: &str, digits: usize) -> IResult<&str, u32> {
    map_res(
        take_while_m_n(digits, digits, |c: char| c.is_ascii_hexdigit()),
        |s: &str| u32::from_str_radix(s, 16),
    )(input)
}

/// Decode one char of a literal or class, handling escapes. Returns the code
/// point and the remaining input.
pub fn decode_char(input: &str) -> Result<(&str, u32), SyntaxError> {
    let mut chars = input.chars();
    match chars.next() {
        None => Err(SyntaxError::UnexpectedEnd),
        Some('\\') => {
            let esc = chars.next().ok_or(SyntaxError::UnexpectedEnd)?;
            let rest = chars.as_str();
            let digits = match esc {
                'x' => 2,
                'u' => 4,
                'U' => 8,
                'n' => return Ok((rest, '\n' as u32)),
                'r' => return Ok((rest, '\r' as u32)),
                't' => return Ok((rest, '\t' as u32)),
                '\\' | '"' | '[' | ']' | '-' => return Ok((rest, esc as u32)),
                other => return Err(SyntaxError::UnknownEscape(other)),
            };
            let (rest, value) = hex(rest, digits).map_err(|_| SyntaxError::UnknownEscape(esc))?;
            match std::char::from_u32(value) {
                Some(_) => Ok((rest, value)),
                None => Err(SyntaxError::InvalidCodePoint(value)),
            }
        }
        Some(c) => Ok((chars.as_str(), c as u32)),
    }
}
