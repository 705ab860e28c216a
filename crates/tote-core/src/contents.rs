//! # Cart Contents Codec
//!
//! Decodes the text stored in a cart row's `contents` column into product
//! ids, and encodes ids back into that text.
//!
//! ## Accepted Format
//! ```text
//! list := ws '[' ws ( int ( ws ',' ws int )* ( ws ',' )? )? ws ']' ws
//! int  := ('-' | '+')? digit+        (must fit in i64)
//!
//! "[1, 2, 3]"     → [1, 2, 3]
//! "[1,2,]"        → [1, 2]
//! " [ ] "         → []
//! "[1, 'a']"      → []   (whole row rejected)
//! "not a list"    → []
//! ""              → []
//! ```
//!
//! The grammar is a fixed nom combinator chain over integers and commas.
//! Nothing in the input is ever evaluated.

use nom::{
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair},
    IResult,
};
use tracing::debug;

/// Decodes a contents string into product ids.
///
/// Fail-soft: any syntax error yields an empty list, so one corrupted row
/// costs the reader that row's items and nothing else.
///
/// ## Example
/// ```rust
/// use tote_core::contents::parse_contents;
///
/// assert_eq!(parse_contents("[1, 2, 3]"), vec![1, 2, 3]);
/// assert_eq!(parse_contents("not a list"), Vec::<i64>::new());
/// assert_eq!(parse_contents(""), Vec::<i64>::new());
/// ```
pub fn parse_contents(text: &str) -> Vec<i64> {
    try_parse_contents(text).unwrap_or_default()
}

/// Strict form of [`parse_contents`]: `None` when the text does not decode.
///
/// Writers use this to tell an empty list apart from a corrupted one before
/// rewriting a row.
pub fn try_parse_contents(text: &str) -> Option<Vec<i64>> {
    match all_consuming(id_list)(text) {
        Ok((_, ids)) => Some(ids),
        Err(e) => {
            debug!(contents = %text, error = %e, "Discarding undecodable cart contents");
            None
        }
    }
}

/// Encodes product ids in the form [`parse_contents`] reads.
///
/// ## Example
/// ```rust
/// use tote_core::contents::format_contents;
///
/// assert_eq!(format_contents(&[1, 2, 3]), "[1, 2, 3]");
/// assert_eq!(format_contents(&[]), "[]");
/// ```
pub fn format_contents(ids: &[i64]) -> String {
    let items: Vec<String> = ids.iter().map(i64::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Wraps a parser so it eats whitespace on both sides.
fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

/// Comma-separated integers; a trailing comma is allowed after at least
/// one element.
fn items(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, ids) = separated_list0(char(','), ws(integer))(input)?;
    if ids.is_empty() {
        return Ok((input, ids));
    }
    let (input, _) = opt(char(','))(input)?;
    Ok((input, ids))
}

fn id_list(input: &str) -> IResult<&str, Vec<i64>> {
    delimited(ws(char('[')), items, ws(char(']')))(input)
}

// =============================================================================
// Unit Tests
// =============================================================================
