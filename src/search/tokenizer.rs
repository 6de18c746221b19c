//! Free-text place query tokenizer
//!
//! Comma separation wins over space separation: "New York, NY" is a
//! two-token comma query, never a three-token space query.

/// A query split into tokens, tagged with the delimiter that split it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokens<'a> {
    /// Split on ", " or, failing that, on ","
    Comma(Vec<&'a str>),
    /// Split on single spaces; consecutive spaces yield empty tokens
    Space(Vec<&'a str>),
    /// No delimiter present
    Single(&'a str),
}

/// Split a query on the highest-priority delimiter it contains
pub fn tokenize(query: &str) -> Tokens<'_> {
    if query.contains(", ") {
        Tokens::Comma(query.split(", ").collect())
    } else if query.contains(',') {
        Tokens::Comma(query.split(',').collect())
    } else if query.contains(' ') {
        Tokens::Space(query.split(' ').collect())
    } else {
        Tokens::Single(query)
    }
}
