//! Free-text place search
//!
//! Queries are split into tokens, classified into one of a fixed set of
//! shapes, and each shape runs its own predicate against the places table.

pub mod dispatch;
pub mod tokenizer;

pub use dispatch::{search, SearchShape};
pub use tokenizer::{tokenize, Tokens};
