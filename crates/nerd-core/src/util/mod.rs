//! Utility modules for nerd-core.

pub mod matrix;
pub mod tokens;

pub use matrix::{Reshaped, StrideSchema, reshape};
pub use tokens::{
    block_between, blocks_between, delimited_spans, first_inline_value, labelled_values,
    tag_values, tokenize,
};
