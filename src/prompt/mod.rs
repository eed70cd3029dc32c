//! Prompt construction: the option catalog and the composer.

pub mod catalog;
mod compose;

pub use catalog::{
    is_sentinel, sample_passage, StyleField, SAMPLE_PASSAGES, SENTINEL_DEFAULT,
    SENTINEL_NOT_CHOSEN,
};
pub use compose::{compose_prompt, StyleOptions};
