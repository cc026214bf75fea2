//! Byte-level input handling: buffering, terminator detection and
//! tokenization of a completed line.

pub mod buffer;
pub mod matcher;
pub mod tokenizer;
