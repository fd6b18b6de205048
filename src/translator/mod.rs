//! The Translator module is in charge of taking an
//! IPPcode23 source stream and producing its XML
//! representation.
//!
//! It does this with a line normalizer, a table-driven
//! instruction dispatcher, a set of operand classifiers
//! and a small document writer. Nothing is written until
//! the whole stream has been accepted.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod opcode;
pub mod operand;
pub mod parser;
pub mod xml;
