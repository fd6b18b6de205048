//! Errors raised while translating, and the exit codes they map to.
use std::fmt::{self, Display, Formatter};
use std::io;

use super::ast::LiteralType;
use super::opcode::{Opcode, OperandKind};

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 10;
pub const EXIT_INPUT: i32 = 11;
pub const EXIT_OUTPUT: i32 = 12;
pub const EXIT_HEADER: i32 = 21;
pub const EXIT_OPCODE: i32 = 22;
pub const EXIT_SYNTAX: i32 = 23;
pub const EXIT_INTERNAL: i32 = 99;

/// Why a single operand was rejected.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OperandError {
    Variable(String),
    Label(String),
    Literal { ty: LiteralType, value: String },
    TypeKeyword(String),
}

impl Display for OperandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use OperandError::*;
        match self {
            Variable(token)      => write!(f, "`{}` is not a variable", token),
            Label(token)         => write!(f, "`{}` is not a label", token),
            Literal { ty, value } => write!(f, "`{}` is not a valid {} literal", value, ty),
            TypeKeyword(token)   => write!(f, "`{}` is not one of int, bool, string, nil", token),
        }
    }
}

/// Lexical or syntactic problems within an instruction line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SyntaxError {
    Arity { opcode: Opcode, expected: usize, found: usize },
    Operand { position: usize, kind: OperandKind, cause: OperandError },
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::Arity { opcode, expected, found } => write!(
                f, "{} takes {} operand(s), found {}", opcode, expected, found
            ),
            SyntaxError::Operand { position, kind, cause } => write!(
                f, "operand {} should be a {}: {}", position, kind, cause
            ),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// `--help` combined with other arguments.
    Usage,
    /// The first non-blank line is not a lone `.IPPcode23`.
    Header { line: usize },
    /// The input ended before a header was seen.
    MissingHeader,
    UnknownOpcode { line: usize, mnemonic: String },
    Syntax { line: usize, cause: SyntaxError },
    Input(io::Error),
    Output(io::Error),
    Internal(String),
}

impl Error {
    /// The process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage                 => EXIT_USAGE,
            Error::Input(_)              => EXIT_INPUT,
            Error::Output(_)             => EXIT_OUTPUT,
            Error::Header { .. }         |
            Error::MissingHeader         => EXIT_HEADER,
            Error::UnknownOpcode { .. }  => EXIT_OPCODE,
            Error::Syntax { .. }         => EXIT_SYNTAX,
            Error::Internal(_)           => EXIT_INTERNAL,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage => write!(f, "--help cannot be combined with other arguments"),
            Error::Header { line } => write!(
                f, "line {}: expected the `.IPPcode23` header", line
            ),
            Error::MissingHeader => write!(f, "input ended without a `.IPPcode23` header"),
            Error::UnknownOpcode { line, mnemonic } => write!(
                f, "line {}: unknown instruction `{}`", line, mnemonic
            ),
            Error::Syntax { line, cause } => write!(f, "line {}: {}", line, cause),
            Error::Input(err) => write!(f, "unable to read input: {}", err),
            Error::Output(err) => write!(f, "unable to write output: {}", err),
            Error::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Input(err) | Error::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Internal(err.to_string())
    }
}
