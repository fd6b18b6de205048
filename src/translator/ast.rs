//! This AST describes an accepted IPPcode23 program.
//!
//! A program starts with the `.IPPcode23` header and holds one
//! instruction per line. Comments start with `#` and run to the
//! end of the line.
//!
//! ```text
//! .IPPcode23
//! DEFVAR GF@counter          # variables live in GF, LF or TF
//! MOVE GF@counter int@0x1F   # ints may be decimal or hexadecimal
//! LABEL loop
//! WRITE string@a\032b        # \032 is an escaped space
//! JUMPIFNEQ loop GF@counter nil@nil
//! READ GF@line string        # READ takes a bare type keyword
//! ```
//!
//! Instructions are numbered by `order` starting at 1, in the
//! sequence they were accepted.

use std::fmt;

use super::opcode::Opcode;

/// Value of the root element's `language` attribute.
pub const LANGUAGE: &str = "IPPcode23";

/// The header mnemonic, uppercased.
pub const HEADER: &str = ".IPPCODE23";

/// Type tag of a literal, also used for `READ`'s type operand.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LiteralType {
    Int,
    Bool,
    String,
    Nil,
}

impl LiteralType {
    /// Recognizes a type tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<LiteralType> {
        match tag {
            "int"    => Some(LiteralType::Int),
            "bool"   => Some(LiteralType::Bool),
            "string" => Some(LiteralType::String),
            "nil"    => Some(LiteralType::Nil),
            _        => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LiteralType::Int    => "int",
            LiteralType::Bool   => "bool",
            LiteralType::String => "string",
            LiteralType::Nil    => "nil",
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated operand.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Argument {
    /// Full `FRAME@name` text.
    Var(String),
    Label(String),
    /// A typed literal; the text is the part after the `@`.
    Literal(LiteralType, String),
    /// `READ`'s bare type keyword.
    Type(LiteralType),
}

impl Argument {
    /// The `type` attribute this argument is written with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Argument::Var(_)         => "var",
            Argument::Label(_)       => "label",
            Argument::Literal(ty, _) => ty.as_str(),
            Argument::Type(_)        => "type",
        }
    }

    /// The element text this argument is written with.
    pub fn text(&self) -> &str {
        match self {
            Argument::Var(name)         => name,
            Argument::Label(name)       => name,
            Argument::Literal(_, value) => value,
            Argument::Type(ty)          => ty.as_str(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Argument::Literal(ty, value) => write!(f, "{}@{}", ty, value),
            _ => write!(f, "{}", self.text()),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub order: usize,
    pub opcode: Opcode,
    pub args: Vec<Argument>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for arg in self.args.iter() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The whole accepted program, in source order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Program { instructions: Vec::new() }
    }

    pub fn language(&self) -> &'static str {
        LANGUAGE
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
