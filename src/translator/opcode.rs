//! The opcode table: every IPPcode23 mnemonic together with
//! the ordered kinds of the operands it takes.
use std::fmt;

/// What an operand slot accepts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OperandKind {
    /// `FRAME@name`
    Var,
    Label,
    /// A typed literal or a variable.
    Symb,
    /// One of the bare type keywords `int`, `bool`, `string`, `nil`.
    Type,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OperandKind::Var   => "variable",
            OperandKind::Label => "label",
            OperandKind::Symb  => "symbol",
            OperandKind::Type  => "type",
        };
        write!(f, "{}", name)
    }
}

use OperandKind::*;

const SIG_NONE:            &[OperandKind] = &[];
const SIG_VAR:             &[OperandKind] = &[Var];
const SIG_LABEL:           &[OperandKind] = &[Label];
const SIG_SYMB:            &[OperandKind] = &[Symb];
const SIG_VAR_SYMB:        &[OperandKind] = &[Var, Symb];
const SIG_VAR_TYPE:        &[OperandKind] = &[Var, Type];
const SIG_VAR_SYMB_SYMB:   &[OperandKind] = &[Var, Symb, Symb];
const SIG_LABEL_SYMB_SYMB: &[OperandKind] = &[Label, Symb, Symb];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    RETURN,
    BREAK,

    DEFVAR,
    POPS,

    CALL,
    LABEL,
    JUMP,

    PUSHS,
    WRITE,
    EXIT,
    DPRINT,

    MOVE,
    INT2CHAR,
    STRLEN,
    TYPE,
    NOT,

    READ,

    ADD,
    SUB,
    MUL,
    IDIV,
    LT,
    GT,
    EQ,
    AND,
    OR,
    STRI2INT,
    CONCAT,
    GETCHAR,
    SETCHAR,

    JUMPIFEQ,
    JUMPIFNEQ,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Opcode {
    /// Looks up a mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        use Opcode::*;
        let op = match mnemonic.to_ascii_uppercase().as_str() {
            "CREATEFRAME" => CREATEFRAME,
            "PUSHFRAME"   => PUSHFRAME,
            "POPFRAME"    => POPFRAME,
            "RETURN"      => RETURN,
            "BREAK"       => BREAK,
            "DEFVAR"      => DEFVAR,
            "POPS"        => POPS,
            "CALL"        => CALL,
            "LABEL"       => LABEL,
            "JUMP"        => JUMP,
            "PUSHS"       => PUSHS,
            "WRITE"       => WRITE,
            "EXIT"        => EXIT,
            "DPRINT"      => DPRINT,
            "MOVE"        => MOVE,
            "INT2CHAR"    => INT2CHAR,
            "STRLEN"      => STRLEN,
            "TYPE"        => TYPE,
            "NOT"         => NOT,
            "READ"        => READ,
            "ADD"         => ADD,
            "SUB"         => SUB,
            "MUL"         => MUL,
            "IDIV"        => IDIV,
            "LT"          => LT,
            "GT"          => GT,
            "EQ"          => EQ,
            "AND"         => AND,
            "OR"          => OR,
            "STRI2INT"    => STRI2INT,
            "CONCAT"      => CONCAT,
            "GETCHAR"     => GETCHAR,
            "SETCHAR"     => SETCHAR,
            "JUMPIFEQ"    => JUMPIFEQ,
            "JUMPIFNEQ"   => JUMPIFNEQ,
            _ => return None,
        };
        Some(op)
    }

    /// The ordered operand kinds this opcode expects.
    pub fn signature(&self) -> &'static [OperandKind] {
        use Opcode::*;
        match self {
            CREATEFRAME | PUSHFRAME | POPFRAME |
            RETURN      | BREAK                  => SIG_NONE,

            DEFVAR | POPS                        => SIG_VAR,

            CALL | LABEL | JUMP                  => SIG_LABEL,

            PUSHS | WRITE | EXIT | DPRINT        => SIG_SYMB,

            MOVE | INT2CHAR | STRLEN |
            TYPE | NOT                           => SIG_VAR_SYMB,

            READ                                 => SIG_VAR_TYPE,

            ADD | SUB      | MUL    | IDIV    |
            LT  | GT       | EQ     | AND     |
            OR  | STRI2INT | CONCAT | GETCHAR |
            SETCHAR                              => SIG_VAR_SYMB_SYMB,

            JUMPIFEQ | JUMPIFNEQ                 => SIG_LABEL_SYMB_SYMB,
        }
    }

    /// Number of operands, not counting the mnemonic itself.
    #[inline]
    pub fn arity(&self) -> usize {
        self.signature().len()
    }
}
