//! Operand classifiers.
//!
//! Each classifier walks the characters of a single word and either
//! returns the `Argument` it denotes or an `OperandError` describing
//! why it was rejected.
use super::ast::{Argument, LiteralType};
use super::error::OperandError;
use super::opcode::OperandKind;

const FRAMES: [&str; 3] = ["GF@", "LF@", "TF@"];

/// Characters allowed anywhere in an identifier besides letters and digits.
const SPECIAL: &[char] = &['_', '-', '$', '&', '%', '*', '!', '?'];

/// Classifies `token` according to the operand slot `kind`.
pub fn classify(kind: OperandKind, token: &str) -> Result<Argument, OperandError> {
    match kind {
        OperandKind::Var   => variable(token),
        OperandKind::Label => label(token),
        OperandKind::Symb  => symbol(token),
        OperandKind::Type  => type_keyword(token),
    }
}

/// `GF@name`, `LF@name` or `TF@name`.
pub fn variable(token: &str) -> Result<Argument, OperandError> {
    let name = FRAMES
        .iter()
        .find_map(|frame| token.strip_prefix(*frame));

    match name {
        Some(name) if is_identifier(name) => Ok(Argument::Var(token.to_owned())),
        _ => Err(OperandError::Variable(token.to_owned())),
    }
}

/// A label name.
///
/// Accepts a full identifier starting with a letter, and also any word
/// whose trailing run of identifier characters contains a special
/// character, e.g. `1a_b`. The leading part of such a word is never
/// checked.
pub fn label(token: &str) -> Result<Argument, OperandError> {
    let tail: Vec<char> = token
        .chars()
        .rev()
        .take_while(|c| is_identifier_char(*c))
        .collect();
    let whole = tail.len() == token.chars().count();

    let starts_with_letter = token.starts_with(|c: char| c.is_ascii_alphabetic());
    let special_tail = tail.iter().any(|c| SPECIAL.contains(c));

    if (whole && starts_with_letter) || special_tail {
        Ok(Argument::Label(token.to_owned()))
    } else {
        Err(OperandError::Label(token.to_owned()))
    }
}

/// A typed literal (`int@5`, `string@abc`, ...) or a variable.
pub fn symbol(token: &str) -> Result<Argument, OperandError> {
    if let Some((tag, value)) = token.split_once('@') {
        if !value.contains('@') {
            if let Some(ty) = LiteralType::from_tag(tag) {
                return literal(ty, value);
            }
        }
    }
    variable(token)
}

/// `READ`'s type operand: exactly one of the type keywords.
pub fn type_keyword(token: &str) -> Result<Argument, OperandError> {
    match LiteralType::from_tag(token) {
        Some(ty) => Ok(Argument::Type(ty)),
        None => Err(OperandError::TypeKeyword(token.to_owned())),
    }
}

fn literal(ty: LiteralType, value: &str) -> Result<Argument, OperandError> {
    let valid = match ty {
        LiteralType::Nil    => value == "nil" || value.is_empty(),
        LiteralType::Bool   => value == "true" || value == "false" || value.is_empty(),
        LiteralType::Int    => is_int(value),
        LiteralType::String => is_string(value),
    };

    if valid {
        Ok(Argument::Literal(ty, value.to_owned()))
    } else {
        Err(OperandError::Literal { ty, value: value.to_owned() })
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || SPECIAL.contains(&c)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || SPECIAL.contains(&c)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => chars.all(is_identifier_char),
        _ => false,
    }
}

/// Optionally signed decimal, `0x` hexadecimal, or the `0o` form.
fn is_int(value: &str) -> bool {
    let digits = value
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(value);

    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return true;
        }
    }

    if let Some(oct) = digits.strip_prefix("0o").or_else(|| digits.strip_prefix("0O")) {
        if is_octal_body(oct) {
            return true;
        }
    }

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// The octal branch only ever accepted the literal text `0-7` followed
// by one or more `]`; plain octal digits such as `0o17` are rejected.
// See DESIGN.md before changing this.
fn is_octal_body(oct: &str) -> bool {
    match oct.strip_prefix("0-7") {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c == ']'),
        None => false,
    }
}

/// No backslash, `#` or whitespace, except `\` followed by three digits.
fn is_string(value: &str) -> bool {
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                for _ in 0..3 {
                    match chars.next() {
                        Some(d) if d.is_ascii_digit() => {},
                        _ => return false,
                    }
                }
            },
            '#' | ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' => return false,
            _ => {},
        }
    }
    true
}
