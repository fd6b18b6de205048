//! The Parser module takes normalized source lines from the Lexer
//! and builds a `Program` out of them.
use std::io::{BufRead, BufReader, Read};

use super::ast::*;
use super::error::{Error, SyntaxError};
use super::lexer::Lexer;
use super::opcode::Opcode;
use super::operand;

pub struct Parser {
    lexer: Lexer,
    header_seen: bool,
    next_order: usize,
    program: Program,
}

impl Parser {
    pub fn new() -> Result<Self, Error> {
        Ok(Parser {
            lexer: Lexer::new()?,
            header_seen: false,
            next_order: 1,
            program: Program::new(),
        })
    }

    /// Feeds one source line. `number` is 1-based and only used for
    /// error reporting.
    pub fn line(&mut self, number: usize, text: &str) -> Result<(), Error> {
        let words = self.lexer.tokenize_line(text);
        trace!("line {}: {:?}", number, words);

        // A blank line yields one empty word.
        if words[0].is_empty() {
            return Ok(());
        }

        if !self.header_seen {
            return self.header(number, &words);
        }

        let ins = self.instruction(number, &words)?;
        debug!("line {}: accepted #{} {}", number, ins.order, ins);
        self.program.instructions.push(ins);
        Ok(())
    }

    /// Consumes the parser, returning the finished program.
    pub fn finish(self) -> Result<Program, Error> {
        if !self.header_seen {
            return Err(Error::MissingHeader);
        }
        Ok(self.program)
    }

    fn header(&mut self, number: usize, words: &[String]) -> Result<(), Error> {
        if words.len() == 1 && words[0].to_ascii_uppercase() == HEADER {
            info!("line {}: found {} header", number, LANGUAGE);
            self.header_seen = true;
            Ok(())
        } else {
            Err(Error::Header { line: number })
        }
    }

    /// Validates one instruction line. The order counter only advances
    /// once every operand has been accepted.
    fn instruction(&mut self, number: usize, words: &[String]) -> Result<Instruction, Error> {
        let opcode = match Opcode::from_mnemonic(&words[0]) {
            Some(op) => op,
            None => return Err(Error::UnknownOpcode { line: number, mnemonic: words[0].clone() }),
        };

        let operands = &words[1..];
        if operands.len() != opcode.arity() {
            return Err(Error::Syntax {
                line: number,
                cause: SyntaxError::Arity {
                    opcode,
                    expected: opcode.arity(),
                    found: operands.len(),
                },
            });
        }

        let mut args = Vec::with_capacity(operands.len());
        for (idx, (kind, token)) in opcode.signature().iter().zip(operands).enumerate() {
            match operand::classify(*kind, token) {
                Ok(arg) => args.push(arg),
                Err(cause) => return Err(Error::Syntax {
                    line: number,
                    cause: SyntaxError::Operand { position: idx + 1, kind: *kind, cause },
                }),
            }
        }

        let order = self.next_order;
        self.next_order += 1;
        Ok(Instruction { order, opcode, args })
    }
}

/// Reads a whole program from `reader`, stopping at the first error.
pub fn parse<T: Read>(reader: T) -> Result<Program, Error> {
    let mut parser = Parser::new()?;

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(Error::Input)?;
        parser.line(index + 1, &line)?;
    }

    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::error::{OperandError, EXIT_HEADER, EXIT_OPCODE, EXIT_SYNTAX};
    use super::super::opcode::OperandKind;

    fn parse_str(src: &str) -> Result<Program, Error> {
        parse(src.as_bytes())
    }

    fn exit_code(src: &str) -> i32 {
        match parse_str(src) {
            Ok(_) => 0,
            Err(e) => e.exit_code(),
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(parse_str(".IPPcode23\n").unwrap(), Program::new());
        assert!(parse_str(".ippcode23").is_ok());
        assert!(parse_str("\n\n# leading comment\n  .IPPCODE23  # trailing\n").is_ok());

        assert_eq!(exit_code(""), EXIT_HEADER);
        assert_eq!(exit_code("# nothing but a comment\n"), EXIT_HEADER);
        assert_eq!(exit_code("MOVE GF@x GF@y\n"), EXIT_HEADER);
        assert_eq!(exit_code(".IPPcode22\n"), EXIT_HEADER);
        assert_eq!(exit_code(".IPPcode23 extra\n"), EXIT_HEADER);

        match parse_str("\n\nBREAK\n") {
            Err(Error::Header { line }) => assert_eq!(line, 3),
            other => panic!("expected a header error, got {:?}", other),
        }
    }

    #[test]
    fn test_second_header_is_unknown_opcode() {
        assert_eq!(exit_code(".IPPcode23\n.IPPcode23\n"), EXIT_OPCODE);
    }

    #[test]
    fn test_order_is_sequential() {
        let src = ".IPPcode23
            DEFVAR GF@a

            # comment lines do not consume an order
            MOVE GF@a int@1
            WRITE GF@a
            BREAK
        ";
        let program = parse_str(src).unwrap();
        let orders: Vec<usize> = program.instructions.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(program.instructions[1].opcode, Opcode::MOVE);
        assert_eq!(program.instructions[3].opcode, Opcode::BREAK);
        assert!(program.instructions[3].args.is_empty());
    }

    #[test]
    fn test_opcode_case_insensitive() {
        let upper = parse_str(".IPPcode23\nMOVE GF@x GF@y\n").unwrap();
        let lower = parse_str(".IPPcode23\nmove GF@x GF@y\n").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_comment_is_transparent() {
        let plain = parse_str(".IPPcode23\nMOVE GF@x GF@y\n").unwrap();
        let commented = parse_str(".IPPcode23\nMOVE GF@x GF@y # note\n").unwrap();
        assert_eq!(plain, commented);
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(exit_code(".IPPcode23\nFOOBAR\n"), EXIT_OPCODE);
        assert_eq!(exit_code(".IPPcode23\nFOOBAR GF@x\n"), EXIT_OPCODE);

        match parse_str(".IPPcode23\nBREAK\nfoobar\n") {
            Err(Error::UnknownOpcode { line, mnemonic }) => {
                assert_eq!(line, 3);
                assert_eq!(mnemonic, "foobar");
            },
            other => panic!("expected an unknown opcode error, got {:?}", other),
        }
    }

    #[test]
    fn test_arity() {
        assert_eq!(exit_code(".IPPcode23\nPUSHS\n"), EXIT_SYNTAX);
        assert_eq!(exit_code(".IPPcode23\nPUSHS int@1 int@2\n"), EXIT_SYNTAX);
        assert_eq!(exit_code(".IPPcode23\nPUSHS int@1\n"), 0);
        assert_eq!(exit_code(".IPPcode23\nBREAK now\n"), EXIT_SYNTAX);
        assert_eq!(exit_code(".IPPcode23\nADD GF@x int@1\n"), EXIT_SYNTAX);

        match parse_str(".IPPcode23\nMOVE GF@x\n") {
            Err(Error::Syntax { line, cause }) => {
                assert_eq!(line, 2);
                assert_eq!(cause, SyntaxError::Arity { opcode: Opcode::MOVE, expected: 2, found: 1 });
            },
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_operands() {
        let program = parse_str(".IPPcode23
            READ LF@in string
            JUMPIFEQ end GF@x nil@nil
        ").unwrap();
        assert_eq!(program.instructions[0].args, vec![
            Argument::Var("LF@in".to_string()),
            Argument::Type(LiteralType::String),
        ]);
        assert_eq!(program.instructions[1].args, vec![
            Argument::Label("end".to_string()),
            Argument::Var("GF@x".to_string()),
            Argument::Literal(LiteralType::Nil, "nil".to_string()),
        ]);

        assert_eq!(exit_code(".IPPcode23\nMOVE GF@x int@abc\n"), EXIT_SYNTAX);
        assert_eq!(exit_code(".IPPcode23\nMOVE int@1 GF@x\n"), EXIT_SYNTAX);
        assert_eq!(exit_code(".IPPcode23\nREAD GF@x float\n"), EXIT_SYNTAX);
        assert_eq!(exit_code(".IPPcode23\nCALL GF@x\n"), EXIT_SYNTAX);

        match parse_str(".IPPcode23\nSUB GF@x GF@y bool@yes\n") {
            Err(Error::Syntax { cause, .. }) => assert_eq!(cause, SyntaxError::Operand {
                position: 3,
                kind: OperandKind::Symb,
                cause: OperandError::Literal { ty: LiteralType::Bool, value: "yes".to_string() },
            }),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_first_error_stops_parsing() {
        // The unknown opcode on line 3 is never reached.
        match parse_str(".IPPcode23\nMOVE GF@x int@\nFOOBAR\n") {
            Err(Error::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejected_line_consumes_no_order() {
        let mut parser = Parser::new().unwrap();
        parser.line(1, ".IPPcode23").unwrap();
        parser.line(2, "BREAK").unwrap();
        assert!(parser.line(3, "PUSHS").is_err());
        parser.line(4, "RETURN").unwrap();

        let program = parser.finish().unwrap();
        assert_eq!(program.instructions[1].order, 2);
    }
}
