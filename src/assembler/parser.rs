/*!
  A recursive-descent parser over the token queue, producing one tagged
  instruction record per source statement. The statement forms are

    op reg, reg            register group
    op reg, int            immediate group
    op reg, reg, int       memory group
    op reg, reg, label     branches
    op label               label jumps
    op reg                 register jumps
    interrupt halt
    name:                  label declaration

  Opcode and register names were already resolved by the lexer, so an
  `Identifier` in operand position is either a label name or a mistake: an
  identifier where a register belongs becomes `UnknownRegister`, and an
  identifier in statement position not followed by `:` becomes
  `UnknownOpcode`. Field-width range checks happen later, in the encoder;
  the parser only rejects literals too wide for a 32 bit operand.
*/

use std::convert::TryFrom;
use std::str::FromStr;

use crate::errors::EncodeError;
use crate::isa::{InstForm, Instruction, InterruptKind, Opcode, Register, SourceInst, Target};
use super::token::{Token, TokenKind};

pub fn parse(tokens: Vec<Token>) -> Result<Vec<SourceInst>, EncodeError> {
  Parser::new(tokens).parse()
}

struct Parser {
  tokens : std::vec::IntoIter<Token>,
  line   : u32, // Line of the most recently consumed token
}

impl Parser {

  fn new(tokens: Vec<Token>) -> Parser {
    Parser {
      tokens: tokens.into_iter(),
      line: 1,
    }
  }

  fn parse(mut self) -> Result<Vec<SourceInst>, EncodeError> {
    let mut instructions: Vec<SourceInst> = Vec::new();

    while let Some(token) = self.next() {
      let line = token.line;
      let inst = match token.kind {

        TokenKind::Opcode(opcode) => self.statement(opcode, line)?,

        TokenKind::Identifier(name) => {
          match self.next().map(|t| t.kind) {
            Some(TokenKind::Colon) => Instruction::Label { name },
            _ => {
              return Err(EncodeError::UnknownOpcode { line, name: name.to_string() });
            }
          }
        }

        other => {
          return Err(EncodeError::Syntax {
            line,
            message: format!("a statement cannot begin with {}", other),
          });
        }

      };
      instructions.push(SourceInst { inst, line });
    }

    Ok(instructions)
  }

  fn statement(&mut self, opcode: Opcode, line: u32) -> Result<Instruction, EncodeError> {
    match opcode.form() {

      InstForm::Register => {
        let reg1 = self.register()?;
        self.comma()?;
        let reg2 = self.register()?;
        Ok(Instruction::Register { opcode, reg1, reg2 })
      }

      InstForm::Immediate => {
        let reg = self.register()?;
        self.comma()?;
        let imm = self.integer()?;
        Ok(Instruction::Immediate { opcode, reg, imm })
      }

      InstForm::Memory => {
        let reg = self.register()?;
        self.comma()?;
        let mem_reg = self.register()?;
        self.comma()?;
        let offset = self.integer()?;
        Ok(Instruction::Memory { opcode, reg, mem_reg, offset })
      }

      InstForm::Branch => {
        let reg1 = self.register()?;
        self.comma()?;
        let reg2 = self.register()?;
        self.comma()?;
        let target = Target::Label(self.label_name()?);
        Ok(Instruction::Branch { opcode, reg1, reg2, target })
      }

      InstForm::JumpLabel => {
        let target = Target::Label(self.label_name()?);
        Ok(Instruction::JumpLabel { opcode, target })
      }

      InstForm::JumpRegister => {
        let reg = self.register()?;
        Ok(Instruction::JumpRegister { opcode, reg })
      }

      InstForm::Interrupt => {
        let name = self.label_name()?;
        match InterruptKind::from_str(&name) {
          Ok(command) => Ok(Instruction::Interrupt { command }),
          Err(_) => Err(EncodeError::Syntax {
            line,
            message: format!("{} is not an interrupt command", name),
          }),
        }
      }

      // `label` exists as an opcode only so declarations have an encoding;
      // it is not writable as a mnemonic.
      InstForm::Label => Err(EncodeError::Syntax {
        line,
        message: "labels are declared as `name:`, not with the label mnemonic".to_string(),
      }),

    }
  }

  // region Token-level helpers

  fn next(&mut self) -> Option<Token> {
    let token = self.tokens.next();
    if let Some(ref token) = token {
      self.line = token.line;
    }
    token
  }

  fn unexpected_end(&self) -> EncodeError {
    EncodeError::Syntax {
      line: self.line,
      message: "the statement ends before all of its operands".to_string(),
    }
  }

  fn register(&mut self) -> Result<Register, EncodeError> {
    match self.next() {
      Some(Token { kind: TokenKind::Register(register), .. }) => Ok(register),
      Some(Token { kind: TokenKind::Identifier(name), line }) => {
        Err(EncodeError::UnknownRegister { line, name: name.to_string() })
      }
      Some(Token { kind, line }) => Err(EncodeError::Syntax {
        line,
        message: format!("expected a register, found {}", kind),
      }),
      None => Err(self.unexpected_end()),
    }
  }

  fn comma(&mut self) -> Result<(), EncodeError> {
    match self.next() {
      Some(Token { kind: TokenKind::Comma, .. }) => Ok(()),
      Some(Token { kind, line }) => Err(EncodeError::Syntax {
        line,
        message: format!("expected a comma, found {}", kind),
      }),
      None => Err(self.unexpected_end()),
    }
  }

  fn integer(&mut self) -> Result<i32, EncodeError> {
    match self.next() {
      Some(Token { kind: TokenKind::Integer(value), line }) => {
        i32::try_from(value).map_err(|_| EncodeError::OutOfRange {
          line,
          value,
          min: i32::min_value() as i64,
          max: i32::max_value() as i64,
        })
      }
      Some(Token { kind, line }) => Err(EncodeError::Syntax {
        line,
        message: format!("expected an integer, found {}", kind),
      }),
      None => Err(self.unexpected_end()),
    }
  }

  fn label_name(&mut self) -> Result<string_cache::DefaultAtom, EncodeError> {
    match self.next() {
      Some(Token { kind: TokenKind::Identifier(name), .. }) => Ok(name),
      Some(Token { kind, line }) => Err(EncodeError::Syntax {
        line,
        message: format!("expected a name, found {}", kind),
      }),
      None => Err(self.unexpected_end()),
    }
  }

  // endregion

}
