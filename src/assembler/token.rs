use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;

use crate::isa::{Opcode, Register};

/// One lexeme of assembly source, tagged with the 1-based line it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub line: u32,
}

/**
  The token classes the lexer produces. Identifier lexemes that exactly match
  a register or opcode mnemonic are resolved at lex time; everything else that
  looks like a word stays an `Identifier` (label names, interrupt commands).
*/
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
  Register(Register),
  Opcode(Opcode),
  Identifier(DefaultAtom),
  Integer(i64),
  Comma,
  Colon,
}

impl Display for TokenKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      TokenKind::Register(register) => write!(f, "{}", register),
      TokenKind::Opcode(opcode)     => write!(f, "{}", opcode),
      TokenKind::Identifier(name)   => write!(f, "{}", name),
      TokenKind::Integer(value)     => write!(f, "{}", value),
      TokenKind::Comma              => write!(f, ","),
      TokenKind::Colon              => write!(f, ":"),
    }
  }
}
