/*!
  A longest-match scanner for assembly source. The lexeme classes are
  identifiers (`[a-zA-Z][a-zA-Z0-9_]*`), optionally signed integers, the one
  symbol tokens `,` and `:`, and whitespace. Newlines advance the line counter
  carried on every token, and `#` starts a comment running to end of line.
*/

use std::str::FromStr;

use string_cache::DefaultAtom;
use nom::{
  IResult,
  bytes::complete::{is_not, take_while},
  character::complete::{alpha1, char as one_char, digit1},
  combinator::{opt, recognize},
  sequence::pair,
};

use crate::errors::EncodeError;
use crate::isa::{Opcode, Register};
use super::token::{Token, TokenKind};

fn identifier(input: &str) -> IResult<&str, &str> {
  recognize(pair(
    alpha1,
    take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
  ))(input)
}

fn integer(input: &str) -> IResult<&str, &str> {
  recognize(pair(opt(one_char('-')), digit1))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
  recognize(pair(one_char('#'), opt(is_not("\n"))))(input)
}

/// Registers and opcodes are resolved to dedicated tokens here, so the parser
/// never sees their names as plain identifiers.
fn resolve_word(lexeme: &str) -> TokenKind {
  if let Ok(register) = Register::from_str(lexeme) {
    return TokenKind::Register(register);
  }
  if let Ok(opcode) = Opcode::from_str(lexeme) {
    return TokenKind::Opcode(opcode);
  }
  TokenKind::Identifier(DefaultAtom::from(lexeme))
}

pub fn lex(text: &str) -> Result<Vec<Token>, EncodeError> {
  let mut tokens: Vec<Token> = Vec::new();
  let mut line: u32 = 1;
  let mut rest = text;

  while let Some(c) = rest.chars().next() {

    if c == '\n' {
      line += 1;
      rest = &rest[1..];
      continue;
    }

    if c == ' ' || c == '\t' || c == '\r' {
      rest = &rest[1..];
      continue;
    }

    if c == '#' {
      // Cannot fail: the '#' is already known to be there.
      if let Ok((remainder, _)) = comment(rest) {
        rest = remainder;
      }
      continue;
    }

    if c == ',' {
      tokens.push(Token { kind: TokenKind::Comma, line });
      rest = &rest[1..];
      continue;
    }

    if c == ':' {
      tokens.push(Token { kind: TokenKind::Colon, line });
      rest = &rest[1..];
      continue;
    }

    if let Ok((remainder, lexeme)) = integer(rest) {
      let value = lexeme.parse::<i64>().map_err(|_| EncodeError::Syntax {
        line,
        message: format!("the integer literal {} does not fit in 64 bits", lexeme),
      })?;
      tokens.push(Token { kind: TokenKind::Integer(value), line });
      rest = remainder;
      continue;
    }

    if let Ok((remainder, lexeme)) = identifier(rest) {
      tokens.push(Token { kind: resolve_word(lexeme), line });
      rest = remainder;
      continue;
    }

    return Err(EncodeError::Syntax {
      line,
      message: format!("{:?} is not a recognizable lexeme", c),
    });
  }

  Ok(tokens)
}
