/*!
  The assembler: source text in, encoded program out.

  The pipeline is
  ```text
  text -> [lexer::lex] -> tokens -> [parser::parse] -> instructions
       -> [encoder::encode] -> words -> [render_program] -> hex lines
  ```
  Any error anywhere aborts the whole assembly; no partial program is ever
  rendered, because a truncated binary is worse than no binary.
*/

pub mod encoder;
pub mod labels;
pub mod lexer;
pub mod parser;
pub mod token;

use crate::errors::EncodeError;
use crate::isa::Word;

pub use encoder::{encode, ENTRY_LABEL};

pub fn assemble(text: &str, base_address: u32) -> Result<Vec<Word>, EncodeError> {
  let tokens = lexer::lex(text)?;
  let instructions = parser::parse(tokens)?;
  encoder::encode(&instructions, base_address)
}

/// Renders words in the persisted program format: one 8-digit uppercase
/// hexadecimal word per line, newline terminated, in address order.
pub fn render_program(words: &[Word]) -> String {
  let mut rendered = String::with_capacity(words.len() * 9);
  for word in words {
    rendered.push_str(&format!("{:08X}\n", word));
  }
  rendered
}
