/*!
  The three error families of the system. Encode-time errors abort the whole
  assembly with no partial output; load errors reject a malformed or oversized
  program file; runtime faults stop the machine with no recovery path. Every
  message names the offending source line (encode time) or the faulting
  program counter and raw instruction word (run time).
*/

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use crate::isa::Word;

/// Structural errors raised while turning source text into encoded words.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EncodeError {
  /// A numeric operand does not fit its field's representable range.
  OutOfRange {
    line  : u32,
    value : i64,
    min   : i64,
    max   : i64,
  },
  UnknownRegister {
    line : u32,
    name : String,
  },
  UnknownOpcode {
    line : u32,
    name : String,
  },
  UndefinedLabel {
    line : u32,
    name : String,
  },
  DuplicateLabel {
    line : u32,
    name : String,
  },
  /// A statement that does not fit any instruction form's grammar.
  Syntax {
    line    : u32,
    message : String,
  },
}

impl Error for EncodeError {}

impl Display for EncodeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      EncodeError::OutOfRange { line, value, min, max } => {
        write!(
          f,
          "Error on line {}: {} is outside the representable range [{}, {}].",
          line, value, min, max
        )
      }

      EncodeError::UnknownRegister { line, name } => {
        write!(f, "Error on line {}: {} is not a register.", line, name)
      }

      EncodeError::UnknownOpcode { line, name } => {
        write!(f, "Error on line {}: {} is not an instruction.", line, name)
      }

      EncodeError::UndefinedLabel { line, name } => {
        write!(f, "Error on line {}: the label {} is not defined anywhere.", line, name)
      }

      EncodeError::DuplicateLabel { line, name } => {
        write!(f, "Error on line {}: the label {} is already defined.", line, name)
      }

      EncodeError::Syntax { line, message } => {
        write!(f, "Error on line {}: {}.", line, message)
      }

    }
  }
}

/// Errors raised while reading an encoded program file into machine memory.
#[derive(Debug)]
pub enum LoadError {
  /// A line of the program file is not exactly eight hexadecimal digits.
  MalformedWord {
    line    : usize,
    content : String,
  },
  /// The program does not fit in machine memory at its base address.
  TooLarge {
    words    : usize,
    capacity : usize,
  },
  Io(io::Error),
}

impl Error for LoadError {}

impl Display for LoadError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      LoadError::MalformedWord { line, content } => {
        write!(
          f,
          "Malformed program file: line {} ({:?}) is not an 8-digit hexadecimal word.",
          line, content
        )
      }

      LoadError::TooLarge { words, capacity } => {
        write!(
          f,
          "The program's {} words do not fit in the {} bytes of memory past the base address.",
          words, capacity
        )
      }

      LoadError::Io(error) => {
        write!(f, "Could not read the program file: {}", error)
      }

    }
  }
}

impl From<io::Error> for LoadError {
  fn from(error: io::Error) -> Self {
    LoadError::Io(error)
  }
}

/// Fatal conditions hit by the executing machine. Every fault names the
/// program counter and the raw word that was executing when it was raised.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeFault {
  DivisionByZero {
    pc   : u32,
    word : Word,
  },
  OutOfBoundsAccess {
    pc      : u32,
    word    : Word,
    address : i64,
  },
  /// The program counter itself left memory, so there is no word to blame.
  OutOfBoundsFetch {
    pc: u32
  },
  UnrecognizedOpcode {
    pc   : u32,
    word : Word,
  },
  UnknownRegister {
    pc   : u32,
    word : Word,
    code : u8,
  },
}

impl Error for RuntimeFault {}

impl Display for RuntimeFault {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      RuntimeFault::DivisionByZero { pc, word } => {
        write!(f, "Division by zero at pc {:#010X} (instruction {:08X}).", pc, word)
      }

      RuntimeFault::OutOfBoundsAccess { pc, word, address } => {
        write!(
          f,
          "Out-of-bounds memory access of address {} at pc {:#010X} (instruction {:08X}).",
          address, pc, word
        )
      }

      RuntimeFault::OutOfBoundsFetch { pc } => {
        write!(f, "The program counter {:#010X} points outside of memory.", pc)
      }

      RuntimeFault::UnrecognizedOpcode { pc, word } => {
        write!(f, "Unrecognized opcode at pc {:#010X} (instruction {:08X}).", pc, word)
      }

      RuntimeFault::UnknownRegister { pc, word, code } => {
        write!(
          f,
          "Unassigned register code {} at pc {:#010X} (instruction {:08X}).",
          code, pc, word
        )
      }

    }
  }
}
