use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;

use crate::isa::opcode::{InterruptKind, Opcode};
use crate::isa::register::Register;

/**
  The destination of a branch or jump. Parsers produce `Label`; the encoder
  resolves it to a word-granular `Offset` relative to the referencing
  instruction. The decoder can only ever produce `Offset`, as label names are
  not part of the binary encoding.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Target {
  Label(DefaultAtom),
  Offset(i32),
}

impl Display for Target {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Target::Label(name)    => write!(f, "{}", name),
      Target::Offset(words)  => write!(f, "{:+}", words),
    }
  }
}

/// Holds the unencoded components of an instruction. As such, it enumerates
/// the possible instruction argument combinations, one variant per word layout.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [opcode:6][reg1:5][reg2:5][unused:16]
  Register {
    opcode : Opcode,
    reg1   : Register,
    reg2   : Register,
  },
  /// [opcode:6][reg:5][sign:1][imm:20]
  Immediate {
    opcode : Opcode,
    reg    : Register,
    imm    : i32,
  },
  /// [opcode:6][reg:5][memReg:5][sign:1][offset:15]
  Memory {
    opcode  : Opcode,
    reg     : Register,
    mem_reg : Register,
    offset  : i32,
  },
  /// [opcode:6][reg:5][unused:21]
  JumpRegister {
    opcode : Opcode,
    reg    : Register,
  },
  /// [opcode:6][sign:1][offset:25]
  JumpLabel {
    opcode : Opcode,
    target : Target,
  },
  /// [opcode:6][reg1:5][reg2:5][sign:1][offset:15]
  Branch {
    opcode : Opcode,
    reg1   : Register,
    reg2   : Register,
    target : Target,
  },
  /// [opcode:6][command:5][unused:21]
  Interrupt {
    command: InterruptKind
  },
  /// [opcode:6][mainFlag:1][unused:25]
  ///
  /// A zero-width marker: it defines a symbol but occupies one word like any
  /// other instruction, so the i-th instruction always lives at `base + i*4`.
  Label {
    name: DefaultAtom
  },
}

/// An instruction paired with the 1-based source line it came from, the record
/// the front end hands to the encoder so errors can name the offending line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceInst {
  pub inst: Instruction,
  pub line: u32,
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instruction::Register { opcode, reg1, reg2 } => {
        write!(f, "{} {}, {}", opcode, reg1, reg2)
      }

      Instruction::Immediate { opcode, reg, imm } => {
        write!(f, "{} {}, {}", opcode, reg, imm)
      }

      Instruction::Memory { opcode, reg, mem_reg, offset } => {
        write!(f, "{} {}, {}, {}", opcode, reg, mem_reg, offset)
      }

      Instruction::JumpRegister { opcode, reg } => {
        write!(f, "{} {}", opcode, reg)
      }

      Instruction::JumpLabel { opcode, target } => {
        write!(f, "{} {}", opcode, target)
      }

      Instruction::Branch { opcode, reg1, reg2, target } => {
        write!(f, "{} {}, {}, {}", opcode, reg1, reg2, target)
      }

      Instruction::Interrupt { command } => {
        write!(f, "interrupt {}", command)
      }

      Instruction::Label { name } => {
        write!(f, "{}:", name)
      }

    }
  }
}
