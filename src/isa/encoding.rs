/*!
  Bit-level packing and carving of instruction words. This module is the single
  implementation of the word layout documented in `crate::isa`; the assembler
  backend and the machine both go through it, so the encode side and the decode
  side cannot drift apart.

  The packing functions are infallible: callers range-check operands first
  (the encoder does so against the constants below, naming the offending source
  line). A magnitude wider than its field would silently corrupt neighboring
  fields, never panic.
*/

use std::convert::TryFrom;

use string_cache::DefaultAtom;

use crate::isa::instruction::{Instruction, Target};
use crate::isa::opcode::{InstForm, InterruptKind, Opcode};
use crate::isa::register::Register;

// If you change this you must also change the pack/carve functions below.
pub type Word = u32;

/// Size of one instruction word in bytes, also the machine's address step.
pub const WORD_BYTES: u32 = 4;

// Field positions. The opcode occupies the top 6 bits of the word; the two
// register fields sit directly beneath it.
const OPCODE_SHIFT : u32 = 26;
const REG1_SHIFT   : u32 = 21;
const REG2_SHIFT   : u32 = 16;
const REG_MASK     : Word = 0x1F;

const IMM_SIGN  : Word = 1 << 20;
const IMM_MASK  : Word = 0x000F_FFFF;
const MEM_SIGN  : Word = 1 << 15;
const MEM_MASK  : Word = 0x0000_7FFF;
const JUMP_SIGN : Word = 1 << 25;
const JUMP_MASK : Word = 0x01FF_FFFF;
const MAIN_FLAG : Word = 1 << 25;

/// Largest magnitude an immediate may carry: 2^20 - 1.
pub const IMM_MAX: i32 = IMM_MASK as i32;
/// Largest magnitude a memory offset may carry: 2^15 - 1.
pub const MEM_OFFSET_MAX: i32 = MEM_MASK as i32;
/// Largest magnitude a branch offset may carry, in words: 2^15 - 1.
pub const BRANCH_OFFSET_MAX: i32 = MEM_MASK as i32;
/// Largest magnitude a label-jump offset may carry, in words: 2^25 - 1.
pub const JUMP_OFFSET_MAX: i32 = JUMP_MASK as i32;

/// The distinguished entry-point marker: a `label` word with the main flag
/// set. The loader repoints the program counter at it.
pub const ENTRY_WORD: Word = 0x8600_0000;
/// The `interrupt halt` word, the terminator every program should end with.
pub const HALT_WORD: Word = 0x8000_0000;

/**
  Every signed field is stored sign-magnitude: a dedicated sign bit and, when
  the value is negative, the two's-complement negation of the value truncated
  to the field width. This is not in-place two's complement, and decoding must
  re-negate rather than sign-extend.
*/
fn pack_signed(value: i32, sign: Word, mask: Word) -> Word {
  match value < 0 {
    true  => sign | (value.wrapping_neg() as Word & mask),
    false => value as Word & mask,
  }
}

fn carve_signed(word: Word, sign: Word, mask: Word) -> i32 {
  let magnitude = (word & mask) as i32;
  match word & sign != 0 {
    true  => -magnitude,
    false => magnitude,
  }
}

fn opcode_bits(opcode: Opcode) -> Word {
  (opcode.code() as Word) << OPCODE_SHIFT
}

// region Packing, one function per word layout

pub fn pack_register(opcode: Opcode, reg1: Register, reg2: Register) -> Word {
  opcode_bits(opcode)
    | ((reg1.code() as Word) << REG1_SHIFT)
    | ((reg2.code() as Word) << REG2_SHIFT)
}

pub fn pack_immediate(opcode: Opcode, reg: Register, imm: i32) -> Word {
  opcode_bits(opcode)
    | ((reg.code() as Word) << REG1_SHIFT)
    | pack_signed(imm, IMM_SIGN, IMM_MASK)
}

pub fn pack_memory(opcode: Opcode, reg: Register, mem_reg: Register, offset: i32) -> Word {
  opcode_bits(opcode)
    | ((reg.code() as Word) << REG1_SHIFT)
    | ((mem_reg.code() as Word) << REG2_SHIFT)
    | pack_signed(offset, MEM_SIGN, MEM_MASK)
}

pub fn pack_jump_register(opcode: Opcode, reg: Register) -> Word {
  opcode_bits(opcode) | ((reg.code() as Word) << REG1_SHIFT)
}

/// `offset` is in words, already scaled down by the encoder.
pub fn pack_jump_label(opcode: Opcode, offset: i32) -> Word {
  opcode_bits(opcode) | pack_signed(offset, JUMP_SIGN, JUMP_MASK)
}

pub fn pack_branch(opcode: Opcode, reg1: Register, reg2: Register, offset: i32) -> Word {
  opcode_bits(opcode)
    | ((reg1.code() as Word) << REG1_SHIFT)
    | ((reg2.code() as Word) << REG2_SHIFT)
    | pack_signed(offset, MEM_SIGN, MEM_MASK)
}

pub fn pack_interrupt(command: InterruptKind) -> Word {
  opcode_bits(Opcode::Interrupt) | ((Into::<u8>::into(command) as Word) << REG1_SHIFT)
}

pub fn pack_label(is_entry: bool) -> Word {
  match is_entry {
    true  => opcode_bits(Opcode::Label) | MAIN_FLAG,
    false => opcode_bits(Opcode::Label),
  }
}

// endregion

/**
  Every operand field of a word, carved unconditionally. Fields a given
  instruction form does not use carry meaningless bits, which is harmless:
  the executing machine only reads the fields its opcode's form defines.

  Register codes are left raw here. They are validated against the register
  table at the point of use, because validating eagerly would fault on words
  whose "register" bits are really offset bits.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodedFields {
  pub code         : u8,
  pub reg1         : u8,
  pub reg2         : u8,
  pub imm          : i32,
  pub small_offset : i32,
  pub large_offset : i32,
  pub command      : u8,
  pub main_flag    : bool,
}

pub fn carve(word: Word) -> DecodedFields {
  DecodedFields {
    code         : (word >> OPCODE_SHIFT) as u8,
    reg1         : ((word >> REG1_SHIFT) & REG_MASK) as u8,
    reg2         : ((word >> REG2_SHIFT) & REG_MASK) as u8,
    imm          : carve_signed(word, IMM_SIGN, IMM_MASK),
    small_offset : carve_signed(word, MEM_SIGN, MEM_MASK),
    large_offset : carve_signed(word, JUMP_SIGN, JUMP_MASK),
    command      : ((word >> REG1_SHIFT) & REG_MASK) as u8,
    main_flag    : word & MAIN_FLAG != 0,
  }
}

/**
  Decodes a word back into the tagged instruction it encodes, for disassembly
  and round-trip checking. Returns `None` for unassigned opcode, register, or
  command codes.

  Label names are not encoded, so a `label` word decodes to the name `main`
  when its entry flag is set and to the empty name otherwise.
*/
pub fn decode(word: Word) -> Option<Instruction> {
  let fields = carve(word);
  let opcode = Opcode::try_from(fields.code).ok()?;

  let instruction = match opcode.form() {

    InstForm::Register => Instruction::Register {
      opcode,
      reg1: Register::try_from(fields.reg1).ok()?,
      reg2: Register::try_from(fields.reg2).ok()?,
    },

    InstForm::Immediate => Instruction::Immediate {
      opcode,
      reg: Register::try_from(fields.reg1).ok()?,
      imm: fields.imm,
    },

    InstForm::Memory => Instruction::Memory {
      opcode,
      reg: Register::try_from(fields.reg1).ok()?,
      mem_reg: Register::try_from(fields.reg2).ok()?,
      offset: fields.small_offset,
    },

    InstForm::JumpRegister => Instruction::JumpRegister {
      opcode,
      reg: Register::try_from(fields.reg1).ok()?,
    },

    InstForm::JumpLabel => Instruction::JumpLabel {
      opcode,
      target: Target::Offset(fields.large_offset),
    },

    InstForm::Branch => Instruction::Branch {
      opcode,
      reg1: Register::try_from(fields.reg1).ok()?,
      reg2: Register::try_from(fields.reg2).ok()?,
      target: Target::Offset(fields.small_offset),
    },

    InstForm::Interrupt => Instruction::Interrupt {
      command: InterruptKind::try_from(fields.command).ok()?,
    },

    InstForm::Label => Instruction::Label {
      name: match fields.main_flag {
        true  => DefaultAtom::from("main"),
        false => DefaultAtom::from(""),
      },
    },

  };

  Some(instruction)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opcode_occupies_the_most_significant_byte() {
    let word = pack_register(Opcode::Mov, Register::RZero, Register::RZero);
    assert_eq!(word, 0x0000_0000);
    let word = pack_register(Opcode::Add, Register::R1, Register::R2);
    //          add=000001  r1=00001  r2=00010
    assert_eq!(word, 0x0422_0000);
  }

  #[test]
  fn sign_magnitude_law_on_hand_computed_words() {
    // movI r1, -5: opcode 12, reg 1, sign set, magnitude 5.
    let word = pack_immediate(Opcode::MovI, Register::R1, -5);
    assert_eq!(word, 0x3030_0005);
    // The positive twin differs only in the sign bit.
    let word = pack_immediate(Opcode::MovI, Register::R1, 5);
    assert_eq!(word, 0x3020_0005);

    // bEq r1, r2, -3 words: opcode 22, sign at bit 15.
    let word = pack_branch(Opcode::BEq, Register::R1, Register::R2, -3);
    assert_eq!(word, 0x5822_8003);

    // jmp -1 word: opcode 24, sign at bit 25.
    let word = pack_jump_label(Opcode::Jmp, -1);
    assert_eq!(word, 0x6200_0001);
  }

  #[test]
  fn negative_magnitudes_are_twos_complement_negations() {
    for &value in &[-1i32, -5, -0x7FFF, -IMM_MAX] {
      let word = pack_immediate(Opcode::AddI, Register::R3, value);
      assert_eq!(word & IMM_SIGN, IMM_SIGN);
      assert_eq!(word & IMM_MASK, (value.wrapping_neg() as Word) & IMM_MASK);
    }
  }

  #[test]
  fn reserved_words_match_their_raw_encodings() {
    assert_eq!(pack_label(true), ENTRY_WORD);
    assert_eq!(pack_label(false), 0x8400_0000);
    assert_eq!(pack_interrupt(InterruptKind::Halt), HALT_WORD);
  }

  #[test]
  fn register_form_round_trips() {
    for inst in [
      Instruction::Register { opcode: Opcode::Mov,  reg1: Register::RZero, reg2: Register::RPc },
      Instruction::Register { opcode: Opcode::Nor,  reg1: Register::R16,   reg2: Register::RHi },
      Instruction::Register { opcode: Opcode::Srav, reg1: Register::RLo,   reg2: Register::R1  },
    ].iter() {
      if let Instruction::Register { opcode, reg1, reg2 } = inst {
        let word = pack_register(*opcode, *reg1, *reg2);
        assert_eq!(decode(word), Some(inst.clone()));
      }
    }
  }

  #[test]
  fn immediate_form_round_trips_at_boundaries() {
    for &imm in &[0i32, 1, -1, IMM_MAX, -IMM_MAX, 42, -1000] {
      let word = pack_immediate(Opcode::XorI, Register::RFp, imm);
      let expected = Instruction::Immediate { opcode: Opcode::XorI, reg: Register::RFp, imm };
      assert_eq!(decode(word), Some(expected));
    }
  }

  #[test]
  fn memory_form_round_trips_at_boundaries() {
    for &offset in &[0i32, 1, -1, MEM_OFFSET_MAX, -MEM_OFFSET_MAX] {
      let word = pack_memory(Opcode::Lw, Register::R4, Register::RSp, offset);
      let expected = Instruction::Memory {
        opcode: Opcode::Lw,
        reg: Register::R4,
        mem_reg: Register::RSp,
        offset,
      };
      assert_eq!(decode(word), Some(expected));
    }
  }

  #[test]
  fn jump_forms_round_trip_at_boundaries() {
    for &offset in &[0i32, 1, -1, JUMP_OFFSET_MAX, -JUMP_OFFSET_MAX] {
      let word = pack_jump_label(Opcode::JmpL, offset);
      let expected = Instruction::JumpLabel {
        opcode: Opcode::JmpL,
        target: Target::Offset(offset),
      };
      assert_eq!(decode(word), Some(expected));
    }

    for &offset in &[0i32, 1, -1, BRANCH_OFFSET_MAX, -BRANCH_OFFSET_MAX] {
      let word = pack_branch(Opcode::BNe, Register::R7, Register::R8, offset);
      let expected = Instruction::Branch {
        opcode: Opcode::BNe,
        reg1: Register::R7,
        reg2: Register::R8,
        target: Target::Offset(offset),
      };
      assert_eq!(decode(word), Some(expected));
    }

    let word = pack_jump_register(Opcode::JmpReg, Register::RRet);
    let expected = Instruction::JumpRegister { opcode: Opcode::JmpReg, reg: Register::RRet };
    assert_eq!(decode(word), Some(expected));
  }

  #[test]
  fn interrupt_and_label_round_trip() {
    let expected = Instruction::Interrupt { command: InterruptKind::Halt };
    assert_eq!(decode(HALT_WORD), Some(expected));

    let expected = Instruction::Label { name: DefaultAtom::from("main") };
    assert_eq!(decode(ENTRY_WORD), Some(expected));
  }

  #[test]
  fn unassigned_codes_fail_to_decode() {
    assert_eq!(decode(0xFFFF_FFFF), None);       // opcode 63
    assert_eq!(decode(0x03E0_0000), None);       // mov with register code 31
  }

  #[test]
  fn unused_fields_are_harmless_to_carve() {
    // A large-offset jump whose offset bits overlap the register fields.
    let word = pack_jump_label(Opcode::Jmp, JUMP_OFFSET_MAX);
    let fields = carve(word);
    assert_eq!(fields.large_offset, JUMP_OFFSET_MAX);
    // The overlapping register field carries garbage, but carving it is fine.
    assert_eq!(fields.reg1, 0x0F);
  }
}
