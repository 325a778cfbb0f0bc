/*!
  The assembler backend: a two-pass pipeline from tagged instructions to
  encoded words.

  Pass 1 walks the instruction list in order and records
  `base_address + index * 4` for every label declaration; because every
  instruction occupies exactly one word, the address of the i-th instruction
  is positional and forward references cost nothing.

  Pass 2 dispatches on each instruction's form to produce one word. Label
  targets resolve to `(target_address - instruction_address) >> 2`, a
  word-granular relative offset, which is range-checked against the form's
  field width and sign-encoded. Output order is preserved: reordering
  instructions changes all subsequent addresses.
*/

use string_cache::DefaultAtom;

use crate::errors::EncodeError;
use crate::isa::encoding::{
  self,
  BRANCH_OFFSET_MAX, IMM_MAX, JUMP_OFFSET_MAX, MEM_OFFSET_MAX,
};
use crate::isa::{Instruction, SourceInst, Target, Word, WORD_BYTES};
use super::labels::LabelTable;

/// Programs begin executing at the label with this name, when one exists.
pub const ENTRY_LABEL: &str = "main";

pub fn encode(instructions: &[SourceInst], base_address: u32) -> Result<Vec<Word>, EncodeError> {
  let labels = assign_addresses(instructions, base_address)?;

  let mut words: Vec<Word> = Vec::with_capacity(instructions.len());
  for (index, source) in instructions.iter().enumerate() {
    let address = base_address + (index as u32) * WORD_BYTES;
    words.push(encode_one(source, address, &labels)?);
  }
  Ok(words)
}

/// The address-assignment pass. Built completely before any offset is
/// computed, so a branch may reference a label declared after it.
fn assign_addresses(
  instructions: &[SourceInst],
  base_address: u32,
) -> Result<LabelTable, EncodeError> {
  let mut labels = LabelTable::new();

  for (index, source) in instructions.iter().enumerate() {
    if let Instruction::Label { name } = &source.inst {
      let address = base_address + (index as u32) * WORD_BYTES;
      labels
        .insert(name.clone(), address)
        .map_err(|_| EncodeError::DuplicateLabel {
          line: source.line,
          name: name.to_string(),
        })?;
    }
  }

  Ok(labels)
}

fn encode_one(
  source: &SourceInst,
  address: u32,
  labels: &LabelTable,
) -> Result<Word, EncodeError> {
  let line = source.line;
  match &source.inst {

    Instruction::Register { opcode, reg1, reg2 } => {
      Ok(encoding::pack_register(*opcode, *reg1, *reg2))
    }

    Instruction::Immediate { opcode, reg, imm } => {
      check_range(*imm, IMM_MAX, line)?;
      Ok(encoding::pack_immediate(*opcode, *reg, *imm))
    }

    Instruction::Memory { opcode, reg, mem_reg, offset } => {
      check_range(*offset, MEM_OFFSET_MAX, line)?;
      Ok(encoding::pack_memory(*opcode, *reg, *mem_reg, *offset))
    }

    Instruction::JumpRegister { opcode, reg } => {
      Ok(encoding::pack_jump_register(*opcode, *reg))
    }

    Instruction::JumpLabel { opcode, target } => {
      let offset = resolve(target, address, labels, JUMP_OFFSET_MAX, line)?;
      Ok(encoding::pack_jump_label(*opcode, offset))
    }

    Instruction::Branch { opcode, reg1, reg2, target } => {
      let offset = resolve(target, address, labels, BRANCH_OFFSET_MAX, line)?;
      Ok(encoding::pack_branch(*opcode, *reg1, *reg2, offset))
    }

    Instruction::Interrupt { command } => {
      Ok(encoding::pack_interrupt(*command))
    }

    Instruction::Label { name } => {
      Ok(encoding::pack_label(is_entry(name)))
    }

  }
}

fn is_entry(name: &DefaultAtom) -> bool {
  &**name == ENTRY_LABEL
}

/// Turns a target into a word-granular offset relative to the referencing
/// instruction. Both addresses are word aligned, so the shift loses nothing.
fn resolve(
  target: &Target,
  address: u32,
  labels: &LabelTable,
  max: i32,
  line: u32,
) -> Result<i32, EncodeError> {
  let words = match target {

    Target::Offset(words) => *words,

    Target::Label(name) => {
      let target_address =
        labels
          .address_of(name)
          .ok_or_else(|| EncodeError::UndefinedLabel {
            line,
            name: name.to_string(),
          })?;
      ((target_address as i64 - address as i64) >> 2) as i32
    }

  };

  check_range(words, max, line)?;
  Ok(words)
}

fn check_range(value: i32, max: i32, line: u32) -> Result<(), EncodeError> {
  match value < -max || value > max {
    true => Err(EncodeError::OutOfRange {
      line,
      value: value as i64,
      min: -max as i64,
      max: max as i64,
    }),
    false => Ok(()),
  }
}
