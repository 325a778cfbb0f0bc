/*!
  The executing machine: a flat byte-addressable memory, the 23 register
  file, and a fetch-decode-execute loop.

  The loader copies each program word into memory least significant byte
  first and repoints the program counter at the entry marker (a `label` word
  with the main flag set) when one is present; otherwise execution begins at
  the base address.

  Each step fetches the word at the program counter, carves every operand
  field unconditionally, dispatches on the opcode, and then either advances
  the counter by one word or, for taken branches and jumps, redirects it.
  Branch and jump offsets are stored word-granular and are scaled back to
  bytes here, undoing the encoder's `>> 2`; a taken branch therefore lands
  exactly on its label. Halting is a state transition performed by the
  `interrupt halt` instruction itself, not a raw-byte comparison in the loop,
  so the fetch that reaches the halt word is counted like any other cycle.

  All register arithmetic is wrapping 32 bit. Division by zero, leaving
  memory, and unassigned opcode or register codes are fatal: the machine
  stops with a fault naming the program counter and the raw word, and there
  is no instruction-level recovery.
*/

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use prettytable::{format as TableFormat, Table};
use strum::IntoEnumIterator;
use strum_macros::Display as StrumDisplay;

use crate::errors::{LoadError, RuntimeFault};
use crate::isa::encoding::{self, DecodedFields};
use crate::isa::{InterruptKind, Opcode, Register, Word, REGISTER_COUNT, WORD_BYTES};

/// Bytes of RAM in every machine.
pub const MEMORY_SIZE: usize = 0xFF_FFFF;

#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum ProgramState {
  Running,
  Halted,
}

/// Parses the persisted program format: one 8-digit hexadecimal word per
/// line, in address order. Anything else on a line is malformed.
pub fn parse_program(text: &str) -> Result<Vec<Word>, LoadError> {
  let mut words: Vec<Word> = Vec::new();

  for (index, line) in text.lines().enumerate() {
    let malformed = || LoadError::MalformedWord {
      line: index + 1,
      content: line.to_string(),
    };
    if line.len() != 8 || !line.bytes().all(|b| b.is_ascii_hexdigit()) {
      return Err(malformed());
    }
    words.push(Word::from_str_radix(line, 16).map_err(|_| malformed())?);
  }

  Ok(words)
}

pub struct Machine {

  // Memory stores //
  ram: Vec<u8>,

  // Registers //
  registers : [i32; REGISTER_COUNT],
  pc        : u32,

  state        : ProgramState,
  cycles       : u64,
  base_address : u32,

  // External stop signal, checked once per step.
  stop_requested: Arc<AtomicBool>,

}

impl Machine {

  // region Construction and loading

  pub fn new(base_address: u32) -> Machine {
    Machine {
      ram            : vec![0; MEMORY_SIZE],
      registers      : [0; REGISTER_COUNT],
      pc             : base_address,
      state          : ProgramState::Running,
      cycles         : 0,
      base_address,
      stop_requested : Arc::new(AtomicBool::new(false)),
    }
  }

  /**
    Copies each word's four bytes into RAM, least significant byte first,
    starting at the base address. While copying, scans the decoded fields of
    every word for the entry marker and repoints the program counter at it.
  */
  pub fn load_words(&mut self, words: &[Word]) -> Result<(), LoadError> {
    let capacity = self.ram.len().saturating_sub(self.base_address as usize);
    if words.len() * WORD_BYTES as usize > capacity {
      return Err(LoadError::TooLarge { words: words.len(), capacity });
    }

    for (index, &word) in words.iter().enumerate() {
      let address = self.base_address as usize + index * WORD_BYTES as usize;
      self.ram[address..address + 4].copy_from_slice(&word.to_le_bytes());

      let fields = encoding::carve(word);
      if fields.code == Opcode::Label.code() && fields.main_flag {
        self.pc = address as u32;
      }
    }

    Ok(())
  }

  /// Reads and loads a persisted program file.
  pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
    let text = fs::read_to_string(path)?;
    let words = parse_program(&text)?;
    self.load_words(&words)
  }

  // endregion

  // region Observers

  pub fn pc(&self) -> u32 {
    self.pc
  }

  pub fn state(&self) -> ProgramState {
    self.state
  }

  /// Number of fetch cycles performed so far.
  pub fn cycles(&self) -> u64 {
    self.cycles
  }

  pub fn register(&self, register: Register) -> i32 {
    self.read_register(register)
  }

  /// For embedding harnesses that need to seed machine state before a run.
  /// Writes to `rZERO` are discarded, as everywhere else.
  pub fn set_register(&mut self, register: Register, value: i32) {
    self.write_register(register, value);
  }

  /**
    A handle an embedding caller may set from outside to stop the run loop.
    The flag is checked once per step; the machine stays `Running`, so the
    caller can resume with another `run` call.
  */
  pub fn stop_handle(&self) -> Arc<AtomicBool> {
    self.stop_requested.clone()
  }

  // endregion

  // region Register and memory access

  /// `rZERO` reads as zero no matter what was written to it.
  fn read_register(&self, register: Register) -> i32 {
    match register {
      Register::RZero => 0,
      _ => self.registers[register.code() as usize],
    }
  }

  fn write_register(&mut self, register: Register, value: i32) {
    if register != Register::RZero {
      self.registers[register.code() as usize] = value;
    }
  }

  /// Register codes come out of a 5 bit field and may name one of the
  /// unassigned codes 23–31, which is a fault at the point of use.
  fn register_operand(&self, code: u8, word: Word) -> Result<Register, RuntimeFault> {
    Register::try_from(code).map_err(|_| RuntimeFault::UnknownRegister {
      pc: self.pc,
      word,
      code,
    })
  }

  fn fetch(&self) -> Result<Word, RuntimeFault> {
    let address = self.pc as usize;
    if address + 4 > self.ram.len() {
      return Err(RuntimeFault::OutOfBoundsFetch { pc: self.pc });
    }
    Ok(Word::from_le_bytes([
      self.ram[address],
      self.ram[address + 1],
      self.ram[address + 2],
      self.ram[address + 3],
    ]))
  }

  /// Effective address of a load or store: base register plus offset. The
  /// whole `span` must lie inside RAM; negative addresses are out of bounds.
  fn data_address(&self, base: Register, offset: i32, span: usize, word: Word)
    -> Result<usize, RuntimeFault>
  {
    let address = self.read_register(base) as i64 + offset as i64;
    if address < 0 || address as usize + span > self.ram.len() {
      return Err(RuntimeFault::OutOfBoundsAccess { pc: self.pc, word, address });
    }
    Ok(address as usize)
  }

  // endregion

  // region Execution

  /// Runs until the program halts, a fault occurs, or the external stop
  /// signal is raised.
  pub fn run(&mut self) -> Result<(), RuntimeFault> {
    while self.state == ProgramState::Running {
      if self.stop_requested.load(Ordering::Relaxed) {
        return Ok(());
      }
      self.step()?;
    }
    Ok(())
  }

  /// One fetch-decode-execute cycle.
  pub fn step(&mut self) -> Result<(), RuntimeFault> {
    let pc = self.pc;
    let word = self.fetch()?;
    self.cycles += 1;

    let fields = encoding::carve(word);
    let opcode = Opcode::try_from(fields.code)
      .map_err(|_| RuntimeFault::UnrecognizedOpcode { pc, word })?;

    #[cfg(feature = "trace_execution")]
      {
        match encoding::decode(word) {
          Some(inst) => println!("{:#010X}:  {}", pc, inst),
          None       => println!("{:#010X}:  {:08X}", pc, word),
        }
        println!("{}", self);
      }

    // Taken branches and jumps overwrite this.
    let mut next_pc = pc.wrapping_add(WORD_BYTES);

    match opcode {

      Opcode::Mov => {
        let (reg1, reg2) = self.register_pair(&fields, word)?;
        self.write_register(reg1, self.read_register(reg2));
      }

      Opcode::Add  => self.register_arithmetic(&fields, word, i32::wrapping_add)?,
      Opcode::Sub  => self.register_arithmetic(&fields, word, i32::wrapping_sub)?,
      Opcode::And  => self.register_arithmetic(&fields, word, |a, b| a & b)?,
      Opcode::Or   => self.register_arithmetic(&fields, word, |a, b| a | b)?,
      Opcode::Xor  => self.register_arithmetic(&fields, word, |a, b| a ^ b)?,
      Opcode::Nor  => self.register_arithmetic(&fields, word, |a, b| !(a | b))?,
      Opcode::Sllv => self.register_arithmetic(&fields, word, |a, b| a.wrapping_shl(b as u32))?,
      Opcode::Srav => self.register_arithmetic(&fields, word, |a, b| a.wrapping_shr(b as u32))?,

      Opcode::Not => {
        let (reg1, reg2) = self.register_pair(&fields, word)?;
        self.write_register(reg1, !self.read_register(reg2));
      }

      Opcode::Mult => {
        let (reg1, reg2) = self.register_pair(&fields, word)?;
        let product = self.read_register(reg1) as i64 * self.read_register(reg2) as i64;
        self.write_product(product);
      }

      Opcode::Div => {
        let (reg1, reg2) = self.register_pair(&fields, word)?;
        let divisor = self.read_register(reg2);
        if divisor == 0 {
          return Err(RuntimeFault::DivisionByZero { pc, word });
        }
        self.write_quotient(self.read_register(reg1), divisor);
      }

      Opcode::MovI => {
        let reg = self.register_operand(fields.reg1, word)?;
        self.write_register(reg, fields.imm);
      }

      Opcode::AddI => self.immediate_arithmetic(&fields, word, i32::wrapping_add)?,
      Opcode::SubI => self.immediate_arithmetic(&fields, word, i32::wrapping_sub)?,
      Opcode::AndI => self.immediate_arithmetic(&fields, word, |a, b| a & b)?,
      Opcode::OrI  => self.immediate_arithmetic(&fields, word, |a, b| a | b)?,
      Opcode::XorI => self.immediate_arithmetic(&fields, word, |a, b| a ^ b)?,
      Opcode::Sll  => self.immediate_arithmetic(&fields, word, |a, b| a.wrapping_shl(b as u32))?,
      Opcode::Sra  => self.immediate_arithmetic(&fields, word, |a, b| a.wrapping_shr(b as u32))?,

      Opcode::MultI => {
        let reg = self.register_operand(fields.reg1, word)?;
        let product = self.read_register(reg) as i64 * fields.imm as i64;
        self.write_product(product);
      }

      Opcode::DivI => {
        let reg = self.register_operand(fields.reg1, word)?;
        if fields.imm == 0 {
          return Err(RuntimeFault::DivisionByZero { pc, word });
        }
        self.write_quotient(self.read_register(reg), fields.imm);
      }

      Opcode::BEq => {
        let (reg1, reg2) = self.register_pair(&fields, word)?;
        if self.read_register(reg1) == self.read_register(reg2) {
          next_pc = offset_target(pc, fields.small_offset);
        }
      }

      Opcode::BNe => {
        let (reg1, reg2) = self.register_pair(&fields, word)?;
        if self.read_register(reg1) != self.read_register(reg2) {
          next_pc = offset_target(pc, fields.small_offset);
        }
      }

      Opcode::Jmp => {
        next_pc = offset_target(pc, fields.large_offset);
      }

      Opcode::JmpL => {
        // The return address is the instruction after the call, so a later
        // `jmpReg rRET` resumes there.
        self.write_register(Register::RRet, pc.wrapping_add(WORD_BYTES) as i32);
        next_pc = offset_target(pc, fields.large_offset);
      }

      Opcode::JmpLReg => {
        let reg = self.register_operand(fields.reg1, word)?;
        self.write_register(Register::RRet, pc.wrapping_add(WORD_BYTES) as i32);
        next_pc = self.read_register(reg) as u32;
      }

      Opcode::JmpReg => {
        let reg = self.register_operand(fields.reg1, word)?;
        next_pc = self.read_register(reg) as u32;
      }

      Opcode::Lb => {
        let (reg, mem_reg) = self.register_pair(&fields, word)?;
        let address = self.data_address(mem_reg, fields.small_offset, 1, word)?;
        // Bytes load zero extended.
        self.write_register(reg, self.ram[address] as i32);
      }

      Opcode::Lw => {
        let (reg, mem_reg) = self.register_pair(&fields, word)?;
        let address = self.data_address(mem_reg, fields.small_offset, 4, word)?;
        let value = i32::from_le_bytes([
          self.ram[address],
          self.ram[address + 1],
          self.ram[address + 2],
          self.ram[address + 3],
        ]);
        self.write_register(reg, value);
      }

      Opcode::Sb => {
        let (reg, mem_reg) = self.register_pair(&fields, word)?;
        let address = self.data_address(mem_reg, fields.small_offset, 1, word)?;
        self.ram[address] = self.read_register(reg).to_le_bytes()[0];
      }

      Opcode::Sw => {
        let (reg, mem_reg) = self.register_pair(&fields, word)?;
        let address = self.data_address(mem_reg, fields.small_offset, 4, word)?;
        let bytes = self.read_register(reg).to_le_bytes();
        self.ram[address..address + 4].copy_from_slice(&bytes);
      }

      Opcode::Interrupt => {
        // Unassigned commands execute as no-ops.
        if let Ok(InterruptKind::Halt) = InterruptKind::try_from(fields.command) {
          self.state = ProgramState::Halted;
        }
      }

      Opcode::Label => {
        // Labels are resolved at assemble time; at run time the marker word
        // is inert.
      }

    }

    self.pc = next_pc;
    Ok(())
  }

  fn register_pair(&self, fields: &DecodedFields, word: Word)
    -> Result<(Register, Register), RuntimeFault>
  {
    Ok((
      self.register_operand(fields.reg1, word)?,
      self.register_operand(fields.reg2, word)?,
    ))
  }

  /// reg1 = f(reg1, reg2), the shape shared by the register-register group.
  fn register_arithmetic<F>(&mut self, fields: &DecodedFields, word: Word, f: F)
    -> Result<(), RuntimeFault>
    where F: Fn(i32, i32) -> i32
  {
    let (reg1, reg2) = self.register_pair(fields, word)?;
    self.write_register(reg1, f(self.read_register(reg1), self.read_register(reg2)));
    Ok(())
  }

  /// reg = f(reg, imm), the shape shared by the immediate group.
  fn immediate_arithmetic<F>(&mut self, fields: &DecodedFields, word: Word, f: F)
    -> Result<(), RuntimeFault>
    where F: Fn(i32, i32) -> i32
  {
    let reg = self.register_operand(fields.reg1, word)?;
    self.write_register(reg, f(self.read_register(reg), fields.imm));
    Ok(())
  }

  /// The high word of the 64 bit product goes to `rHI`, the low word to `rLO`.
  fn write_product(&mut self, product: i64) {
    self.write_register(Register::RHi, (product >> 32) as i32);
    self.write_register(Register::RLo, product as i32);
  }

  /// Quotient to `rHI`, remainder to `rLO`. The divisor is known nonzero.
  fn write_quotient(&mut self, dividend: i32, divisor: i32) {
    self.write_register(Register::RHi, dividend.wrapping_div(divisor));
    self.write_register(Register::RLo, dividend.wrapping_rem(divisor));
  }

  // endregion

}

/// Scales a word-granular offset back to bytes and applies it to the address
/// of the referencing instruction, mirroring the encoder's `>> 2`.
fn offset_target(pc: u32, offset_words: i32) -> u32 {
  pc.wrapping_add((offset_words << 2) as u32)
}

// region Display

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Value"]);

    for register in Register::iter() {
      table.add_row(row![r->format!("{} =", register), self.read_register(register)]);
    }

    write!(
      f,
      "State: {}   pc: {:#010X}   cycles: {}\n{}",
      self.state, self.pc, self.cycles, table
    )
  }
}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

// endregion

#[cfg(test)]
mod tests {
  use crate::assembler::assemble;
  use super::*;

  fn machine_with(source: &str, base_address: u32) -> Machine {
    let words = assemble(source, base_address).unwrap();
    let mut machine = Machine::new(base_address);
    machine.load_words(&words).unwrap();
    machine
  }

  #[test]
  fn add_addi_halt_scenario() {
    let mut machine = machine_with("add r1, r2\naddI r1, 5\ninterrupt halt\n", 0);
    machine.set_register(Register::R1, 0);
    machine.set_register(Register::R2, 10);

    machine.run().unwrap();

    assert_eq!(machine.register(Register::R1), 15);
    assert_eq!(machine.state(), ProgramState::Halted);
    assert_eq!(machine.cycles(), 3);
  }

  #[test]
  fn a_taken_branch_lands_exactly_on_its_label() {
    // The branch sits two words before the label.
    let mut machine = machine_with(
      "bEq r1, r2, target\n\
       movI r3, 1\n\
       target:\n\
       interrupt halt\n",
      0,
    );
    machine.step().unwrap();
    assert_eq!(machine.pc(), 8);

    machine.run().unwrap();
    // The skipped instruction never executed.
    assert_eq!(machine.register(Register::R3), 0);
    assert_eq!(machine.state(), ProgramState::Halted);
  }

  #[test]
  fn a_failed_branch_falls_through() {
    let mut machine = machine_with(
      "bNe r1, r2, target\n\
       movI r3, 1\n\
       target:\n\
       interrupt halt\n",
      0,
    );
    machine.run().unwrap();
    assert_eq!(machine.register(Register::R3), 1);
  }

  #[test]
  fn call_and_return_linkage() {
    let mut machine = machine_with(
      "main:\n\
       jmpL double\n\
       interrupt halt\n\
       double:\n\
       add r1, r1\n\
       jmpReg rRET\n",
      0,
    );
    machine.set_register(Register::R1, 21);
    machine.run().unwrap();
    assert_eq!(machine.register(Register::R1), 42);
    // The return address was the instruction after the call.
    assert_eq!(machine.register(Register::RRet), 8);
    assert_eq!(machine.state(), ProgramState::Halted);
  }

  #[test]
  fn jmpl_reg_links_and_jumps_to_an_absolute_address() {
    let mut machine = machine_with(
      "movI r5, 12\n\
       jmpL_Reg r5\n\
       interrupt halt\n\
       interrupt halt\n",
      0,
    );
    machine.run().unwrap();
    // Jumped over the word at 8 straight to 12.
    assert_eq!(machine.cycles(), 3);
    assert_eq!(machine.register(Register::RRet), 8);
  }

  #[test]
  fn entry_point_scan_prefers_main() {
    let mut machine = machine_with(
      "movI r1, 1\n\
       main:\n\
       interrupt halt\n",
      0,
    );
    assert_eq!(machine.pc(), 4);
    machine.run().unwrap();
    // Execution began at main, skipping the movI: one cycle for the marker
    // word, one for the halt.
    assert_eq!(machine.register(Register::R1), 0);
    assert_eq!(machine.cycles(), 2);
  }

  #[test]
  fn without_main_execution_begins_at_the_base_address() {
    let base = 0x40;
    let mut machine = machine_with("movI r1, 7\ninterrupt halt\n", base);
    assert_eq!(machine.pc(), base);
    machine.run().unwrap();
    assert_eq!(machine.register(Register::R1), 7);
  }

  #[test]
  fn rzero_always_reads_as_zero() {
    let mut machine = machine_with("movI rZERO, 99\nadd r1, rZERO\ninterrupt halt\n", 0);
    machine.set_register(Register::R1, 5);
    machine.run().unwrap();
    assert_eq!(machine.register(Register::RZero), 0);
    assert_eq!(machine.register(Register::R1), 5);
  }

  #[test]
  fn mult_splits_the_product_across_hi_and_lo() {
    let mut machine = machine_with("mult r1, r2\ninterrupt halt\n", 0);
    machine.set_register(Register::R1, 0x4000_0000);
    machine.set_register(Register::R2, 4);
    machine.run().unwrap();
    // 2^30 * 4 = 2^32: all of the product is in the high word.
    assert_eq!(machine.register(Register::RHi), 1);
    assert_eq!(machine.register(Register::RLo), 0);
  }

  #[test]
  fn div_writes_quotient_and_remainder() {
    let mut machine = machine_with("divI r1, 4\ninterrupt halt\n", 0);
    machine.set_register(Register::R1, 23);
    machine.run().unwrap();
    assert_eq!(machine.register(Register::RHi), 5);
    assert_eq!(machine.register(Register::RLo), 3);
  }

  #[test]
  fn division_by_zero_is_fatal() {
    let mut machine = machine_with("div r1, r2\ninterrupt halt\n", 0);
    machine.set_register(Register::R1, 1);
    let fault = machine.run().unwrap_err();
    assert!(matches!(fault, RuntimeFault::DivisionByZero { pc: 0, .. }));
  }

  #[test]
  fn loads_and_stores_agree_on_byte_order() {
    let mut machine = machine_with(
      "sw r1, r2, 0\n\
       lb r3, r2, 0\n\
       lw r4, r2, 0\n\
       interrupt halt\n",
      0,
    );
    machine.set_register(Register::R1, 0x0102_0364);
    machine.set_register(Register::R2, 0x1000);
    machine.run().unwrap();
    // The least significant byte lives at the lowest address.
    assert_eq!(machine.register(Register::R3), 0x64);
    assert_eq!(machine.register(Register::R4), 0x0102_0364);
  }

  #[test]
  fn byte_loads_zero_extend() {
    let mut machine = machine_with(
      "movI r1, 255\n\
       sb r1, r2, 8\n\
       lb r3, r2, 8\n\
       interrupt halt\n",
      0x100,
    );
    machine.set_register(Register::R2, 0x2000);
    machine.run().unwrap();
    assert_eq!(machine.register(Register::R3), 255);
  }

  #[test]
  fn a_program_may_overwrite_its_own_upcoming_code() {
    // Builds the halt word 0x80000000 in r1, then stores it over the movI at
    // address 12. The machine must halt there, leaving r6 unset.
    let mut machine = machine_with(
      "movI r1, 1\n\
       sll r1, 31\n\
       sw r1, rZERO, 12\n\
       movI r6, 1\n\
       interrupt halt\n",
      0,
    );
    machine.run().unwrap();
    assert_eq!(machine.state(), ProgramState::Halted);
    assert_eq!(machine.register(Register::R6), 0);
    assert_eq!(machine.cycles(), 4);
  }

  #[test]
  fn out_of_bounds_access_is_fatal() {
    let mut machine = machine_with("lw r1, r2, -4\ninterrupt halt\n", 0);
    machine.set_register(Register::R2, 0);
    let fault = machine.run().unwrap_err();
    assert!(matches!(
      fault,
      RuntimeFault::OutOfBoundsAccess { pc: 0, address: -4, .. }
    ));
  }

  #[test]
  fn unrecognized_opcodes_are_fatal() {
    let mut machine = Machine::new(0);
    machine.load_words(&[0xFC00_0000]).unwrap(); // opcode 63
    let fault = machine.run().unwrap_err();
    assert!(matches!(fault, RuntimeFault::UnrecognizedOpcode { pc: 0, .. }));
  }

  #[test]
  fn unassigned_register_codes_are_fatal() {
    let mut machine = Machine::new(0);
    // mov with reg1 code 31.
    machine.load_words(&[0x03E0_0000]).unwrap();
    let fault = machine.run().unwrap_err();
    assert!(matches!(
      fault,
      RuntimeFault::UnknownRegister { pc: 0, code: 31, .. }
    ));
  }

  #[test]
  fn the_stop_handle_pauses_without_halting() {
    let mut machine = machine_with("loop:\njmp loop\n", 0);
    machine.stop_handle().store(true, Ordering::Relaxed);
    machine.run().unwrap();
    assert_eq!(machine.state(), ProgramState::Running);
    assert_eq!(machine.cycles(), 0);
  }

  #[test]
  fn program_files_parse_strictly() {
    assert_eq!(parse_program("04220000\n80000000\n").unwrap(), vec![0x0422_0000, 0x8000_0000]);

    assert!(matches!(
      parse_program("0422000\n"), // seven digits
      Err(LoadError::MalformedWord { line: 1, .. })
    ));
    assert!(matches!(
      parse_program("04220000\nG4220000\n"),
      Err(LoadError::MalformedWord { line: 2, .. })
    ));
    assert!(matches!(
      parse_program("04220000 \n"),
      Err(LoadError::MalformedWord { line: 1, .. })
    ));
  }

  #[test]
  fn oversized_programs_are_rejected_at_load() {
    let mut machine = Machine::new((MEMORY_SIZE - 4) as u32);
    let result = machine.load_words(&[0, 0]);
    assert!(matches!(result, Err(LoadError::TooLarge { words: 2, .. })));
  }
}
