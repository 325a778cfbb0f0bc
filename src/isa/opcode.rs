use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/**
  Opcodes of the machine, encoded in the most significant 6 bits of every
  instruction word. The 6 bit field bounds the ISA at 64 opcodes; codes 34–63
  are unassigned and fault at execution time.

  As in C, enum values are represented by consecutive natural numbers, and the
  opcodes are grouped so that an opcode's instruction form can be determined
  with a trivial comparison. Consequently, the order the opcodes are listed
  below is significant. Order-dependencies:
      ```
      Opcode::form()
      encoding::decode()
      ```
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Opcode {
  // Register form: op reg, reg //
  #[strum(serialize = "mov")]      Mov = 0,
  #[strum(serialize = "add")]      Add,
  #[strum(serialize = "sub")]      Sub,
  #[strum(serialize = "mult")]     Mult,
  #[strum(serialize = "div")]      Div,
  #[strum(serialize = "and")]      And,
  #[strum(serialize = "or")]       Or,
  #[strum(serialize = "xor")]      Xor,
  #[strum(serialize = "not")]      Not,
  #[strum(serialize = "nor")]      Nor,
  #[strum(serialize = "sllv")]     Sllv,
  #[strum(serialize = "srav")]     Srav,
  // Opcode 12

  // Immediate form: op reg, int //
  #[strum(serialize = "movI")]     MovI = 12,
  #[strum(serialize = "addI")]     AddI,
  #[strum(serialize = "subI")]     SubI,
  #[strum(serialize = "multI")]    MultI,
  #[strum(serialize = "divI")]     DivI,
  #[strum(serialize = "andI")]     AndI,
  #[strum(serialize = "orI")]      OrI,
  #[strum(serialize = "xorI")]     XorI,
  #[strum(serialize = "sll")]      Sll,
  #[strum(serialize = "sra")]      Sra,
  // Opcode 22

  // Branch form: op reg, reg, label //
  #[strum(serialize = "bEq")]      BEq = 22,
  #[strum(serialize = "bNe")]      BNe,

  // Label jump form: op label //
  #[strum(serialize = "jmp")]      Jmp = 24,
  #[strum(serialize = "jmpL")]     JmpL,

  // Register jump form: op reg //
  #[strum(serialize = "jmpL_Reg")] JmpLReg = 26,
  #[strum(serialize = "jmpReg")]   JmpReg,

  // Memory form: op reg, reg, int //
  #[strum(serialize = "lb")]       Lb = 28,
  #[strum(serialize = "lw")]       Lw,
  #[strum(serialize = "sb")]       Sb,
  #[strum(serialize = "sw")]       Sw,

  #[strum(serialize = "interrupt")] Interrupt = 32,
  #[strum(serialize = "label")]     Label = 33,
}

pub const MAX_REGISTER_FORM      : u8 = 12u8;
pub const MAX_IMMEDIATE_FORM     : u8 = 22u8;
pub const MAX_BRANCH_FORM        : u8 = 24u8;
pub const MAX_JUMP_LABEL_FORM    : u8 = 26u8;
pub const MAX_JUMP_REGISTER_FORM : u8 = 28u8;
pub const MAX_MEMORY_FORM        : u8 = 32u8;

/// The eight instruction forms, one per bit layout of the word.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum InstForm {
  Register,
  Immediate,
  Branch,
  JumpLabel,
  JumpRegister,
  Memory,
  Interrupt,
  Label,
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The instruction form, and hence the word layout, this opcode encodes to.
  pub fn form(&self) -> InstForm {
    match self.code() {
      value if value < MAX_REGISTER_FORM      => InstForm::Register,
      value if value < MAX_IMMEDIATE_FORM     => InstForm::Immediate,
      value if value < MAX_BRANCH_FORM        => InstForm::Branch,
      value if value < MAX_JUMP_LABEL_FORM    => InstForm::JumpLabel,
      value if value < MAX_JUMP_REGISTER_FORM => InstForm::JumpRegister,
      value if value < MAX_MEMORY_FORM        => InstForm::Memory,
      value if value == Opcode::Interrupt.code() => InstForm::Interrupt,
      _value                                  => InstForm::Label,
    }
  }
}

/**
  Commands of the `interrupt` instruction, a 5 bit field. Only `halt` is
  assigned; executing an interrupt with an unassigned command is a no-op.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
Clone, Copy, Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum InterruptKind {
  #[strum(serialize = "halt")] Halt = 0,
}
