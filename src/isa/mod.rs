/*!

  The SAM-32 instruction set. Every instruction is one 32 bit word. The most
  significant 6 bits of the word always hold the opcode; the remaining 26 bits
  are carved differently for each instruction form:

    Register:      opcode(6) reg1(5)  reg2(5)    unused(16)
    Immediate:     opcode(6) reg(5)   sign(1)    imm(20)
    Memory:        opcode(6) reg(5)   memReg(5)  sign(1)  offset(15)
    JumpRegister:  opcode(6) reg(5)   unused(21)
    JumpLabel:     opcode(6) sign(1)  offset(25)
    Branch:        opcode(6) reg1(5)  reg2(5)    sign(1)  offset(15)
    Interrupt:     opcode(6) command(5)          unused(21)
    Label:         opcode(6) mainFlag(1)         unused(25)

  Signed fields are not stored as in-place two's complement. A dedicated sign
  bit sits immediately above the magnitude field, and a negative value stores
  the two's-complement negation of the value (`~v + 1`) truncated to the field
  width. Decoding re-negates when the sign bit is set. Branch and jump offsets
  are word-granular: the encoder divides the byte distance by four, and the
  machine multiplies by four again when it redirects the program counter.

  This layout is the contract shared by the assembler backend and the machine's
  decoder. Both sides carve fields exclusively through `encoding`, so the two
  cannot drift.

*/

pub mod encoding;
pub mod instruction;
pub mod opcode;
pub mod register;

pub use encoding::{Word, WORD_BYTES};
pub use instruction::{Instruction, SourceInst, Target};
pub use opcode::{InstForm, InterruptKind, Opcode};
pub use register::{Register, REGISTER_COUNT};
