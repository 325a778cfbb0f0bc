/*!
  SAM-32: a small 32 bit instruction set, a two-pass assembler for it, and a
  machine that executes the encoded programs against a flat byte-addressable
  memory.

  The assembling pipeline is this:
  ```text
  text -> [assembler::lexer] -> tokens -> [assembler::parser] -> instructions
       -> [assembler::encoder] -> words -> hex program file
  ```
  and the program file is the sole artifact the `Machine` loads. The bit
  layout both halves share is documented in `isa` and implemented once, in
  `isa::encoding`.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;
extern crate strum;
extern crate strum_macros;

pub mod assembler;
pub mod errors;
pub mod isa;
pub mod machine;

pub use crate::assembler::{assemble, render_program};
pub use crate::errors::{EncodeError, LoadError, RuntimeFault};
pub use crate::isa::{Instruction, InterruptKind, Opcode, Register, Word};
pub use crate::machine::{Machine, ProgramState, MEMORY_SIZE};
