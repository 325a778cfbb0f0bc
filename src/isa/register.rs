use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Number of architectural registers. Register codes 23–31 fit the 5 bit
/// encoding field but are unassigned, and the machine faults on them.
pub const REGISTER_COUNT: usize = 23;

/**
  The register file of the machine: the hard-wired zero register, sixteen
  general purpose registers, the stack and frame pointers, the return-address
  register, and the two arithmetic result registers `rHI`/`rLO` (quotient and
  remainder, or the high and low words of a product).

  Each variant's discriminant is its 5 bit encoding, so the order below is
  significant. `rPC` takes the final slot; it is a reserved ordinary register
  and does not alias the machine's program counter.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,        Debug,            Hash
)]
#[repr(u8)]
pub enum Register {
  #[strum(serialize = "rZERO")] RZero = 0,
  #[strum(serialize = "r1")]    R1,
  #[strum(serialize = "r2")]    R2,
  #[strum(serialize = "r3")]    R3,
  #[strum(serialize = "r4")]    R4,
  #[strum(serialize = "r5")]    R5,
  #[strum(serialize = "r6")]    R6,
  #[strum(serialize = "r7")]    R7,
  #[strum(serialize = "r8")]    R8,
  #[strum(serialize = "r9")]    R9,
  #[strum(serialize = "r10")]   R10,
  #[strum(serialize = "r11")]   R11,
  #[strum(serialize = "r12")]   R12,
  #[strum(serialize = "r13")]   R13,
  #[strum(serialize = "r14")]   R14,
  #[strum(serialize = "r15")]   R15,
  #[strum(serialize = "r16")]   R16,
  #[strum(serialize = "rSP")]   RSp,
  #[strum(serialize = "rFP")]   RFp,
  #[strum(serialize = "rRET")]  RRet,
  #[strum(serialize = "rHI")]   RHi,
  #[strum(serialize = "rLO")]   RLo,
  #[strum(serialize = "rPC")]   RPc,
}

impl Register {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

#[cfg(test)]
mod tests {
  use std::convert::TryFrom;
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn codes_match_the_canonical_table() {
    assert_eq!(Register::RZero.code(), 0);
    assert_eq!(Register::R16.code(), 16);
    assert_eq!(Register::RSp.code(), 17);
    assert_eq!(Register::RFp.code(), 18);
    assert_eq!(Register::RRet.code(), 19);
    assert_eq!(Register::RHi.code(), 20);
    assert_eq!(Register::RLo.code(), 21);
    assert_eq!(Register::RPc.code(), 22);
    assert_eq!(Register::iter().count(), REGISTER_COUNT);
  }

  #[test]
  fn names_round_trip() {
    for register in Register::iter() {
      let name = register.to_string();
      assert_eq!(Register::from_str(&name), Ok(register));
    }
    assert!(Register::from_str("r17").is_err());
    assert!(Register::from_str("rzero").is_err());
  }

  #[test]
  fn unassigned_codes_are_rejected() {
    assert!(Register::try_from(22u8).is_ok());
    assert!(Register::try_from(23u8).is_err());
    assert!(Register::try_from(31u8).is_err());
  }
}
