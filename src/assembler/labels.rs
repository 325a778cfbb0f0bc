use bimap::BiMap;
use string_cache::DefaultAtom;

/**
  The label table maps label names to the absolute byte address of their
  declaration. It is built in one forward pass over the instruction list
  before any relative offset is computed, which is what makes forward
  references valid, and it is scoped to a single `encode` call. A label table
  is really just a convenience wrapper around a BiMap.
*/
pub struct LabelTable {
  table: BiMap<DefaultAtom, u32>,
}

impl LabelTable {

  pub fn new() -> LabelTable {
    LabelTable {
      table: BiMap::new()
    }
  }

  pub fn address_of(&self, name: &DefaultAtom) -> Option<u32> {
    self.table.get_by_left(name).cloned()
  }

  pub fn label_at(&self, address: u32) -> Option<DefaultAtom> {
    self.table.get_by_right(&address).cloned()
  }

  /// Duplicate names are a programmer error and must fail fast, never
  /// silently overwrite.
  pub fn insert(&mut self, name: DefaultAtom, address: u32)
    -> Result<(), (DefaultAtom, u32)> {
    self.table.insert_no_overwrite(name, address)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookup_works_both_ways() {
    let mut labels = LabelTable::new();
    labels.insert(DefaultAtom::from("main"), 8).unwrap();
    assert_eq!(labels.address_of(&DefaultAtom::from("main")), Some(8));
    assert_eq!(labels.label_at(8), Some(DefaultAtom::from("main")));
    assert_eq!(labels.address_of(&DefaultAtom::from("loop")), None);
  }

  #[test]
  fn duplicate_names_are_rejected() {
    let mut labels = LabelTable::new();
    labels.insert(DefaultAtom::from("loop"), 0).unwrap();
    assert!(labels.insert(DefaultAtom::from("loop"), 16).is_err());
    // The original binding survives.
    assert_eq!(labels.address_of(&DefaultAtom::from("loop")), Some(0));
  }
}
