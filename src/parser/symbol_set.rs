use std::fmt::{self, Debug, Formatter};
use crate::symbol::Symbol;
use super::bitset::BitSet;

/// A contiguous window `[min, min + len)` of symbol ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRange {
  min: i32,
  len: usize,
}

impl SymbolRange {
  /// Smallest range covering every given symbol.
  pub fn covering(symbols: impl IntoIterator<Item = Symbol>) -> Self {
    let mut bounds: Option<(i32, i32)> = None;
    for Symbol(id) in symbols {
      bounds = Some(match bounds {
        Some((lo, hi)) => (lo.min(id), hi.max(id)),
        None => (id, id),
      });
    }
    match bounds {
      Some((lo, hi)) => Self {
        min: lo,
        len: (hi as i64 - lo as i64 + 1) as usize,
      },
      None => Self { min: 0, len: 0 },
    }
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn index(&self, symbol: Symbol) -> Option<usize> {
    let offset = symbol.0 as i64 - self.min as i64;
    if offset >= 0 && (offset as usize) < self.len {
      Some(offset as usize)
    } else {
      None
    }
  }

  pub fn symbol(&self, index: usize) -> Symbol {
    Symbol((self.min as i64 + index as i64) as i32)
  }
}

/// A set of symbols backed by a dense bitset over a [`SymbolRange`].
#[derive(Clone, PartialEq, Eq)]
pub struct SymbolSet {
  range: SymbolRange,
  bits: BitSet,
}

impl SymbolSet {
  pub fn new(range: SymbolRange) -> Self {
    Self {
      range,
      bits: BitSet::new(range.len()),
    }
  }

  pub fn range(&self) -> SymbolRange {
    self.range
  }

  pub fn contains(&self, symbol: Symbol) -> bool {
    match self.range.index(symbol) {
      Some(ix) => self.bits.get(ix),
      None => false,
    }
  }

  /// Returns whether the symbol was newly added. Symbols outside the range
  /// are never members.
  pub fn insert(&mut self, symbol: Symbol) -> bool {
    match self.range.index(symbol) {
      Some(ix) => self.bits.insert(ix),
      None => {
        debug_assert!(false, "symbol {} outside of {:?}", symbol, self.range);
        false
      }
    }
  }

  pub fn remove(&mut self, symbol: Symbol) {
    if let Some(ix) = self.range.index(symbol) {
      self.bits.remove(ix);
    }
  }

  pub fn clear(&mut self) {
    self.bits.clear();
  }

  /// Returns whether the set has changed.
  pub fn union_with(&mut self, other: &SymbolSet) -> bool {
    debug_assert_eq!(self.range, other.range);
    self.bits.union_with(&other.bits)
  }

  pub fn difference_with(&mut self, other: &SymbolSet) {
    debug_assert_eq!(self.range, other.range);
    self.bits.difference_with(&other.bits);
  }

  pub fn any(&self) -> bool {
    !self.bits.is_empty()
  }

  pub fn is_empty(&self) -> bool {
    self.bits.is_empty()
  }

  pub fn len(&self) -> usize {
    self.bits.count()
  }

  /// Members in ascending id order.
  pub fn iter(&self) -> Iter<'_> {
    Iter {
      range: self.range,
      bits: self.bits.iter(),
    }
  }
}

pub struct Iter<'a> {
  range: SymbolRange,
  bits: super::bitset::Iter<'a>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = Symbol;

  fn next(&mut self) -> Option<Symbol> {
    self.bits.next().map(|ix| self.range.symbol(ix))
  }
}

impl<'a> IntoIterator for &'a SymbolSet {
  type Item = Symbol;
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Iter<'a> {
    self.iter()
  }
}

impl Debug for SymbolSet {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn syms(ids: &[i32]) -> Vec<Symbol> {
    ids.iter().map(|&id| Symbol(id)).collect()
  }

  #[test]
  fn insert() {
    let mut set = SymbolSet::new(SymbolRange::covering(syms(&[100, 114])));

    set.insert(Symbol(107));
    set.insert(Symbol(103));
    set.insert(Symbol(107));
    set.insert(Symbol(114));

    assert_eq!(set.iter().collect::<Vec<_>>(), syms(&[103, 107, 114]));
    assert_eq!(set.len(), 3);
  }

  #[test]
  fn negative_ids_are_offset() {
    let range = SymbolRange::covering(syms(&[-5, 3, -1]));
    assert_eq!(range.len(), 9);
    assert_eq!(range.index(Symbol(-5)), Some(0));
    assert_eq!(range.index(Symbol(3)), Some(8));
    assert_eq!(range.index(Symbol(4)), None);
    assert_eq!(range.index(Symbol(-6)), None);

    let mut set = SymbolSet::new(range);
    set.insert(Symbol(-5));
    set.insert(Symbol(3));
    assert!(set.contains(Symbol(-5)));
    assert!(!set.contains(Symbol(0)));
    assert!(!set.contains(Symbol(1000)));
    assert_eq!(set.iter().collect::<Vec<_>>(), syms(&[-5, 3]));
  }

  #[test]
  fn algebra() {
    let range = SymbolRange::covering(syms(&[0, 9]));
    let mut a = SymbolSet::new(range);
    let mut b = SymbolSet::new(range);
    assert!(!a.any());

    a.insert(Symbol(1));
    b.insert(Symbol(1));
    b.insert(Symbol(4));

    assert!(a.union_with(&b));
    assert!(!a.union_with(&b));
    assert_eq!(a, b);

    a.difference_with(&b);
    assert!(a.is_empty());
  }
}
