use std::fmt::{self, Debug, Formatter};

type BitBlock = u64;

const BLOCK_NBITS: usize = std::mem::size_of::<BitBlock>() * 8;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
  slice: Box<[BitBlock]>,
}

impl BitSet {
  pub fn new(num_bits: usize) -> Self {
    let len = (num_bits + BLOCK_NBITS - 1) / BLOCK_NBITS;
    Self {
      slice: vec![0; len].into_boxed_slice(),
    }
  }

  pub fn clear(&mut self) {
    for x in self.slice.iter_mut() {
      *x = 0;
    }
  }

  /// Returns whether the bit was newly set.
  pub fn insert(&mut self, bit: usize) -> bool {
    let block = &mut self.slice[bit / BLOCK_NBITS];
    let mask = 1 << (bit % BLOCK_NBITS);
    let old = *block;
    *block |= mask;
    old != *block
  }

  pub fn remove(&mut self, bit: usize) {
    self.slice[bit / BLOCK_NBITS] &= !(1 << (bit % BLOCK_NBITS));
  }

  /// Returns whether the set has changed.
  pub fn union_with(&mut self, other: &BitSet) -> bool {
    let mut changed = false;
    for (x, y) in self.slice.iter_mut().zip(other.slice.iter()) {
      let old = *x;
      *x |= *y;
      changed |= old != *x;
    }
    changed
  }

  pub fn difference_with(&mut self, other: &BitSet) {
    for (x, y) in self.slice.iter_mut().zip(other.slice.iter()) {
      *x &= !*y;
    }
  }

  pub fn get(&self, bit: usize) -> bool {
    self.slice[bit / BLOCK_NBITS] & (1 << (bit % BLOCK_NBITS)) != 0
  }

  pub fn is_empty(&self) -> bool {
    self.slice.iter().all(|&x| x == 0)
  }

  pub fn count(&self) -> usize {
    self.slice.iter().map(|x| x.count_ones() as usize).sum()
  }

  pub fn iter(&self) -> Iter<'_> {
    Iter {
      slice: &*self.slice,
      bit: 0,
      index: 0,
    }
  }
}

pub struct Iter<'a> {
  slice: &'a [BitBlock],
  bit: usize,
  index: usize,
}

impl<'a> Iterator for Iter<'a> {
  type Item = usize;

  fn next(&mut self) -> Option<usize> {
    while self.index < self.slice.len() {
      if self.bit < BLOCK_NBITS {
        let rest = self.slice[self.index] & (!0 << self.bit);
        let bit = rest.trailing_zeros() as usize;
        if bit < BLOCK_NBITS {
          self.bit = bit + 1;
          return Some(self.index * BLOCK_NBITS + bit);
        }
      }

      self.index += 1;
      self.bit = 0;
    }
    None
  }
}

impl Debug for BitSet {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}
