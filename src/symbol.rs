use std::fmt::{self, Display, Formatter};
use crate::parser::symbol_set::{SymbolRange, SymbolSet};

/// A grammar symbol. Ids are arbitrary and need not be contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub i32);

impl From<i32> for Symbol {
  fn from(id: i32) -> Self {
    Symbol(id)
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
  Terminal,
  Variable,
  Empty,
}

/// Partition of the symbol space plus the distinguished symbols.
#[derive(Debug, Clone)]
pub struct Symbols {
  variables: Vec<Symbol>,
  terminals: Vec<Symbol>,
  variable_set: SymbolSet,
  terminal_set: SymbolSet,
  start: Symbol,
  empty: Symbol,
  end: Symbol,
}

impl Symbols {
  /// `end` is always treated as a terminal, whether or not it is listed in
  /// `terminals`.
  ///
  /// Every symbol set built for this alphabet (the partition here, and each
  /// FIRST and FOLLOW entry) is a bitset spanning the lowest to the highest
  /// declared id, one bit per id in between. Keep the ids dense: declaring
  /// both `0` and `i32::MAX` costs about 256 MiB per set.
  pub fn new(
    variables: &[Symbol],
    terminals: &[Symbol],
    start: Symbol,
    empty: Symbol,
    end: Symbol,
  ) -> Self {
    let mut terminals = terminals.to_vec();
    if !terminals.contains(&end) {
      terminals.push(end);
    }

    let range = SymbolRange::covering(
      variables.iter()
        .chain(terminals.iter())
        .copied()
        .chain([start, empty, end]));

    let mut variable_set = SymbolSet::new(range);
    for &v in variables {
      variable_set.insert(v);
    }
    let mut terminal_set = SymbolSet::new(range);
    for &t in &terminals {
      terminal_set.insert(t);
    }

    Self {
      variables: variables.to_vec(),
      terminals,
      variable_set,
      terminal_set,
      start,
      empty,
      end,
    }
  }

  pub fn kind(&self, symbol: Symbol) -> Option<SymbolKind> {
    if symbol == self.empty {
      Some(SymbolKind::Empty)
    } else if self.terminal_set.contains(symbol) {
      Some(SymbolKind::Terminal)
    } else if self.variable_set.contains(symbol) {
      Some(SymbolKind::Variable)
    } else {
      None
    }
  }

  pub fn is_terminal(&self, symbol: Symbol) -> bool {
    self.kind(symbol) == Some(SymbolKind::Terminal)
  }

  pub fn is_variable(&self, symbol: Symbol) -> bool {
    self.kind(symbol) == Some(SymbolKind::Variable)
  }

  /// Declared variables, in declaration order.
  pub fn variables(&self) -> impl Iterator<Item = Symbol> + '_ {
    self.variables.iter().copied()
  }

  /// Declared terminals, in declaration order, `end` included.
  pub fn terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
    self.terminals.iter().copied()
  }

  pub fn start(&self) -> Symbol {
    self.start
  }

  pub fn empty(&self) -> Symbol {
    self.empty
  }

  pub fn end(&self) -> Symbol {
    self.end
  }

  /// The id window every set over these symbols is built on.
  pub fn range(&self) -> SymbolRange {
    self.variable_set.range()
  }

  pub(crate) fn new_set(&self) -> SymbolSet {
    SymbolSet::new(self.range())
  }

  pub(crate) fn declares(&self, symbol: Symbol) -> bool {
    self.terminal_set.contains(symbol) || self.variable_set.contains(symbol)
  }

  /// Symbols declared both as terminal and variable.
  pub(crate) fn overlap(&self) -> SymbolSet {
    let mut both = self.variable_set.clone();
    let mut not_terminal = self.variable_set.clone();
    not_terminal.difference_with(&self.terminal_set);
    both.difference_with(&not_terminal);
    both
  }
}
