use std::fmt::{self, Display, Formatter};
use indexmap::IndexMap;
use crate::error::InitError;
use crate::parser::{Parser, Token};
use crate::symbol::{Symbol, Symbols};

/// Index of a rule in its [`Grammar`], in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  variable: Symbol,
  /// never empty; an epsilon rule holds the single empty symbol
  expansion: Vec<Symbol>,
}

impl Rule {
  pub fn variable(&self) -> Symbol {
    self.variable
  }

  pub fn expansion(&self) -> &[Symbol] {
    &self.expansion
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} ->", self.variable)?;
    for sym in &self.expansion {
      write!(f, " {}", sym)?;
    }
    Ok(())
  }
}

/// Production rules grouped by left-hand variable.
#[derive(Debug, Clone)]
pub struct Grammar {
  symbols: Symbols,
  rules: Vec<Rule>,
  by_variable: IndexMap<Symbol, Vec<RuleId>>,
}

impl Grammar {
  pub fn new(symbols: Symbols) -> Self {
    Self {
      symbols,
      rules: vec![],
      by_variable: IndexMap::new(),
    }
  }

  pub fn symbols(&self) -> &Symbols {
    &self.symbols
  }

  /// Appends `variable -> expansion`. An empty `expansion` is stored as the
  /// single empty symbol. Symbols are not checked until
  /// [`initialize`](Grammar::initialize).
  pub fn add_rule(&mut self, variable: Symbol, expansion: &[Symbol]) -> RuleId {
    let expansion = if expansion.is_empty() {
      vec![self.symbols.empty()]
    } else {
      expansion.to_vec()
    };

    let id = RuleId(self.rules.len() as u32);
    self.rules.push(Rule {
      variable,
      expansion,
    });
    self.by_variable.entry(variable).or_default().push(id);
    id
  }

  pub fn rule(&self, id: RuleId) -> &Rule {
    &self.rules[id.index()]
  }

  /// All rules, grouped by variable in the order each variable first got a
  /// rule, insertion order within a group.
  pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> + '_ {
    self.by_variable.values()
      .flatten()
      .map(move |&id| (id, &self.rules[id.index()]))
  }

  pub fn rules_for(&self, variable: Symbol) -> impl Iterator<Item = (RuleId, &Rule)> + '_ {
    self.by_variable.get(&variable)
      .into_iter()
      .flatten()
      .map(move |&id| (id, &self.rules[id.index()]))
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  pub fn validate(&self) -> Result<(), InitError> {
    let symbols = &self.symbols;

    if let Some(sym) = symbols.overlap().iter().next() {
      return Err(InitError::Overlap(sym));
    }
    if symbols.declares(symbols.empty()) {
      return Err(InitError::EmptyDeclared(symbols.empty()));
    }
    if !symbols.is_variable(symbols.start()) {
      return Err(InitError::StartNotVariable(symbols.start()));
    }

    for (_, rule) in self.rules() {
      if !symbols.is_variable(rule.variable) {
        return Err(InitError::NotAVariable(rule.variable));
      }
      for &symbol in &rule.expansion {
        if symbols.kind(symbol).is_none() {
          return Err(InitError::UnknownSymbol {
            variable: rule.variable,
            symbol,
          });
        }
      }
    }

    Ok(())
  }

  /// Validates the grammar, solves its sets and builds the parse table.
  pub fn initialize<T: Token>(self) -> Result<Parser<T>, InitError> {
    Parser::new(self)
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use super::*;

  pub const EMPTY: Symbol = Symbol(0);

  pub const E: Symbol = Symbol(1);
  pub const E1: Symbol = Symbol(2);
  pub const T: Symbol = Symbol(3);
  pub const T1: Symbol = Symbol(4);
  pub const F: Symbol = Symbol(5);

  pub const PLUS: Symbol = Symbol(10);
  pub const STAR: Symbol = Symbol(11);
  pub const LPAREN: Symbol = Symbol(12);
  pub const RPAREN: Symbol = Symbol(13);
  pub const ID: Symbol = Symbol(14);
  pub const END: Symbol = Symbol(15);

  /// `E -> T E'`, `E' -> + T E' | ε`, `T -> F T'`, `T' -> * F T' | ε`,
  /// `F -> id | ( E )`
  pub fn expr() -> Grammar {
    let symbols = Symbols::new(
      &[E, E1, T, T1, F],
      &[PLUS, STAR, LPAREN, RPAREN, ID],
      E,
      EMPTY,
      END,
    );
    let mut grammar = Grammar::new(symbols);
    grammar.add_rule(E, &[T, E1]);
    grammar.add_rule(E1, &[PLUS, T, E1]);
    grammar.add_rule(E1, &[]);
    grammar.add_rule(T, &[F, T1]);
    grammar.add_rule(T1, &[STAR, F, T1]);
    grammar.add_rule(T1, &[EMPTY]);
    grammar.add_rule(F, &[ID]);
    grammar.add_rule(F, &[LPAREN, E, RPAREN]);
    grammar
  }

  pub const Z: Symbol = Symbol(21);
  pub const Y: Symbol = Symbol(22);
  pub const X: Symbol = Symbol(23);

  pub const A: Symbol = Symbol(31);
  pub const C: Symbol = Symbol(32);
  pub const D: Symbol = Symbol(33);

  /// `Z -> d | X Y Z`, `Y -> ε | c`, `X -> Y | a`
  pub fn simple() -> Grammar {
    let symbols = Symbols::new(&[Z, Y, X], &[A, C, D], Z, EMPTY, END);
    let mut grammar = Grammar::new(symbols);
    grammar.add_rule(Z, &[D]);
    grammar.add_rule(Z, &[X, Y, Z]);
    grammar.add_rule(Y, &[]);
    grammar.add_rule(Y, &[C]);
    grammar.add_rule(X, &[Y]);
    grammar.add_rule(X, &[A]);
    grammar
  }
}
