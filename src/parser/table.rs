use indexmap::IndexMap;
use crate::grammar::{Grammar, RuleId};
use crate::symbol::Symbol;
use super::sets::Sets;

/// `(variable, terminal) -> rule` decisions for predictive parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseTable {
  rows: IndexMap<Symbol, IndexMap<Symbol, RuleId>>,
  conflicts: Vec<Conflict>,
}

/// Two different rules competing for one cell. The later rule (`kept`)
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
  pub variable: Symbol,
  pub terminal: Symbol,
  pub replaced: RuleId,
  pub kept: RuleId,
}

impl ParseTable {
  pub fn build(grammar: &Grammar, sets: &Sets) -> Self {
    let symbols = grammar.symbols();
    let mut table = ParseTable::default();
    let mut buf = symbols.new_set();

    for (id, rule) in grammar.rules() {
      buf.clear();
      let nullable = sets.first_of_symbols(&mut buf, symbols,
        rule.expansion());
      for t in &buf {
        table.insert(rule.variable(), t, id);
      }
      if nullable {
        if let Some(follow) = sets.follow(rule.variable()) {
          for t in follow {
            table.insert(rule.variable(), t, id);
          }
        }
      }
    }

    for c in &table.conflicts {
      warn!(
        "LL(1) conflict at [{}, {}]: `{}` replaces `{}`",
        c.variable,
        c.terminal,
        grammar.rule(c.kept),
        grammar.rule(c.replaced),
      );
    }

    table
  }

  fn insert(&mut self, variable: Symbol, terminal: Symbol, rule: RuleId) {
    let old = self.rows
      .entry(variable)
      .or_default()
      .insert(terminal, rule);
    match old {
      Some(replaced) if replaced != rule => {
        self.conflicts.push(Conflict {
          variable,
          terminal,
          replaced,
          kept: rule,
        });
      }
      _ => {}
    }
  }

  pub fn get(&self, variable: Symbol, terminal: Symbol) -> Option<RuleId> {
    self.rows.get(&variable)?.get(&terminal).copied()
  }

  /// Terminals with an entry in the row of `variable`, ascending.
  pub fn expected(&self, variable: Symbol) -> Vec<Symbol> {
    let mut terms = self.rows.get(&variable)
      .map(|row| row.keys().copied().collect::<Vec<_>>())
      .unwrap_or_default();
    terms.sort();
    terms
  }

  pub fn conflicts(&self) -> &[Conflict] {
    &self.conflicts
  }

  /// Number of populated cells.
  pub fn len(&self) -> usize {
    self.rows.values().map(|row| row.len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
