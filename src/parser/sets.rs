use indexmap::IndexMap;
use crate::grammar::Grammar;
use crate::symbol::{Symbol, SymbolKind, Symbols};
use super::symbol_set::SymbolSet;

/// Nullable symbols plus FIRST and FOLLOW of every declared variable.
#[derive(Debug, Clone)]
pub struct Sets {
  nullable: SymbolSet,
  reachable: SymbolSet,
  first: IndexMap<Symbol, SymbolSet>,
  follow: IndexMap<Symbol, SymbolSet>,
}

impl Sets {
  /// Rules headed by undeclared variables are ignored and undeclared
  /// symbols in expansions end a scan, as if they derived nothing.
  pub fn solve(grammar: &Grammar) -> Self {
    let (nullable, first) = gen_nullable_first(grammar);
    let reachable = gen_reachable(grammar);
    let follow = gen_follow(grammar, &nullable, &reachable, &first);
    Sets {
      nullable,
      reachable,
      first,
      follow,
    }
  }

  /// Variables that derive the empty string, plus the empty symbol.
  pub fn nullable(&self) -> &SymbolSet {
    &self.nullable
  }

  pub fn is_nullable(&self, symbol: Symbol) -> bool {
    self.nullable.contains(symbol)
  }

  /// Whether `variable` occurs in some sentential form derived from the
  /// start symbol. FOLLOW of any other variable is empty.
  pub fn is_reachable(&self, variable: Symbol) -> bool {
    self.reachable.contains(variable)
  }

  pub fn first(&self, variable: Symbol) -> Option<&SymbolSet> {
    self.first.get(&variable)
  }

  pub fn follow(&self, variable: Symbol) -> Option<&SymbolSet> {
    self.follow.get(&variable)
  }

  /// Adds FIRST of `symbols` to `result`. Returns whether all of `symbols`
  /// are nullable.
  pub(crate) fn first_of_symbols(
    &self,
    result: &mut SymbolSet,
    symbols: &Symbols,
    syms: &[Symbol],
  ) -> bool {
    compute_first_for_symbols(result, symbols, &self.first, &self.nullable,
      syms)
  }
}

fn gen_nullable_first(
  grammar: &Grammar,
) -> (SymbolSet, IndexMap<Symbol, SymbolSet>) {
  let symbols = grammar.symbols();
  let mut nullable = symbols.new_set();
  nullable.insert(symbols.empty());

  let mut first = symbols.variables()
    .map(|v| (v, symbols.new_set()))
    .collect::<IndexMap<_, _>>();

  let mut buf = symbols.new_set();
  for pass in 1.. {
    let mut changed = false;
    for (_, rule) in grammar.rules() {
      buf.clear();
      let all_nullable = compute_first_for_symbols(&mut buf, symbols, &first,
        &nullable, rule.expansion());
      let set = match first.get_mut(&rule.variable()) {
        Some(set) => set,
        None => continue,
      };
      changed |= set.union_with(&buf);
      if all_nullable {
        changed |= nullable.insert(rule.variable());
      }
    }
    if !changed {
      debug!("nullable and first sets converged after {} passes", pass);
      break;
    }
  }

  (nullable, first)
}

fn compute_first_for_symbols(
  result: &mut SymbolSet,
  symbols: &Symbols,
  first: &IndexMap<Symbol, SymbolSet>,
  nullable: &SymbolSet,
  syms: &[Symbol],
) -> bool {
  for &sym in syms {
    match symbols.kind(sym) {
      Some(SymbolKind::Terminal) => {
        result.insert(sym);
        return false;
      }
      Some(SymbolKind::Variable) => {
        if let Some(set) = first.get(&sym) {
          result.union_with(set);
        }
        if !nullable.contains(sym) {
          return false;
        }
      }
      Some(SymbolKind::Empty) => {}
      None => return false,
    }
  }
  true
}

fn gen_reachable(grammar: &Grammar) -> SymbolSet {
  let symbols = grammar.symbols();
  let mut reachable = symbols.new_set();
  let mut pending = vec![symbols.start()];
  while let Some(var) = pending.pop() {
    if !symbols.is_variable(var) || !reachable.insert(var) {
      continue;
    }
    for (_, rule) in grammar.rules_for(var) {
      pending.extend(rule.expansion().iter().copied()
        .filter(|&sym| symbols.is_variable(sym)));
    }
  }
  reachable
}

fn gen_follow(
  grammar: &Grammar,
  nullable: &SymbolSet,
  reachable: &SymbolSet,
  first: &IndexMap<Symbol, SymbolSet>,
) -> IndexMap<Symbol, SymbolSet> {
  let symbols = grammar.symbols();
  let mut follow = symbols.variables()
    .map(|v| (v, symbols.new_set()))
    .collect::<IndexMap<_, _>>();
  if let Some(set) = follow.get_mut(&symbols.start()) {
    set.insert(symbols.end());
  }

  // FIRST of the symbols to the right of the current position
  let mut trailer = symbols.new_set();
  for pass in 1.. {
    let mut changed = false;
    for (_, rule) in grammar.rules() {
      // rules no derivation from the start can use
      if !reachable.contains(rule.variable()) {
        continue;
      }
      let head_follow = match follow.get(&rule.variable()) {
        Some(set) => set.clone(),
        None => continue,
      };

      trailer.clear();
      let mut nullable_suffix = true;
      for &sym in rule.expansion().iter().rev() {
        match symbols.kind(sym) {
          Some(SymbolKind::Terminal) => {
            trailer.clear();
            trailer.insert(sym);
            nullable_suffix = false;
          }
          Some(SymbolKind::Variable) => {
            if let Some(set) = follow.get_mut(&sym) {
              changed |= set.union_with(&trailer);
              if nullable_suffix {
                changed |= set.union_with(&head_follow);
              }
            }
            if !nullable.contains(sym) {
              trailer.clear();
              nullable_suffix = false;
            }
            if let Some(set) = first.get(&sym) {
              trailer.union_with(set);
            }
          }
          Some(SymbolKind::Empty) | None => {}
        }
      }
    }
    if !changed {
      debug!("follow sets converged after {} passes", pass);
      break;
    }
  }

  follow
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::fixtures::*;
  use pretty_assertions::assert_eq;

  fn members(set: Option<&SymbolSet>) -> Vec<Symbol> {
    set.map(|s| s.iter().collect()).unwrap_or_default()
  }

  #[test]
  fn simple_nullable() {
    let sets = Sets::solve(&simple());
    assert_eq!(sets.nullable().iter().collect::<Vec<_>>(), vec![EMPTY, Y, X]);
    assert!(!sets.is_nullable(Z));
  }

  #[test]
  fn simple_first_follow() {
    let sets = Sets::solve(&simple());
    assert_eq!(members(sets.first(Z)), vec![A, C, D]);
    assert_eq!(members(sets.first(Y)), vec![C]);
    assert_eq!(members(sets.first(X)), vec![A, C]);

    assert_eq!(members(sets.follow(Z)), vec![END]);
    assert_eq!(members(sets.follow(Y)), vec![A, C, D]);
    assert_eq!(members(sets.follow(X)), vec![A, C, D]);
  }

  #[test]
  fn expr_first() {
    let sets = Sets::solve(&expr());
    assert_eq!(members(sets.first(E)), vec![LPAREN, ID]);
    assert_eq!(members(sets.first(T)), vec![LPAREN, ID]);
    assert_eq!(members(sets.first(F)), vec![LPAREN, ID]);
    assert_eq!(members(sets.first(E1)), vec![PLUS]);
    assert_eq!(members(sets.first(T1)), vec![STAR]);
    assert_eq!(sets.nullable().iter().collect::<Vec<_>>(), vec![EMPTY, E1, T1]);
  }

  #[test]
  fn expr_follow() {
    let sets = Sets::solve(&expr());
    assert_eq!(members(sets.follow(E)), vec![RPAREN, END]);
    assert_eq!(members(sets.follow(E1)), vec![RPAREN, END]);
    assert_eq!(members(sets.follow(T)), vec![PLUS, RPAREN, END]);
    assert_eq!(members(sets.follow(T1)), vec![PLUS, RPAREN, END]);
    assert_eq!(members(sets.follow(F)), vec![PLUS, STAR, RPAREN, END]);
  }

  #[test]
  fn follow_skips_nullable_neighbour() {
    let s = Symbol(1);
    let b = Symbol(2);
    let c = Symbol(3);
    let d = Symbol(10);
    let end = Symbol(11);

    // S -> B C d, B -> ε, C -> ε
    let mut grammar = Grammar::new(
      Symbols::new(&[s, b, c], &[d], s, EMPTY, end));
    grammar.add_rule(s, &[b, c, d]);
    grammar.add_rule(b, &[]);
    grammar.add_rule(c, &[]);

    let sets = Sets::solve(&grammar);
    assert_eq!(members(sets.follow(b)), vec![d]);
    assert_eq!(members(sets.follow(c)), vec![d]);
    assert_eq!(members(sets.first(s)), vec![d]);
    assert!(!sets.is_nullable(s));
  }

  #[test]
  fn nullable_through_chain() {
    let s = Symbol(-1);
    let a = Symbol(-2);
    let b = Symbol(-3);
    let end = Symbol(5);

    // S -> A B, A -> B, B -> ε; nullability reaches S on the third pass
    let mut grammar = Grammar::new(
      Symbols::new(&[s, a, b], &[], s, EMPTY, end));
    grammar.add_rule(s, &[a, b]);
    grammar.add_rule(a, &[b]);
    grammar.add_rule(b, &[EMPTY]);

    let sets = Sets::solve(&grammar);
    assert!(sets.is_nullable(s));
    assert!(sets.is_nullable(a));
    assert!(sets.is_nullable(b));
    assert_eq!(members(sets.follow(a)), vec![end]);
  }

  #[test]
  fn unreachable_rules_add_no_follow() {
    let s = Symbol(1);
    let b = Symbol(2);
    let a = Symbol(10);
    let c = Symbol(11);
    let end = Symbol(12);

    // S -> a, B -> S c; nothing derives B
    let mut grammar = Grammar::new(
      Symbols::new(&[s, b], &[a, c], s, EMPTY, end));
    grammar.add_rule(s, &[a]);
    grammar.add_rule(b, &[s, c]);

    let sets = Sets::solve(&grammar);
    assert!(sets.is_reachable(s));
    assert!(!sets.is_reachable(b));
    assert_eq!(members(sets.follow(s)), vec![end]);
    assert_eq!(members(sets.follow(b)), Vec::<Symbol>::new());
    assert_eq!(members(sets.first(b)), vec![a]);
  }
}
