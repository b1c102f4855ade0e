use thiserror::Error;
use crate::symbol::Symbol;

/// Reasons a grammar cannot be turned into a parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
  #[error("symbol {0} is declared both as terminal and variable")]
  Overlap(Symbol),

  #[error("start symbol {0} is not a declared variable")]
  StartNotVariable(Symbol),

  #[error("empty symbol {0} must not be declared as terminal or variable")]
  EmptyDeclared(Symbol),

  #[error("rule head {0} is not a declared variable")]
  NotAVariable(Symbol),

  #[error("rule for {variable} uses undeclared symbol {symbol}")]
  UnknownSymbol {
    variable: Symbol,
    symbol: Symbol,
  },
}
