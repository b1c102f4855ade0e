//! Table-driven LL(1) parsing: grammar analysis (nullable, FIRST, FOLLOW,
//! parse table) and a streaming predictive parser with panic-mode recovery.

#[macro_use]
extern crate log;

pub mod error;
pub mod grammar;
pub mod parser;
pub mod report;
pub mod symbol;
pub mod tree;

pub use error::InitError;
pub use grammar::{Grammar, Rule, RuleId};
pub use parser::{Parser, State, Status, Token};
pub use parser::sets::Sets;
pub use parser::symbol_set::{SymbolRange, SymbolSet};
pub use parser::table::{Conflict, ParseTable};
pub use report::{ErrorLog, ErrorRecord, Plain, Render};
pub use symbol::{Symbol, SymbolKind, Symbols};
pub use tree::{Node, NodeId, ParseTree};

pub fn build<T: Token>(grammar: Grammar) -> Result<Parser<T>, InitError> {
  grammar.initialize()
}
