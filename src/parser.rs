use crate::error::InitError;
use crate::grammar::Grammar;
use crate::report::{ErrorLog, ErrorRecord, Render};
use crate::symbol::{Symbol, SymbolKind};
use crate::tree::{NodeId, ParseTree};

mod bitset;
pub mod sets;
pub mod symbol_set;
pub mod table;

use sets::Sets;
use table::ParseTable;

/// Input accepted by [`Parser::step`].
pub trait Token {
  /// The terminal this token stands for.
  fn symbol(&self) -> Symbol;

  /// Literal source text, used in diagnostics only.
  fn text(&self) -> Option<&str> {
    None
  }
}

impl Token for Symbol {
  fn symbol(&self) -> Symbol {
    *self
  }
}

/// Outcome of a single [`Parser::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  /// The token was consumed; feed the next one.
  MoreInput,
  /// `end` was matched and no error was ever recorded.
  Success,
  /// Syntax error; the token was dropped and recovery is under way.
  Fail,
  /// The token does not map to a declared terminal. Nothing changed.
  UnknownInput,
  /// The derivation is over. Returned when `end` is matched after errors
  /// were recorded, when the stack has run empty, and for every call after
  /// that.
  Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Ready,
  Running,
  Halted,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
  symbol: Symbol,
  /// `None` for the `end` sentinel
  node: Option<NodeId>,
}

/// Streaming LL(1) parser fed one token per [`step`](Parser::step).
#[derive(Debug)]
pub struct Parser<T> {
  grammar: Grammar,
  sets: Sets,
  table: ParseTable,
  stack: Vec<Frame>,
  tree: Option<ParseTree<T>>,
  errors: ErrorLog,
  state: State,
  panicking: bool,
  position: usize,
}

impl<T: Token> Parser<T> {
  pub(crate) fn new(grammar: Grammar) -> Result<Self, InitError> {
    grammar.validate()?;

    let sets = Sets::solve(&grammar);
    let table = ParseTable::build(&grammar, &sets);
    info!(
      "grammar has {} rules, {} variables, {} terminals, {} table entries",
      grammar.len(),
      grammar.symbols().variables().count(),
      grammar.symbols().terminals().count(),
      table.len(),
    );

    let symbols = grammar.symbols();
    let tree = ParseTree::new(symbols.start());
    let stack = vec![
      Frame {
        symbol: symbols.end(),
        node: None,
      },
      Frame {
        symbol: symbols.start(),
        node: Some(tree.root()),
      },
    ];

    Ok(Parser {
      grammar,
      sets,
      table,
      stack,
      tree: Some(tree),
      errors: ErrorLog::default(),
      state: State::Ready,
      panicking: false,
      position: 0,
    })
  }

  /// Advances the derivation with one token. Expands as many variables as
  /// needed and returns once the token is consumed, rejected or the parse
  /// is over. The token ends up either attached to the tree or dropped.
  pub fn step(&mut self, token: T) -> Status {
    let position = self.position;
    self.position += 1;

    if self.state == State::Halted {
      return Status::Halted;
    }

    let lookahead = token.symbol();
    if !self.grammar.symbols().is_terminal(lookahead) {
      debug!("token {} at {} is not a terminal", lookahead, position);
      return Status::UnknownInput;
    }
    self.state = State::Running;

    let symbols = self.grammar.symbols();
    let end = symbols.end();
    // (variable, stack depth below it) for each expansion done on this
    // lookahead whose lower frames are still untouched
    let mut expanded: Vec<(Symbol, usize)> = Vec::new();
    loop {
      let top = match self.stack.last() {
        Some(&frame) => frame,
        None => {
          self.state = State::Halted;
          return Status::Halted;
        }
      };

      match symbols.kind(top.symbol) {
        Some(SymbolKind::Terminal) if top.symbol == lookahead => {
          self.stack.pop();
          self.panicking = false;
          trace!("match {} at {}", lookahead, position);

          if lookahead == end {
            self.state = State::Halted;
            return if self.errors.is_empty() {
              Status::Success
            } else {
              Status::Halted
            };
          }

          if let (Some(node), Some(tree)) = (top.node, self.tree.as_mut()) {
            tree.attach_token(node, token);
          }
          return Status::MoreInput;
        }
        Some(SymbolKind::Terminal) => {
          self.record(&token, top.symbol, position);
          self.stack.pop();
          return Status::Fail;
        }
        Some(SymbolKind::Variable) => {
          // the same variable back on top above its own earlier expansion
          // would expand the same way again without end
          let depth = self.stack.len();
          let cycle = expanded.iter()
            .any(|&(sym, below)| sym == top.symbol && below < depth);
          match self.table.get(top.symbol, lookahead).filter(|_| !cycle) {
            Some(id) => {
              self.stack.pop();
              let below = self.stack.len();
              expanded.retain(|&(_, floor)| floor <= below);
              expanded.push((top.symbol, below));
              let rule = self.grammar.rule(id);
              trace!("expand {}", rule);

              // children are created left to right, then the new frames
              // are flipped so the first symbol ends on top
              let base = self.stack.len();
              for &sym in rule.expansion() {
                if symbols.kind(sym) == Some(SymbolKind::Empty) {
                  continue;
                }
                let node = match (top.node, self.tree.as_mut()) {
                  (Some(parent), Some(tree)) => Some(tree.add_child(parent, sym)),
                  _ => None,
                };
                self.stack.push(Frame {
                  symbol: sym,
                  node,
                });
              }
              self.stack[base..].reverse();
            }
            None => {
              if cycle {
                warn!("{} re-expands itself on {} at {}", top.symbol,
                  lookahead, position);
              }
              self.record(&token, top.symbol, position);
              let sync = self.sets.follow(top.symbol)
                .map_or(false, |follow| follow.contains(lookahead));
              if sync {
                debug!("resynchronized on {} by skipping {}", lookahead,
                  top.symbol);
                self.stack.pop();
                self.panicking = false;
              }
              return Status::Fail;
            }
          }
        }
        Some(SymbolKind::Empty) | None => {
          self.stack.pop();
          let below = self.stack.len();
          expanded.retain(|&(_, floor)| floor <= below);
        }
      }
    }
  }

  /// Steps through `tokens` until the parse halts or the input runs out.
  /// Returns the last status.
  pub fn parse<I>(&mut self, tokens: I) -> Status
  where
    I: IntoIterator<Item = T>,
  {
    let mut status = if self.state == State::Halted {
      Status::Halted
    } else {
      Status::MoreInput
    };
    for token in tokens {
      status = self.step(token);
      if self.state == State::Halted {
        break;
      }
    }
    status
  }

  /// Opens a panic episode, logging it unless one is already open.
  fn record(&mut self, token: &T, top: Symbol, position: usize) {
    if self.panicking {
      debug!("discarding {} at {}", token.symbol(), position);
      return;
    }
    self.panicking = true;

    let expected = if self.grammar.symbols().is_terminal(top) {
      vec![top]
    } else {
      self.table.expected(top)
    };
    debug!("syntax error at {}: found {}, top {}", position, token.symbol(),
      top);
    self.errors.push(ErrorRecord {
      position,
      found: token.symbol(),
      text: token.text().map(str::to_owned),
      top,
      expected,
    });
  }

  pub fn state(&self) -> State {
    self.state
  }

  /// Whether a panic episode is open.
  pub fn panicking(&self) -> bool {
    self.panicking
  }

  /// Hands the tree over once the parse has halted, with or without
  /// errors. Returns `None` before that and on every later call.
  pub fn take_parse_tree(&mut self) -> Option<ParseTree<T>> {
    if self.state == State::Halted {
      self.tree.take()
    } else {
      None
    }
  }

  pub fn errors(&self) -> &ErrorLog {
    &self.errors
  }

  pub fn print_errors<R: Render>(&self, renderer: &R) {
    eprint!("{}", self.errors.display(renderer));
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn sets(&self) -> &Sets {
    &self.sets
  }

  pub fn table(&self) -> &ParseTable {
    &self.table
  }

  /// Number of tokens passed to `step` so far.
  pub fn position(&self) -> usize {
    self.position
  }
}
