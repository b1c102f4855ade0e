#![allow(dead_code)]

use lltab::{Grammar, Symbol, Symbols, Token};

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

pub fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

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
  grammar.add_rule(T1, &[]);
  grammar.add_rule(F, &[ID]);
  grammar.add_rule(F, &[LPAREN, E, RPAREN]);
  grammar
}

pub fn name(sym: Symbol) -> String {
  let name = match sym {
    E => "E",
    E1 => "E'",
    T => "T",
    T1 => "T'",
    F => "F",
    PLUS => "+",
    STAR => "*",
    LPAREN => "(",
    RPAREN => ")",
    ID => "id",
    END => "$",
    _ => return format!("#{}", sym),
  };
  name.to_owned()
}

/// A lexed token carrying its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
  pub kind: Symbol,
  pub text: String,
}

impl Token for Lexeme {
  fn symbol(&self) -> Symbol {
    self.kind
  }

  fn text(&self) -> Option<&str> {
    Some(&self.text)
  }
}

/// Splits on whitespace; anything that is not an operator, parenthesis or
/// `$` is an identifier, except `?` which maps to an undeclared symbol.
pub fn lex(input: &str) -> Vec<Lexeme> {
  input.split_whitespace()
    .map(|word| Lexeme {
      kind: match word {
        "+" => PLUS,
        "*" => STAR,
        "(" => LPAREN,
        ")" => RPAREN,
        "$" => END,
        "?" => Symbol(99),
        _ => ID,
      },
      text: word.to_owned(),
    })
    .collect()
}
