//! Recorded syntax errors and their textual rendering.

use std::fmt::{self, Display, Formatter};
use crate::symbol::Symbol;

/// One panic episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
  /// Index of the offending token among all tokens passed to the parser.
  pub position: usize,
  pub found: Symbol,
  /// Literal text of the offending token, if it had any.
  pub text: Option<String>,
  /// Stack top that failed to advance.
  pub top: Symbol,
  /// `top` itself if it is a terminal, else every terminal with a table
  /// entry for it.
  pub expected: Vec<Symbol>,
}

/// Append-only, in order of occurrence.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
  records: Vec<ErrorRecord>,
}

impl ErrorLog {
  pub(crate) fn push(&mut self, record: ErrorRecord) {
    self.records.push(record);
  }

  pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
    self.records.iter()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn display<'a, R: Render>(&'a self, renderer: &'a R) -> DisplayLog<'a, R> {
    DisplayLog {
      log: self,
      renderer,
    }
  }
}

impl<'a> IntoIterator for &'a ErrorLog {
  type Item = &'a ErrorRecord;
  type IntoIter = std::slice::Iter<'a, ErrorRecord>;

  fn into_iter(self) -> Self::IntoIter {
    self.records.iter()
  }
}

/// Turns a record into text.
pub trait Render {
  fn render(&self, record: &ErrorRecord, f: &mut Formatter) -> fmt::Result;
}

/// Renders `error at token N: unexpected X, expected Y`, naming symbols with
/// the wrapped function.
pub struct Plain<N>(pub N);

impl<N> Render for Plain<N>
where
  N: Fn(Symbol) -> String,
{
  fn render(&self, record: &ErrorRecord, f: &mut Formatter) -> fmt::Result {
    let name = &self.0;
    write!(f, "error at token {}: unexpected ", record.position)?;
    match &record.text {
      Some(text) => write!(f, "`{}`", text)?,
      None => write!(f, "{}", name(record.found))?,
    }
    match record.expected.as_slice() {
      [] => Ok(()),
      [one] => write!(f, ", expected {}", name(*one)),
      many => {
        write!(f, ", expected one of: ")?;
        for (i, &sym) in many.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{}", name(sym))?;
        }
        Ok(())
      }
    }
  }
}

pub struct DisplayLog<'a, R> {
  log: &'a ErrorLog,
  renderer: &'a R,
}

impl<'a, R: Render> Display for DisplayLog<'a, R> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for record in self.log {
      self.renderer.render(record, f)?;
      writeln!(f)?;
    }
    Ok(())
  }
}
