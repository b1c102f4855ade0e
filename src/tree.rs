use std::fmt::Write;
use std::ops::Index;
use crate::symbol::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
  fn index(self) -> usize {
    self.0 as usize
  }
}

/// One symbol occurrence of the derivation.
#[derive(Debug)]
pub struct Node<T> {
  symbol: Symbol,
  token: Option<T>,
  parent: Option<NodeId>,
  children: Vec<NodeId>,
}

impl<T> Node<T> {
  pub fn symbol(&self) -> Symbol {
    self.symbol
  }

  /// The matched input token, for terminal nodes that were matched.
  pub fn token(&self) -> Option<&T> {
    self.token.as_ref()
  }

  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  pub fn children(&self) -> &[NodeId] {
    &self.children
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }
}

/// Parse tree stored as an arena of nodes; the root is the start symbol.
#[derive(Debug)]
pub struct ParseTree<T> {
  nodes: Vec<Node<T>>,
}

impl<T> ParseTree<T> {
  pub(crate) fn new(root: Symbol) -> Self {
    Self {
      nodes: vec![Node {
        symbol: root,
        token: None,
        parent: None,
        children: vec![],
      }],
    }
  }

  /// Appends a new last child to `parent`.
  pub(crate) fn add_child(&mut self, parent: NodeId, symbol: Symbol) -> NodeId {
    let id = NodeId(self.nodes.len() as u32);
    self.nodes.push(Node {
      symbol,
      token: None,
      parent: Some(parent),
      children: vec![],
    });
    self.nodes[parent.index()].children.push(id);
    id
  }

  pub(crate) fn attach_token(&mut self, node: NodeId, token: T) {
    self.nodes[node.index()].token = Some(token);
  }

  pub fn root(&self) -> NodeId {
    NodeId(0)
  }

  pub fn node(&self, id: NodeId) -> &Node<T> {
    &self.nodes[id.index()]
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Depth-first, parents before children, children left to right.
  pub fn preorder(&self) -> Preorder<'_, T> {
    Preorder {
      tree: self,
      stack: vec![self.root()],
    }
  }

  /// Attached tokens in input order.
  pub fn tokens(&self) -> impl Iterator<Item = &T> + '_ {
    self.preorder().filter_map(move |id| self.node(id).token())
  }

  /// Indented rendering, one node per line, terminals that carry a token
  /// marked with `*`.
  pub fn dump(&self, name: impl Fn(Symbol) -> String) -> String {
    let mut out = String::new();
    let mut stack = vec![(self.root(), 0)];
    while let Some((id, depth)) = stack.pop() {
      let node = self.node(id);
      let mark = if node.token.is_some() { "*" } else { "" };
      let _ = writeln!(out, "{:indent$}{}{}", "", name(node.symbol), mark,
        indent = depth * 2);
      for &child in node.children.iter().rev() {
        stack.push((child, depth + 1));
      }
    }
    out
  }
}

impl<T> Index<NodeId> for ParseTree<T> {
  type Output = Node<T>;

  fn index(&self, id: NodeId) -> &Node<T> {
    self.node(id)
  }
}

pub struct Preorder<'a, T> {
  tree: &'a ParseTree<T>,
  stack: Vec<NodeId>,
}

impl<'a, T> Iterator for Preorder<'a, T> {
  type Item = NodeId;

  fn next(&mut self) -> Option<NodeId> {
    let id = self.stack.pop()?;
    self.stack.extend(self.tree.node(id).children.iter().rev());
    Some(id)
  }
}
