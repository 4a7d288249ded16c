use std::fmt;

use crate::ast::Expr;

/// A parsed filter expression.
///
/// `root` is `None` only for an empty filter string, which matches every
/// record and compiles to an empty SQL fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filtering {
    pub root: Option<Expr>,
}

impl Filtering {
    pub fn new(root: Expr) -> Self {
        Filtering { root: Some(root) }
    }

    /// The filter that matches everything.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl From<Expr> for Filtering {
    fn from(root: Expr) -> Self {
        Filtering::new(root)
    }
}

impl fmt::Display for Filtering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => Ok(()),
        }
    }
}
