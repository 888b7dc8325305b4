//! The two rated parties.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parent {
    Mama,
    Papa,
}

impl Parent {
    /// Both parents, in display order.
    pub const ALL: [Parent; 2] = [Parent::Mama, Parent::Papa];

    /// Returns the other parent.
    pub fn other(&self) -> Parent {
        match self {
            Parent::Mama => Parent::Papa,
            Parent::Papa => Parent::Mama,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Parent::Mama => "Mama",
            Parent::Papa => "Papa",
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
