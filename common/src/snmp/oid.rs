//! # Object Identifiers
//!
//! A dotted sequence of non-negative integers naming a scalar value or a table
//! column. Ordering is component-wise, which is the order agents answer
//! get-next requests in.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("invalid component '{component}' in identifier '{input}'")]
    InvalidComponent { input: String, component: String },
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(Vec<u32>);

impl Identifier {
    pub fn from_slice(components: &[u32]) -> Self {
        Self(components.to_vec())
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// True when `self` lies inside the subtree rooted at `prefix`.
    /// An identifier is inside its own subtree.
    pub fn starts_with(&self, prefix: &Identifier) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Components left after removing `prefix`, or `None` outside the subtree.
    pub fn suffix_after(&self, prefix: &Identifier) -> Option<&[u32]> {
        self.0.strip_prefix(prefix.0.as_slice())
    }

    pub fn child(&self, component: u32) -> Identifier {
        let mut components = self.0.clone();
        components.push(component);
        Identifier(components)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    /// Parses "1.3.6.1.2.1.1.5.0". A single leading dot is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(IdentifierError::Empty);
        }

        body.split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| IdentifierError::InvalidComponent {
                        input: s.to_string(),
                        component: part.to_string(),
                    })
            })
            .collect::<Result<Vec<u32>, _>>()
            .map(Identifier)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.0.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, ".{part}")?;
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
