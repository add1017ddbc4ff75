//! Three-valued logic for gating decisions.

use serde::Serialize;
use std::fmt;

/// A boolean that may also be `Unknown`.
///
/// `Unknown` is distinct from both `Yes` and `No`. Gating treats only `Yes`
/// as set, via [`Tristate::is_yes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tristate {
    Yes,
    No,
    Unknown,
}

impl Tristate {
    /// True only for `Yes`.
    pub fn is_yes(self) -> bool {
        self == Tristate::Yes
    }
}

impl From<bool> for Tristate {
    fn from(value: bool) -> Self {
        if value { Tristate::Yes } else { Tristate::No }
    }
}

impl fmt::Display for Tristate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tristate::Yes => write!(f, "Yes"),
            Tristate::No => write!(f, "No"),
            Tristate::Unknown => write!(f, "Unknown"),
        }
    }
}
