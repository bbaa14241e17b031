/// Gesture model
///
/// A gesture is an ordered run of direction symbols. Its string form
/// (e.g. "LUR") is what gets bound to commands and compared.

use super::direction::Symbol;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordered symbol sequence, serialized as its gesture string
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Gesture {
    symbols: Vec<Symbol>,
}

impl Gesture {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Canonical textual form, one character per symbol
    pub fn gesture_string(&self) -> String {
        self.symbols.iter().map(Symbol::as_char).collect()
    }

    /// Append `symbol` unless it repeats the last one
    pub(crate) fn push_collapsed(&mut self, symbol: Symbol) {
        if self.symbols.last() != Some(&symbol) {
            self.symbols.push(symbol);
        }
    }

    /// Copy of this gesture with consecutive repeats collapsed
    pub fn collapsed(&self) -> Self {
        let mut out = Gesture::default();
        for symbol in &self.symbols {
            out.push_collapsed(*symbol);
        }
        out
    }

    /// True when only U/D/L/R appear, i.e. the string is something the
    /// recognizer could have produced with unrecognized segments dropped
    pub fn is_canonical(&self) -> bool {
        self.symbols.iter().all(Symbol::is_recognized)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gesture_string())
    }
}

/// Parsing never fails: unknown characters become `Unrecognized`
impl FromStr for Gesture {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            symbols: s.chars().map(Symbol::from).collect(),
        })
    }
}

impl From<&str> for Gesture {
    fn from(s: &str) -> Self {
        Self {
            symbols: s.chars().map(Symbol::from).collect(),
        }
    }
}

impl From<String> for Gesture {
    fn from(s: String) -> Self {
        Gesture::from(s.as_str())
    }
}

impl From<Gesture> for String {
    fn from(gesture: Gesture) -> Self {
        gesture.gesture_string()
    }
}
