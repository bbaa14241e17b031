/// Dispatch outcomes and the observer channels they are published on

use serde::{Deserialize, Serialize};

/// A drawn gesture matched a bound command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMatched {
    pub command_id: String,
    pub gesture: String,
}

/// A drawn gesture that nothing is bound to. Not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureUnmatched {
    pub gesture: String,
}

/// Result of dispatching one trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Matched(CommandMatched),
    Unmatched(GestureUnmatched),
}

impl Outcome {
    pub fn gesture(&self) -> &str {
        match self {
            Outcome::Matched(m) => &m.gesture,
            Outcome::Unmatched(u) => &u.gesture,
        }
    }

    pub fn command_id(&self) -> Option<&str> {
        match self {
            Outcome::Matched(m) => Some(&m.command_id),
            Outcome::Unmatched(_) => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched(_))
    }
}

pub type MatchedObserver = Box<dyn FnMut(&CommandMatched)>;
pub type UnmatchedObserver = Box<dyn FnMut(&GestureUnmatched)>;

/// Subscribers for both channels, called in registration order
#[derive(Default)]
pub struct Observers {
    matched: Vec<MatchedObserver>,
    unmatched: Vec<UnmatchedObserver>,
}

impl Observers {
    pub fn on_matched(&mut self, observer: impl FnMut(&CommandMatched) + 'static) {
        self.matched.push(Box::new(observer));
    }

    pub fn on_unmatched(&mut self, observer: impl FnMut(&GestureUnmatched) + 'static) {
        self.unmatched.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.matched.clear();
        self.unmatched.clear();
    }

    /// Deliver `outcome` to every subscriber of its channel, and only that channel
    pub fn publish(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Matched(event) => {
                for observer in self.matched.iter_mut() {
                    observer(event);
                }
            }
            Outcome::Unmatched(event) => {
                for observer in self.unmatched.iter_mut() {
                    observer(event);
                }
            }
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("matched", &self.matched.len())
            .field("unmatched", &self.unmatched.len())
            .finish()
    }
}
