/// Direction classification
///
/// Turns one segment of a trace into a single compass symbol.

use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// One stroke direction inside a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Up,
    Down,
    Left,
    Right,
    Unrecognized,
}

impl Symbol {
    /// Get the single-character form used in gesture strings
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Up => 'U',
            Symbol::Down => 'D',
            Symbol::Left => 'L',
            Symbol::Right => 'R',
            Symbol::Unrecognized => '?',
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Symbol::Unrecognized)
    }
}

/// Anything that isn't U, D, L or R parses as Unrecognized
impl From<char> for Symbol {
    fn from(c: char) -> Self {
        match c {
            'U' => Symbol::Up,
            'D' => Symbol::Down,
            'L' => Symbol::Left,
            'R' => Symbol::Right,
            _ => Symbol::Unrecognized,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Classify the segment from `a` to `b`.
///
/// The dominant axis wins. Equal axis deltas (a perfect diagonal, or no
/// movement at all) are ambiguous and come back as `Unrecognized`.
pub fn classify(a: Point, b: Point) -> Symbol {
    let (dx, dy) = a.delta(&b);

    if dx.abs() == dy.abs() {
        return Symbol::Unrecognized;
    }

    if dx.abs() > dy.abs() {
        if dx > 0 {
            Symbol::Right
        } else {
            Symbol::Left
        }
    } else if dy > 0 {
        // screen coordinates, y grows downward
        Symbol::Down
    } else {
        Symbol::Up
    }
}
