/// Core recognition modules
///
/// Everything needed to go from a raw pointer trace to a gesture string:
/// point filtering, direction classification and run collapsing.

pub mod direction;
pub mod geometry;
pub mod gesture;
pub mod recognizer;

pub use direction::{classify, Symbol};
pub use geometry::{filter, parse_trace, Point, DEFAULT_MIN_DELTA};
pub use gesture::Gesture;
pub use recognizer::GestureRecognizer;
