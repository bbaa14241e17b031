// Points and jitter filtering
//
// A captured trace is full of tiny wobbles from the hand. We throw away every
// point that didn't move far enough from the last one we kept.

use crate::error::{GestureError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// Anything closer than this on both axes is hand shake
pub const DEFAULT_MIN_DELTA: i32 = 6;

/// One pointer sample in screen coordinates (positive Y goes down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a point from canvas coordinates, truncating toward zero
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }

    /// Shift by `(dx, dy)`, clamping at the edges of the coordinate space
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Offset from `self` to `other`, widened so far-apart points can't overflow
    pub fn delta(&self, other: &Point) -> (i64, i64) {
        (
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
        )
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Drop points that are within `min_delta` of the last retained point on both axes.
///
/// The first point always survives, so the result is never empty.
pub fn filter(points: &[Point], min_delta: i32) -> Result<Vec<Point>> {
    let first = points
        .first()
        .ok_or_else(|| GestureError::InvalidInput("point trace is empty".to_string()))?;

    let min_delta = i64::from(min_delta);
    let mut last = *first;
    let mut filtered = vec![last];

    for point in &points[1..] {
        let (dx, dy) = last.delta(point);

        if dx.abs() < min_delta && dy.abs() < min_delta {
            continue;
        }
        filtered.push(*point);
        last = *point;
    }

    Ok(filtered)
}

// Compiled once, shared by every parse
fn point_regex() -> Result<&'static Regex> {
    static POINT: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    POINT
        .get_or_init(|| Regex::new(r"^\(?(-?\d+),(-?\d+)\)?$"))
        .as_ref()
        .map_err(|e| GestureError::InvalidInput(format!("point pattern: {}", e)))
}

/// Parse a trace written as whitespace-separated `x,y` pairs, e.g. `"0,0 0,20 (20,20)"`
pub fn parse_trace(input: &str) -> Result<Vec<Point>> {
    let regex = point_regex()?;

    input
        .split_whitespace()
        .map(|token| -> Result<Point> {
            let caps = regex.captures(token).ok_or_else(|| {
                GestureError::InvalidInput(format!("'{}' is not an x,y point", token))
            })?;
            let coord = |i: usize| {
                caps[i].parse::<i32>().map_err(|_| {
                    GestureError::InvalidInput(format!("coordinate out of range in '{}'", token))
                })
            };
            Ok(Point::new(coord(1)?, coord(2)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_filter_empty_trace() {
        match filter(&[], DEFAULT_MIN_DELTA) {
            Err(GestureError::InvalidInput(_)) => {}
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_keeps_first_point() {
        let filtered = filter(&pts(&[(3, 4)]), DEFAULT_MIN_DELTA).unwrap();
        assert_eq!(filtered, pts(&[(3, 4)]));
    }

    #[test]
    fn test_filter_drops_jitter() {
        let filtered = filter(&pts(&[(0, 0), (2, 2), (4, 4)]), DEFAULT_MIN_DELTA).unwrap();
        assert_eq!(filtered, pts(&[(0, 0)]));
    }

    #[test]
    fn test_filter_compares_against_last_retained() {
        // (5,0) is dropped, (10,0) is 10 away from (0,0) and kept,
        // (14,3) is only 4 away from (10,0) and dropped
        let filtered = filter(
            &pts(&[(0, 0), (5, 0), (10, 0), (14, 3), (16, 0)]),
            DEFAULT_MIN_DELTA,
        )
        .unwrap();
        assert_eq!(filtered, pts(&[(0, 0), (10, 0), (16, 0)]));
    }

    #[test]
    fn test_filter_threshold_is_inclusive() {
        let filtered = filter(&pts(&[(0, 0), (0, 6), (5, 11)]), DEFAULT_MIN_DELTA).unwrap();
        assert_eq!(filtered, pts(&[(0, 0), (0, 6)]));
    }

    #[test]
    fn test_filter_extreme_coordinates() {
        let filtered = filter(
            &pts(&[(i32::MIN, 0), (0, 0), (i32::MAX, i32::MIN), (i32::MAX, i32::MIN + 3)]),
            DEFAULT_MIN_DELTA,
        )
        .unwrap();
        assert_eq!(filtered, pts(&[(i32::MIN, 0), (0, 0), (i32::MAX, i32::MIN)]));
    }

    #[test]
    fn test_delta_is_widened() {
        let a = Point::new(i32::MIN, i32::MAX);
        let b = Point::new(i32::MAX, i32::MIN);
        assert_eq!(a.delta(&b), (u32::MAX as i64, -(u32::MAX as i64)));
    }

    #[test]
    fn test_translate_saturates() {
        let p = Point::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(p.translate(10, -10), Point::new(i32::MAX, i32::MIN));
        assert_eq!(p.translate(1, -1), Point::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_from_f64_truncates() {
        assert_eq!(Point::from_f64(12.9, -3.7), Point::new(12, -3));
    }

    #[test]
    fn test_parse_trace() {
        let points = parse_trace("0,0  0,20 (20,20)").unwrap();
        assert_eq!(points, pts(&[(0, 0), (0, 20), (20, 20)]));

        let points = parse_trace("-5,7").unwrap();
        assert_eq!(points, pts(&[(-5, 7)]));

        assert!(parse_trace("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_trace_rejects_garbage() {
        match parse_trace("0,0 up") {
            Err(GestureError::InvalidInput(msg)) => assert!(msg.contains("up")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_trace_coordinate_out_of_range() {
        match parse_trace("0,0 99999999999,0") {
            Err(GestureError::InvalidInput(msg)) => assert!(msg.contains("out of range")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let points = parse_trace("-2147483648,0 2147483647,0").unwrap();
        assert_eq!(points, pts(&[(i32::MIN, 0), (i32::MAX, 0)]));
    }
}
