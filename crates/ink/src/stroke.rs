//! Points, strokes and the ink payload submitted for recognition.

use crate::error::InkError;
use serde::{Deserialize, Serialize};

/// A single sampled pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Wall-clock time the sample was taken, in milliseconds.
    pub timestamp_ms: i64,
}

impl Point {
    pub fn new(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// One continuous pointer-down-to-up gesture.
///
/// Points are kept in capture order. A stroke is never empty: it is created
/// from its first point and only [`StrokeCapture`](crate::StrokeCapture) can
/// append to it while the gesture is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub(crate) fn begin(first: Point) -> Self {
        Self {
            points: vec![first],
        }
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a captured stroke.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A tap without drag.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() == 1
    }

    /// Elapsed time between the first and last sample.
    pub fn duration_ms(&self) -> i64 {
        self.last().timestamp_ms - self.first().timestamp_ms
    }
}

impl TryFrom<Vec<Point>> for Stroke {
    type Error = InkError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        if points.is_empty() {
            return Err(InkError::EmptyStroke);
        }
        Ok(Self { points })
    }
}

impl From<Stroke> for Vec<Point> {
    fn from(stroke: Stroke) -> Self {
        stroke.points
    }
}

/// Ordered strokes handed to the recognizer as one request.
///
/// Stroke order is significant: recognizers use it as a temporal and spatial
/// hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InkPayload {
    strokes: Vec<Stroke>,
}

impl InkPayload {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    /// Snapshot a slice of committed strokes.
    pub fn from_strokes(strokes: &[Stroke]) -> Self {
        Self {
            strokes: strokes.to_vec(),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_rejects_empty_points() {
        assert_eq!(Stroke::try_from(Vec::new()), Err(InkError::EmptyStroke));
    }

    #[test]
    fn test_stroke_deserialize_rejects_empty_array() {
        let result: Result<Stroke, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_stroke_serializes_as_point_list() {
        let mut stroke = Stroke::begin(Point::new(1.0, 2.0, 100));
        stroke.push(Point::new(3.0, 4.0, 116));

        let json = serde_json::to_value(&stroke).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["timestamp_ms"], 116);
    }

    #[test]
    fn test_stroke_duration_and_degenerate() {
        let tap = Stroke::begin(Point::new(0.0, 0.0, 50));
        assert!(tap.is_degenerate());
        assert_eq!(tap.duration_ms(), 0);

        let mut drag = Stroke::begin(Point::new(0.0, 0.0, 50));
        drag.push(Point::new(5.0, 5.0, 80));
        assert!(!drag.is_degenerate());
        assert_eq!(drag.duration_ms(), 30);
    }

    #[test]
    fn test_payload_counts_points_across_strokes() {
        let mut first = Stroke::begin(Point::new(0.0, 0.0, 0));
        first.push(Point::new(1.0, 0.0, 10));
        let second = Stroke::begin(Point::new(5.0, 5.0, 40));

        let payload = InkPayload::from_strokes(&[first, second]);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.point_count(), 3);
        assert!(!payload.is_empty());
        assert!(InkPayload::default().is_empty());
    }
}
