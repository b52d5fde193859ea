//! Drawable polylines kept alongside strokes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
}

impl PathCommand {
    pub fn position(&self) -> (f32, f32) {
        match *self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => (x, y),
        }
    }
}

/// Polyline for one stroke: a single `MoveTo` followed by `LineTo` segments.
///
/// Display only. It holds exactly one command per stroke point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPath {
    commands: Vec<PathCommand>,
}

impl RenderPath {
    pub(crate) fn move_to(x: f32, y: f32) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo { x, y }],
        }
    }

    pub(crate) fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let mut iter = self.commands.iter().map(PathCommand::position);
        let (x, y) = iter.next()?;
        Some(iter.fold((x, y, x, y), |(min_x, min_y, max_x, max_y), (x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_starts_with_move_to() {
        let mut path = RenderPath::move_to(1.0, 1.0);
        path.line_to(4.0, -2.0);

        assert_eq!(path.len(), 2);
        assert!(matches!(path.commands()[0], PathCommand::MoveTo { .. }));
        assert!(matches!(path.commands()[1], PathCommand::LineTo { .. }));
    }

    #[test]
    fn test_bounds_cover_every_segment() {
        let mut path = RenderPath::move_to(1.0, 1.0);
        path.line_to(4.0, -2.0);
        path.line_to(-3.0, 6.0);

        assert_eq!(path.bounds(), Some((-3.0, -2.0, 4.0, 6.0)));
    }
}
