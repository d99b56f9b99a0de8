//! Turning skrifa outlines into SVG path data

use std::fmt::Write as FmtWrite;

use glyphcut_core::types::InkBox;
use skrifa::outline::OutlinePen;

/// SVG path builder implementing skrifa's OutlinePen
///
/// Coordinates arrive already scaled to the drawing size, y pointing up.
/// The path flips them to y pointing down and remembers how far the
/// points reach.
#[derive(Debug, Default)]
pub struct SvgPathPen {
    commands: String,
    extent: Option<InkBox>,
}

impl SvgPathPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path data and the box around every point visited
    pub fn finish(self) -> (String, Option<InkBox>) {
        (self.commands, self.extent)
    }

    fn point(&mut self, x: f32, y: f32) -> (f32, f32) {
        // Avoid "-0.000" in path data
        let y = if y == 0.0 { 0.0 } else { -y };
        let point = InkBox::new(x, y, x, y);
        self.extent = Some(match self.extent {
            Some(extent) => extent.union(point),
            None => point,
        });
        (x, y)
    }
}

impl OutlinePen for SvgPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        let _ = write!(&mut self.commands, "M{x:.3},{y:.3}");
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        let _ = write!(&mut self.commands, "L{x:.3},{y:.3}");
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (cx, cy) = self.point(cx, cy);
        let (x, y) = self.point(x, y);
        let _ = write!(&mut self.commands, "Q{cx:.3},{cy:.3} {x:.3},{y:.3}");
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.point(cx0, cy0);
        let (cx1, cy1) = self.point(cx1, cy1);
        let (x, y) = self.point(x, y);
        let _ = write!(
            &mut self.commands,
            "C{cx0:.3},{cy0:.3} {cx1:.3},{cy1:.3} {x:.3},{y:.3}"
        );
    }

    fn close(&mut self) {
        self.commands.push('Z');
    }
}
