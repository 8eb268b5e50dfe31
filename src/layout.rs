//! Quadrant layout: four fixed screen regions recomputed on resize.
//!
//! Coordinates are in pixels with the origin at the viewport center and
//! +y up, so layout output feeds the orthographic projection directly.

/// One of the four fixed region slots. Slot order is top-left,
/// top-right, bottom-left, bottom-right and never changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Fragment shader entry point bound to this slot for the process
    /// lifetime.
    pub fn fragment_entry(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "fs_rings",
            Quadrant::TopRight => "fs_wave",
            Quadrant::BottomLeft => "fs_strobe",
            Quadrant::BottomRight => "fs_pulse",
        }
    }

    /// Signs of this slot's center offset from the viewport center.
    fn center_signs(self) -> (f32, f32) {
        match self {
            Quadrant::TopLeft => (-1.0, 1.0),
            Quadrant::TopRight => (1.0, 1.0),
            Quadrant::BottomLeft => (-1.0, -1.0),
            Quadrant::BottomRight => (1.0, -1.0),
        }
    }
}

/// Region rectangle: size and center position in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadRect {
    pub width: f32,
    pub height: f32,
    pub center_x: f32,
    pub center_y: f32,
}

/// Compute the four quadrant rectangles for a viewport.
///
/// Each rectangle is half the viewport per axis, centered at
/// (±W/4, ±H/4). Pure function; on resize the whole set is recomputed
/// from scratch rather than adjusted incrementally.
pub fn quadrant_rects(viewport_w: f32, viewport_h: f32) -> [QuadRect; 4] {
    Quadrant::ALL.map(|quadrant| {
        let (sx, sy) = quadrant.center_signs();
        QuadRect {
            width: viewport_w / 2.0,
            height: viewport_h / 2.0,
            center_x: sx * viewport_w / 4.0,
            center_y: sy * viewport_h / 4.0,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_rects_800x600() {
        let rects = quadrant_rects(800.0, 600.0);

        for rect in &rects {
            assert_eq!(rect.width, 400.0);
            assert_eq!(rect.height, 300.0);
        }

        assert_eq!((rects[0].center_x, rects[0].center_y), (-200.0, 150.0));
        assert_eq!((rects[1].center_x, rects[1].center_y), (200.0, 150.0));
        assert_eq!((rects[2].center_x, rects[2].center_y), (-200.0, -150.0));
        assert_eq!((rects[3].center_x, rects[3].center_y), (200.0, -150.0));
    }

    #[test]
    fn test_quadrant_rects_cover_viewport() {
        let (w, h) = (1234.0, 777.0);
        let rects = quadrant_rects(w, h);

        for rect in &rects {
            assert_eq!(rect.width, w / 2.0);
            assert_eq!(rect.height, h / 2.0);
            // Each rect spans from the viewport center out to the edge
            assert_eq!(rect.center_x.abs(), rect.width / 2.0);
            assert_eq!(rect.center_y.abs(), rect.height / 2.0);
        }
    }

    #[test]
    fn test_resize_replaces_all_rects() {
        let before = quadrant_rects(800.0, 600.0);
        let after = quadrant_rects(1000.0, 400.0);

        for (i, rect) in after.iter().enumerate() {
            assert_eq!(rect.width, 500.0);
            assert_eq!(rect.height, 200.0);
            assert_eq!(rect.center_x.abs(), 250.0);
            assert_eq!(rect.center_y.abs(), 100.0);
            // No stale rect from the previous viewport survives
            assert_ne!(*rect, before[i]);
        }

        // Center signs are preserved across the resize
        for (a, b) in after.iter().zip(before.iter()) {
            assert_eq!(a.center_x.signum(), b.center_x.signum());
            assert_eq!(a.center_y.signum(), b.center_y.signum());
        }
    }

    #[test]
    fn test_slot_shader_binding_is_fixed() {
        let entries: Vec<_> = Quadrant::ALL.iter().map(|q| q.fragment_entry()).collect();
        assert_eq!(entries, ["fs_rings", "fs_wave", "fs_strobe", "fs_pulse"]);
    }
}
