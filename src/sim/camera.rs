//! Camera mapping track space (meters, +y up) onto screen pixels (+y down)

/// Camera defines a view into world space
/// Bounds directly define what the camera sees
#[derive(Debug, Clone)]
pub struct Camera {
    pub bounds: Bounds,
}

impl Camera {
    /// Create camera with explicit world bounds
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self {
            bounds: Bounds { min, max },
        }
    }

    /// Camera that shows `bounds` plus a margin on every side
    pub fn framing(bounds: &Bounds, margin: f32) -> Self {
        Self::new(
            [bounds.min[0] - margin, bounds.min[1] - margin],
            [bounds.max[0] + margin, bounds.max[1] + margin],
        )
    }

    /// Pixels per world unit when fitting the view inside a screen area
    ///
    /// The smaller axis wins so the whole view stays visible.
    pub fn scale_for(&self, screen: &ScreenRect) -> f32 {
        (screen.width / self.bounds.width()).min(screen.height / self.bounds.height())
    }

    /// Maps a world point into the screen area, letterboxed and y-flipped
    pub fn world_to_screen(&self, point: [f32; 2], screen: &ScreenRect) -> [f32; 2] {
        let scale = self.scale_for(screen);
        let center = self.bounds.center();
        let screen_center = screen.center();
        [
            screen_center[0] + (point[0] - center[0]) * scale,
            screen_center[1] - (point[1] - center[1]) * scale,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Bounds {
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f32; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }
}

/// Screen-space rectangle in logical pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_dimensions() {
        let bounds = Bounds::new([-1.0, -2.0], [3.0, 4.0]);
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 6.0);
        assert_eq!(bounds.center(), [1.0, 1.0]);
    }

    #[test]
    fn test_camera_framing_adds_margin() {
        let camera = Camera::framing(&Bounds::new([0.0, 0.0], [10.0, 20.0]), 1.0);
        assert_eq!(camera.bounds.min, [-1.0, -1.0]);
        assert_eq!(camera.bounds.max, [11.0, 21.0]);
    }

    #[test]
    fn test_world_to_screen_flips_y_and_letterboxes() {
        let camera = Camera::new([0.0, 0.0], [10.0, 10.0]);
        // Wide screen: height limits the scale to 10 px per unit
        let screen = ScreenRect::new(0.0, 0.0, 200.0, 100.0);

        assert_eq!(camera.scale_for(&screen), 10.0);
        assert_eq!(camera.world_to_screen([5.0, 5.0], &screen), [100.0, 50.0]);
        assert_eq!(camera.world_to_screen([0.0, 10.0], &screen), [50.0, 0.0]);
        assert_eq!(camera.world_to_screen([10.0, 0.0], &screen), [150.0, 100.0]);
    }
}
