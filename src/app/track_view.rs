//! Paints the track and vehicle with egui shapes

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke};

use crate::sim::camera::{Camera, ScreenRect};
use crate::sim::race::RaceSimulation;
use crate::sim::track::Rect2;

/// World units shown around the track
const VIEW_MARGIN: f32 = 1.0;

const WALL_FILL: Color32 = Color32::from_rgb(140, 140, 150);
const GOAL_FILL: Color32 = Color32::from_rgb(60, 200, 90);
const VEHICLE_FILL: Color32 = Color32::from_rgb(230, 120, 40);
const VEHICLE_STROKE: Color32 = Color32::from_rgb(255, 220, 180);

/// Converts track geometry into screen shapes for one frame
pub struct TrackView {
    camera: Camera,
    screen: ScreenRect,
}

impl TrackView {
    /// View fitting the whole track of `race` into `rect`
    pub fn new(race: &RaceSimulation, rect: Rect) -> Self {
        Self {
            camera: Camera::framing(&race.track().bounds(), VIEW_MARGIN),
            screen: ScreenRect::new(rect.left(), rect.top(), rect.width(), rect.height()),
        }
    }

    fn to_screen(&self, point: [f32; 2]) -> Pos2 {
        let [x, y] = self.camera.world_to_screen(point, &self.screen);
        Pos2::new(x, y)
    }

    fn rect_shape(&self, rect: &Rect2, fill: Color32) -> Shape {
        let [min_x, min_y] = rect.min();
        let [max_x, max_y] = rect.max();
        // y flips, so world max.y lands on the screen top edge
        let screen = Rect::from_two_pos(self.to_screen([min_x, max_y]), self.to_screen([max_x, min_y]));
        Shape::rect_filled(screen, 0.0, fill)
    }

    /// Every shape making up the scene, back to front
    pub fn shapes(&self, race: &RaceSimulation) -> Vec<Shape> {
        let track = race.track();
        let mut shapes = Vec::with_capacity(track.walls.len() + 2);

        shapes.push(self.rect_shape(&track.goal, GOAL_FILL));
        for wall in &track.walls {
            shapes.push(self.rect_shape(&wall.rect(), WALL_FILL));
        }

        let outline: Vec<Pos2> = race
            .physics()
            .vehicle_outline()
            .into_iter()
            .map(|p| self.to_screen(p))
            .collect();
        shapes.push(Shape::convex_polygon(
            outline,
            VEHICLE_FILL,
            Stroke::new(1.5, VEHICLE_STROKE),
        ));

        shapes
    }

    pub fn paint(&self, painter: &Painter, race: &RaceSimulation) {
        painter.extend(self.shapes(race));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::race::RaceConfig;

    #[test]
    fn test_scene_has_goal_walls_and_vehicle() {
        let race = RaceSimulation::new(RaceConfig::default()).unwrap();
        let view = TrackView::new(&race, Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 800.0)));

        let shapes = view.shapes(&race);
        assert_eq!(shapes.len(), race.track().walls.len() + 2);
    }

    #[test]
    fn test_track_fits_inside_screen() {
        let race = RaceSimulation::new(RaceConfig::default()).unwrap();
        let screen = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(640.0, 480.0));
        let view = TrackView::new(&race, screen);

        let bounds = race.track().bounds();
        for corner in [bounds.min, bounds.max] {
            let pos = view.to_screen(corner);
            assert!(screen.expand(0.5).contains(pos), "{pos:?} outside {screen:?}");
        }
    }
}
