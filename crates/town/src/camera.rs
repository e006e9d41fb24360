//! Pan/zoom viewport and the isometric projection between cells and pixels.
//!
//! World pixels put the top corner of cell `(x, y)` at
//! `((x - y) * 64, (x + y) * 32)`, with screen y growing downwards. The
//! viewport is centred on `center` and shows `screen * zoom` world pixels.

use bevy::math::{Rect, Vec2};
use bevy::prelude::*;

use crate::config::{
    BUILDING_LAYERS, CHUNK_SIZE, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH,
    ISOMETRIC_HALF_HEIGHT, ISOMETRIC_HALF_WIDTH, LAYER_HEIGHT, MAX_ZOOM, MIN_ZOOM,
    WHEEL_ZOOM_DIVISOR, WORLD_SIZE,
};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Viewport {
    /// World pixel shown at the middle of the screen.
    pub center: Vec2,
    /// World pixels per screen pixel; larger means further out.
    pub zoom: f32,
    /// Screen size in pixels.
    pub screen: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        let mid = WORLD_SIZE as f32 / 2.0;
        Self {
            center: Self::cell_to_world(mid, mid),
            zoom: 1.0,
            screen: Vec2::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT),
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f32 {
        1.0 / self.zoom
    }

    /// Drags the view by `delta` screen pixels.
    pub fn translate(&mut self, delta: Vec2) {
        self.center -= delta * self.zoom;
    }

    /// Applies a mouse-wheel step. The change is dropped, and `false`
    /// returned, when it would leave the zoom range.
    pub fn zoom_by_wheel(&mut self, wheel_delta: f32) -> bool {
        let zoom = self.zoom - wheel_delta / (self.scale() * WHEEL_ZOOM_DIVISOR);
        if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            self.zoom = zoom;
            true
        } else {
            false
        }
    }

    /// World-pixel rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let half = self.screen * self.zoom / 2.0;
        Rect::from_corners(self.center - half, self.center + half)
    }

    pub fn cell_to_world(x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x - y) * ISOMETRIC_HALF_WIDTH,
            (x + y) * ISOMETRIC_HALF_HEIGHT,
        )
    }

    /// Cell whose ground diamond contains world pixel `p`.
    pub fn world_to_cell(p: Vec2) -> (i32, i32) {
        let a = p.x / ISOMETRIC_HALF_WIDTH;
        let b = p.y / ISOMETRIC_HALF_HEIGHT;
        (((a + b) / 2.0).floor() as i32, ((b - a) / 2.0).floor() as i32)
    }

    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        self.center + (screen_pos - self.screen / 2.0) * self.zoom
    }

    /// Cell under a cursor, used to anchor pending placements.
    pub fn screen_to_cell(&self, screen_pos: Vec2) -> (i32, i32) {
        Self::world_to_cell(self.screen_to_world(screen_pos))
    }

    /// World-pixel box covering every sprite a chunk can draw, including the
    /// full building height above its top row.
    pub fn chunk_bounds(cx: usize, cy: usize) -> Rect {
        let x0 = (cx * CHUNK_SIZE) as f32;
        let y0 = (cy * CHUNK_SIZE) as f32;
        let c = CHUNK_SIZE as f32;
        let left = (x0 - y0 - c) * ISOMETRIC_HALF_WIDTH;
        let right = (x0 + c - y0) * ISOMETRIC_HALF_WIDTH;
        let top = (x0 + y0) * ISOMETRIC_HALF_HEIGHT - BUILDING_LAYERS as f32 * LAYER_HEIGHT;
        let bottom = (x0 + y0 + 2.0 * c) * ISOMETRIC_HALF_HEIGHT;
        Rect::new(left, top, right, bottom)
    }

    /// Whether chunk `(cx, cy)` overlaps the screen, with one chunk width of
    /// margin on every side.
    pub fn is_chunk_visible(&self, cx: usize, cy: usize) -> bool {
        let margin = CHUNK_SIZE as f32 * ISOMETRIC_HALF_WIDTH;
        !self
            .visible_rect()
            .inflate(margin)
            .intersect(Self::chunk_bounds(cx, cy))
            .is_empty()
    }
}
