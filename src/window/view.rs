//! Pan and zoom for the board canvas.
//!
//! The view is a uniform scale followed by a translation. Board pixels
//! (cells times [`CELL_SIZE`](super::scene::CELL_SIZE)) map to canvas-local
//! screen points as `p * scale + shift`.

use eframe::egui::{Pos2, Rect, Vec2};

/// Smallest zoom exponent.
pub const MIN_ZOOM_EXP: f32 = -20.0;
/// Largest zoom exponent.
pub const MAX_ZOOM_EXP: f32 = 10.0;
/// Zoom exponent of a fresh view.
pub const DEFAULT_ZOOM_EXP: f32 = -5.0;
/// Scale multiplier per unit of zoom exponent.
pub const ZOOM_BASE: f32 = 1.1;
/// Wheel delta of one scroll notch.
pub const WHEEL_STEP: f32 = 120.0;

/// Scale factor for a zoom exponent.
#[must_use]
pub fn zoom_factor(zoom_exp: f32) -> f32 {
    ZOOM_BASE.powf(zoom_exp)
}

/// Pan/zoom state, owned by the render driver and kept across turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom_exp: f32,
    shift: Vec2,
    /// Last pointer position while a right-button drag is in progress.
    drag_anchor: Option<Pos2>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom_exp: DEFAULT_ZOOM_EXP,
            shift: Vec2::ZERO,
            drag_anchor: None,
        }
    }
}

impl ViewTransform {
    /// Current zoom exponent.
    #[must_use]
    pub const fn zoom_exp(&self) -> f32 {
        self.zoom_exp
    }

    /// Current scale factor.
    #[must_use]
    pub fn scale(&self) -> f32 {
        zoom_factor(self.zoom_exp)
    }

    /// Current pan offset.
    #[must_use]
    pub const fn shift(&self) -> Vec2 {
        self.shift
    }

    /// Whether a pan drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Map a board point to the screen.
    #[must_use]
    pub fn apply(&self, p: Pos2) -> Pos2 {
        (p.to_vec2() * self.scale() + self.shift).to_pos2()
    }

    /// Map a board rectangle to the screen.
    #[must_use]
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.apply(rect.min), self.apply(rect.max))
    }

    /// Map a screen point back to the board.
    #[must_use]
    pub fn invert(&self, p: Pos2) -> Pos2 {
        ((p.to_vec2() - self.shift) / self.scale()).to_pos2()
    }

    /// Zoom by a wheel delta, keeping the board point under `cursor` fixed.
    ///
    /// Each [`WHEEL_STEP`] of delta moves the exponent by one.
    pub fn scroll(&mut self, delta: f32, cursor: Pos2) {
        let old_scale = self.scale();
        self.zoom_exp = (self.zoom_exp + delta / WHEEL_STEP).clamp(MIN_ZOOM_EXP, MAX_ZOOM_EXP);
        let new_scale = self.scale();
        self.shift += (cursor.to_vec2() - self.shift) * (1.0 - new_scale / old_scale);
    }

    /// Right button went down: start panning.
    pub fn begin_drag(&mut self, pos: Pos2) {
        self.drag_anchor = Some(pos);
    }

    /// Right button went up: stop panning.
    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Pointer moved. Returns `true` if the view panned.
    pub fn pointer_moved(&mut self, pos: Pos2) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        self.shift += pos - anchor;
        self.drag_anchor = Some(pos);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_default_view() {
        let view = ViewTransform::default();
        assert!((view.zoom_exp() - DEFAULT_ZOOM_EXP).abs() < f32::EPSILON);
        assert!((view.scale() - 1.1f32.powi(-5)).abs() < 1e-6);
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_scroll_one_notch() {
        let mut view = ViewTransform::default();
        view.scroll(WHEEL_STEP, Pos2::ZERO);
        assert!((view.zoom_exp() - (DEFAULT_ZOOM_EXP + 1.0)).abs() < 1e-6);
        // Zooming at the origin with no shift leaves the shift at the origin.
        assert!(view.shift().length() < 1e-6);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut view = ViewTransform::default();
        for _ in 0..100 {
            view.scroll(WHEEL_STEP, Pos2::new(10.0, 10.0));
        }
        assert!((view.zoom_exp() - MAX_ZOOM_EXP).abs() < f32::EPSILON);
        for _ in 0..100 {
            view.scroll(-WHEEL_STEP, Pos2::new(10.0, 10.0));
        }
        assert!((view.zoom_exp() - MIN_ZOOM_EXP).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scroll_at_limit_keeps_shift() {
        let mut view = ViewTransform::default();
        view.scroll(WHEEL_STEP * 100.0, Pos2::new(5.0, 5.0));
        let shift = view.shift();
        view.scroll(WHEEL_STEP, Pos2::new(300.0, 200.0));
        assert!((view.shift() - shift).length() < 1e-6);
    }

    #[test]
    fn test_scroll_keeps_cursor_point() {
        let mut view = ViewTransform::default();
        let cursor = Pos2::new(320.0, 180.0);
        let board_point = view.invert(cursor);

        view.scroll(3.0 * WHEEL_STEP, cursor);
        assert!(close(view.apply(board_point), cursor));

        view.scroll(-7.0 * WHEEL_STEP, cursor);
        assert!(close(view.apply(board_point), cursor));
    }

    #[test]
    fn test_drag_pans_by_pointer_delta() {
        let mut view = ViewTransform::default();
        assert!(!view.pointer_moved(Pos2::new(50.0, 50.0)));

        view.begin_drag(Pos2::new(10.0, 10.0));
        assert!(view.pointer_moved(Pos2::new(15.0, 12.0)));
        assert!(view.pointer_moved(Pos2::new(30.0, 40.0)));
        view.end_drag();
        assert!(!view.pointer_moved(Pos2::new(100.0, 100.0)));

        assert!((view.shift() - Vec2::new(20.0, 30.0)).length() < 1e-6);
    }

    #[test]
    fn test_apply_rect_scales_and_shifts() {
        let mut view = ViewTransform::default();
        view.begin_drag(Pos2::ZERO);
        view.pointer_moved(Pos2::new(4.0, 8.0));
        let rect = view.apply_rect(Rect::from_min_size(Pos2::new(64.0, 0.0), Vec2::splat(64.0)));
        let s = view.scale();
        assert!(close(rect.min, Pos2::new(64.0 * s + 4.0, 8.0)));
        assert!((rect.width() - 64.0 * s).abs() < 1e-4);
    }
}
