//! Board drawing plan for the windowed visualizer.
//!
//! [`build_scene`] turns a snapshot into a flat list of [`Primitive`]s in
//! board space (one cell is [`CELL_SIZE`] units wide). The app maps them
//! through the [`ViewTransform`] and hands them to the egui painter, so the
//! layout can be checked without opening a window.

use eframe::egui::{Color32, Pos2, Rect, Vec2};
use palette::{FromColor, Hsv, Srgb};

use crate::host::PlayerIndex;
use crate::snapshot::{GameSnapshot, ObjectSnapshot};

use super::view::ViewTransform;

/// Side of one board cell in board units.
pub const CELL_SIZE: f32 = 64.0;
/// Inset of the health bar from the cell edges.
pub const HEALTH_BAR_BORDER: f32 = 6.0;
/// Health bar thickness.
pub const HEALTH_BAR_HEIGHT: f32 = 6.0;
/// Inset of a building outline from the cell edges.
const BUILDING_INSET: f32 = 0.5;
/// Glyph font size in board units.
pub const GLYPH_SIZE: f32 = CELL_SIZE / 2.0;

/// Canvas fill around the board.
pub const BACKGROUND_COLOR: Color32 = Color32::from_gray(128);
/// Board fill.
pub const BOARD_COLOR: Color32 = Color32::from_gray(230);
/// Health bar track.
pub const HEALTH_LOST_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
/// Health bar fill.
pub const HEALTH_LEFT_COLOR: Color32 = Color32::from_rgb(0, 255, 0);
/// Health bar outline.
pub const HEALTH_OUTLINE_COLOR: Color32 = Color32::BLACK;

/// Player colors by index.
pub const PLAYER_COLORS: [Color32; 4] = [
    Color32::from_rgb(255, 0, 0),
    Color32::from_rgb(0, 0, 255),
    Color32::from_rgb(0, 200, 0),
    Color32::from_rgb(180, 160, 0),
];
/// Color of unowned objects.
pub const NEUTRAL_COLOR: Color32 = Color32::BLACK;

/// Main color for an owner.
///
/// Players beyond the palette wrap around to the start.
#[must_use]
pub fn owner_color(owner: Option<PlayerIndex>) -> Color32 {
    owner.map_or(NEUTRAL_COLOR, |i| PLAYER_COLORS[i % PLAYER_COLORS.len()])
}

/// Building fill: the owner color with half the saturation at 20% opacity.
#[must_use]
pub fn building_fill(color: Color32) -> Color32 {
    let mut hsv = to_hsv(color);
    hsv.saturation *= 0.5;
    with_alpha(from_hsv(hsv), 0.2)
}

/// Glyph color: the owner color darkened by a factor of 1.25 in value.
#[must_use]
pub fn glyph_color(color: Color32) -> Color32 {
    let mut hsv = to_hsv(color);
    hsv.value /= 1.25;
    from_hsv(hsv)
}

fn to_hsv(color: Color32) -> Hsv {
    let rgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
    Hsv::from_color(rgb)
}

fn from_hsv(hsv: Hsv) -> Color32 {
    let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsv).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

/// One drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Solid rectangle without outline.
    Fill {
        /// Area.
        rect: Rect,
        /// Fill color.
        color: Color32,
    },
    /// Filled rectangle with a one-unit outline.
    Outlined {
        /// Area.
        rect: Rect,
        /// Fill color.
        fill: Color32,
        /// Outline color.
        stroke: Color32,
        /// Outline width.
        stroke_width: f32,
    },
    /// A character centered in a rectangle.
    Glyph {
        /// Area the glyph is centered in.
        rect: Rect,
        /// Character.
        glyph: char,
        /// Text color.
        color: Color32,
        /// Font size.
        size: f32,
    },
}

impl Primitive {
    /// The same primitive in screen space.
    #[must_use]
    pub fn to_screen(&self, view: &ViewTransform) -> Self {
        let scale = view.scale();
        match *self {
            Self::Fill { rect, color } => Self::Fill {
                rect: view.apply_rect(rect),
                color,
            },
            Self::Outlined {
                rect,
                fill,
                stroke,
                stroke_width,
            } => Self::Outlined {
                rect: view.apply_rect(rect),
                fill,
                stroke,
                stroke_width: stroke_width * scale,
            },
            Self::Glyph {
                rect,
                glyph,
                color,
                size,
            } => Self::Glyph {
                rect: view.apply_rect(rect),
                glyph,
                color,
                size: size * scale,
            },
        }
    }

    /// Area covered.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        match *self {
            Self::Fill { rect, .. } | Self::Outlined { rect, .. } | Self::Glyph { rect, .. } => rect,
        }
    }
}

/// Board-space rectangle of a cell.
#[must_use]
pub fn cell_rect(x: u16, y: u16) -> Rect {
    Rect::from_min_size(
        Pos2::new(f32::from(x) * CELL_SIZE, f32::from(y) * CELL_SIZE),
        Vec2::splat(CELL_SIZE),
    )
}

/// Health bar track and fill for a cell.
///
/// The fill is `track_width * hitpoints / max_hitpoints` wide.
#[must_use]
pub fn health_bar(cell: Rect, fraction: f32) -> (Rect, Rect) {
    let inner = cell.shrink(HEALTH_BAR_BORDER);
    let track = Rect::from_min_size(inner.min, Vec2::new(inner.width(), HEALTH_BAR_HEIGHT));
    let fill = Rect::from_min_size(
        track.min,
        Vec2::new(track.width() * fraction.clamp(0.0, 1.0), HEALTH_BAR_HEIGHT),
    );
    (track, fill)
}

/// Build the board drawing plan for a snapshot, in board space.
#[must_use]
pub fn build_scene(snapshot: &GameSnapshot) -> Vec<Primitive> {
    let board = Rect::from_min_size(
        Pos2::ZERO,
        Vec2::new(
            f32::from(snapshot.board.width) * CELL_SIZE,
            f32::from(snapshot.board.height) * CELL_SIZE,
        ),
    );

    let mut scene = Vec::with_capacity(1 + snapshot.objects.len() * 4);
    scene.push(Primitive::Fill {
        rect: board,
        color: BOARD_COLOR,
    });
    for object in &snapshot.objects {
        push_object(&mut scene, object);
    }
    scene
}

fn push_object(scene: &mut Vec<Primitive>, object: &ObjectSnapshot) {
    let color = owner_color(object.owner);
    let cell = cell_rect(object.cell.x, object.cell.y);
    let mut text_rect = cell;

    if object.kind.is_building() {
        scene.push(Primitive::Outlined {
            rect: cell.shrink(BUILDING_INSET),
            fill: building_fill(color),
            stroke: color,
            stroke_width: 1.0,
        });
    }

    if let Some(health) = object.health {
        let (track, fill) = health_bar(cell, health.fraction());
        scene.push(Primitive::Outlined {
            rect: track,
            fill: HEALTH_LOST_COLOR,
            stroke: HEALTH_OUTLINE_COLOR,
            stroke_width: 1.0,
        });
        scene.push(Primitive::Outlined {
            rect: fill,
            fill: HEALTH_LEFT_COLOR,
            stroke: HEALTH_OUTLINE_COLOR,
            stroke_width: 1.0,
        });
        text_rect.min.y = track.max.y;
    }

    scene.push(Primitive::Glyph {
        rect: text_rect,
        glyph: object.glyph,
        color: glyph_color(color),
        size: GLYPH_SIZE,
    });
}
