//! The on/off button drawn in the node's top-left corner.

/// Button geometry, in node-local pixels.
pub const WIDTH: f32 = 60.0;
pub const HEIGHT: f32 = 24.0;
pub const MARGIN: f32 = 8.0;
pub const CORNER_RADIUS: f32 = 8.0;
pub const BORDER_WIDTH: f32 = 2.0;

pub const GLYPH: char = '⏻';
pub const GLYPH_COLOR: &str = "#ffffff";
pub const GLYPH_FONT: &str = "bold 14px Arial";

/// The node's power toggle. Transient, never saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerState {
    pub is_on: bool,
    pub is_hovered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Edges count as inside.
    pub fn contains(&self, [x, y]: [f32; 2]) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub background: &'static str,
    pub border: &'static str,
}

pub fn colors(state: PowerState) -> ButtonColors {
    let (background, border) = match (state.is_on, state.is_hovered) {
        (true, false) => ("#2196F3", "#1976D2"),
        (true, true) => ("#64B5F6", "#42A5F5"),
        (false, false) => ("#3D3D3D", "#555555"),
        (false, true) => ("#4D4D4D", "#777777"),
    };
    ButtonColors { background, border }
}

/// Everything needed to paint the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerButtonDraw {
    pub bounds: Rect,
    pub colors: ButtonColors,
    pub corner_radius: f32,
    pub border_width: f32,
    pub glyph: char,
    pub glyph_color: &'static str,
    pub glyph_font: &'static str,
    /// Center of the glyph (nudged down a pixel to look centered).
    pub glyph_center: [f32; 2],
}

impl PowerButtonDraw {
    pub fn new(top: f32, state: PowerState) -> Self {
        let bounds = Rect {
            x: MARGIN,
            y: top,
            width: WIDTH,
            height: HEIGHT,
        };
        Self {
            bounds,
            colors: colors(state),
            corner_radius: CORNER_RADIUS,
            border_width: BORDER_WIDTH,
            glyph: GLYPH,
            glyph_color: GLYPH_COLOR,
            glyph_font: GLYPH_FONT,
            glyph_center: [MARGIN + WIDTH / 2.0, top + HEIGHT / 2.0 + 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_follow_state() {
        let on = PowerState {
            is_on: true,
            is_hovered: false,
        };
        assert_eq!(colors(on).background, "#2196F3");
        assert_eq!(
            colors(PowerState {
                is_hovered: true,
                ..on
            })
            .border,
            "#42A5F5"
        );
        assert_eq!(colors(PowerState::default()).background, "#3D3D3D");
    }

    #[test]
    fn hit_test_includes_edges() {
        let draw = PowerButtonDraw::new(4.0, PowerState::default());
        assert!(draw.bounds.contains([MARGIN, 4.0]));
        assert!(draw.bounds.contains([MARGIN + WIDTH, 4.0 + HEIGHT]));
        assert!(!draw.bounds.contains([MARGIN - 0.5, 10.0]));
        assert!(!draw.bounds.contains([20.0, 4.0 + HEIGHT + 0.5]));
    }
}
