use crate::models::{ScreenPoint, TooltipState};

// --- Palette ---

pub const ACCENT: &str = "#3b82f6";
pub const MUTED: &str = "#2a4365";
pub const BACKGROUND: &str = "#1a202c";
pub const HOVER: &str = "#60a5fa";

pub const STROKE: &str = "#1a202c";
pub const STROKE_WIDTH: f64 = 0.5;

/// Pixels the tooltip is lifted above the pointer.
pub const TOOLTIP_OFFSET_Y: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Hover,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub cursor: &'static str,
}

/// A region can be interacted with when it is selected or unselected
/// regions are shown.
pub fn is_visible(is_selected: bool, show_unselected: bool) -> bool {
    is_selected || show_unselected
}

/// Resting fill of a region.
pub fn region_fill(is_selected: bool, show_unselected: bool) -> &'static str {
    if is_selected {
        ACCENT
    } else if show_unselected {
        MUTED
    } else {
        BACKGROUND
    }
}

pub fn region_style(is_selected: bool, show_unselected: bool, interaction: Interaction) -> RegionStyle {
    let visible = is_visible(is_selected, show_unselected);
    let fill = match interaction {
        Interaction::Idle => region_fill(is_selected, show_unselected),
        Interaction::Hover if visible => HOVER,
        Interaction::Hover => BACKGROUND,
        Interaction::Pressed => ACCENT,
    };
    RegionStyle {
        fill,
        stroke: STROKE,
        stroke_width: STROKE_WIDTH,
        cursor: if visible { "pointer" } else { "default" },
    }
}

/// Tooltip for a pointer entering a region, if the region is visible.
pub fn hover_tooltip(name: &str, visible: bool, position: ScreenPoint) -> Option<TooltipState> {
    visible.then(|| TooltipState {
        content: name.to_string(),
        position,
    })
}

/// Transient pointer state of one map: tooltip plus hovered/pressed region.
///
/// Regions are tracked by feature key, the tooltip by display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    pub tooltip: Option<TooltipState>,
    hovered: Option<String>,
    pressed: Option<String>,
}

impl HoverState {
    pub fn enter(&mut self, key: &str, name: &str, visible: bool, position: ScreenPoint) {
        self.hovered = Some(key.to_string());
        self.tooltip = hover_tooltip(name, visible, position);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
        self.pressed = None;
        self.tooltip = None;
    }

    pub fn press(&mut self, key: &str) {
        self.pressed = Some(key.to_string());
    }

    pub fn release(&mut self) {
        self.pressed = None;
    }

    pub fn interaction(&self, key: &str) -> Interaction {
        if self.pressed.as_deref() == Some(key) {
            Interaction::Pressed
        } else if self.hovered.as_deref() == Some(key) {
            Interaction::Hover
        } else {
            Interaction::Idle
        }
    }
}
