use serde::{Deserialize, Serialize};

use crate::core::types::LabelLayout;

/// Height of the row min/max labels are vertically centred in.
pub const LABEL_ROW_HEIGHT: f64 = 24.0;

/// Centres an element of `element_width` on the pointer offset `x` and clamps it
/// into `[gutter, container_width - element_width - gutter]`.
///
/// When the element does not fit (the lower bound exceeds the upper bound) the
/// upper bound wins, so the result is `min(upper, max(gutter, x - element_width / 2))`.
#[must_use]
pub fn map_position_to_clamped(
    x: f64,
    element_width: f64,
    container_width: f64,
    gutter: f64,
) -> f64 {
    let centered = x - element_width / 2.0;
    let upper = container_width - element_width - gutter;
    upper.min(gutter.max(centered))
}

/// Resolved placement of a min/max label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LabelPosition {
    /// Layout not measured yet: opacity stays 0 and no translation is applied.
    Hidden,
    Visible { translate_x: f64, translate_y: f64 },
}

impl LabelPosition {
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// Opacity target for this placement.
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Hidden => 0.0,
            Self::Visible { .. } => 1.0,
        }
    }

    #[must_use]
    pub fn translation(self) -> Option<(f64, f64)> {
        match self {
            Self::Hidden => None,
            Self::Visible {
                translate_x,
                translate_y,
            } => Some((translate_x, translate_y)),
        }
    }
}

/// Positions a label of `label_box` over `target_x` inside the default label row.
#[must_use]
pub fn position_label(
    target_x: f64,
    label_box: LabelLayout,
    container_width: f64,
    gutter: f64,
) -> LabelPosition {
    position_label_in_row(
        target_x,
        label_box,
        container_width,
        gutter,
        LABEL_ROW_HEIGHT,
    )
}

/// Same as [`position_label`] with an explicit row height.
#[must_use]
pub fn position_label_in_row(
    target_x: f64,
    label_box: LabelLayout,
    container_width: f64,
    gutter: f64,
    row_height: f64,
) -> LabelPosition {
    if !label_box.is_measured() {
        return LabelPosition::Hidden;
    }

    LabelPosition::Visible {
        translate_x: map_position_to_clamped(target_x, label_box.width, container_width, gutter),
        translate_y: row_height / 2.0 - label_box.height / 2.0,
    }
}
