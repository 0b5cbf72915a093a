pub mod hover_date;
pub mod layout;
pub mod primitives;
pub mod types;

pub use hover_date::{HoverPeriod, format_hover_date};
pub use layout::{
    LABEL_ROW_HEIGHT, LabelPosition, map_position_to_clamped, position_label,
    position_label_in_row,
};
pub use primitives::{round_progress, round_to_precision};
pub use types::{LabelLayout, ScrubParams, ScrubPoint};
