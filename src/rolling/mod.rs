//! Odometer-style rolling numbers.

pub mod digit;
pub mod number;
pub mod width;

pub use digit::{
    DigitFrame, DigitRollPlan, DigitRoller, DigitSide, DigitState, DigitTransitionVariant,
    RollDirection, plan_roll,
};
pub use number::{
    DecimalFormatter, NumberFormatter, NumberPart, RollingNumber, RollingNumberOptions, SlotFrame,
};
pub use width::{DEFAULT_MAX_MEASUREMENT_ATTEMPTS, GlyphWidths, WidthStabilizer};
