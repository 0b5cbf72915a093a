use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::animation::TimingConfig;

use super::digit::{DigitFrame, DigitRoller, DigitState, DigitTransitionVariant, RollDirection};
use super::width::{GlyphWidths, WidthStabilizer};

/// One rendered piece of a formatted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberPart {
    Digit(u8),
    Symbol(char),
}

impl NumberPart {
    /// Splits already formatted text into digit and symbol parts.
    #[must_use]
    pub fn from_text(text: &str) -> Vec<Self> {
        text.chars()
            .map(|ch| match ch.to_digit(10) {
                Some(digit) => Self::Digit(digit as u8),
                None => Self::Symbol(ch),
            })
            .collect()
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Digit(digit) => char::from(b'0' + digit),
            Self::Symbol(ch) => ch,
        }
    }
}

/// Turns a value into rendered parts.
///
/// Returning `None` (or no parts) skips the visual update.
pub trait NumberFormatter {
    fn format_parts(&self, value: Decimal) -> Option<Vec<NumberPart>>;
}

impl<F> NumberFormatter for F
where
    F: Fn(Decimal) -> Option<Vec<NumberPart>>,
{
    fn format_parts(&self, value: Decimal) -> Option<Vec<NumberPart>> {
        self(value)
    }
}

/// Fixed-precision decimal formatting with optional grouping and affixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalFormatter {
    pub prefix: String,
    pub suffix: String,
    pub fraction_digits: u32,
    pub grouping: bool,
    /// Prefix positive values with `+`.
    pub show_sign: bool,
}

impl DecimalFormatter {
    #[must_use]
    pub fn new(fraction_digits: u32) -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            fraction_digits,
            grouping: true,
            show_sign: false,
        }
    }

    /// Two fraction digits behind a currency symbol, e.g. `$1,234.50`.
    #[must_use]
    pub fn currency(symbol: &str) -> Self {
        Self {
            prefix: symbol.to_owned(),
            ..Self::new(2)
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_owned();
        self
    }

    #[must_use]
    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }

    #[must_use]
    pub fn with_sign(mut self, show_sign: bool) -> Self {
        self.show_sign = show_sign;
        self
    }

    #[must_use]
    pub fn format_text(&self, value: Decimal) -> String {
        let mut magnitude = value.abs().round_dp(self.fraction_digits);
        magnitude.rescale(self.fraction_digits);
        let negative = value.is_sign_negative() && !magnitude.is_zero();

        let digits = magnitude.to_string();
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + 8);
        if negative {
            out.push('-');
        } else if self.show_sign && !magnitude.is_zero() {
            out.push('+');
        }
        out.push_str(&self.prefix);
        for (index, ch) in integer.chars().enumerate() {
            let remaining = integer.len() - index;
            if self.grouping && index > 0 && remaining % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out.push_str(&self.suffix);
        out
    }
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NumberFormatter for DecimalFormatter {
    fn format_parts(&self, value: Decimal) -> Option<Vec<NumberPart>> {
        Some(NumberPart::from_text(&self.format_text(value)))
    }
}

#[derive(Debug)]
enum NumberSlot {
    Digit(DigitRoller),
    Symbol(char),
}

/// Rendering state of one slot of a rolling number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SlotFrame {
    Digit {
        state: DigitState,
        frame: DigitFrame,
        width: f64,
    },
    Symbol(char),
}

/// Settings shared by every digit column of a [`RollingNumber`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingNumberOptions {
    pub variant: DigitTransitionVariant,
    pub timing: TimingConfig,
    pub row_height: f64,
    pub glyphs: GlyphWidths,
    pub max_measurement_attempts: u32,
}

impl Default for RollingNumberOptions {
    fn default() -> Self {
        Self {
            variant: DigitTransitionVariant::default(),
            timing: TimingConfig::default(),
            row_height: 24.0,
            glyphs: GlyphWidths::default(),
            max_measurement_attempts: super::width::DEFAULT_MAX_MEASUREMENT_ATTEMPTS,
        }
    }
}

/// Odometer-style number built from one [`DigitRoller`] per digit.
///
/// Digit columns are matched right to left between updates, so a value that
/// gains a leading digit keeps animating its existing columns.
#[derive(Debug)]
pub struct RollingNumber<F: NumberFormatter = DecimalFormatter> {
    formatter: F,
    options: RollingNumberOptions,
    slots: Vec<NumberSlot>,
    value: Option<Decimal>,
    width: WidthStabilizer,
}

impl<F: NumberFormatter> RollingNumber<F> {
    #[must_use]
    pub fn new(formatter: F, options: RollingNumberOptions) -> Self {
        Self {
            formatter,
            options,
            slots: Vec::new(),
            value: None,
            width: WidthStabilizer::new(options.max_measurement_attempts),
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Shows `value`.
    ///
    /// `direction` drives the `Single` variant; when omitted it falls back to
    /// the sign of the change of the whole value. `Every` columns ignore it and
    /// follow their own digit delta. Returns `false` when the formatter produced
    /// nothing, in which case the display is left untouched.
    pub fn update(&mut self, value: Decimal, direction: Option<RollDirection>) -> bool {
        let parts = match self.formatter.format_parts(value) {
            Some(parts) if !parts.is_empty() => parts,
            _ => {
                debug!(%value, "formatter produced no parts, skipping rolling number update");
                return false;
            }
        };

        let direction = direction.unwrap_or_else(|| match self.value {
            Some(previous) => RollDirection::from_delta(previous, value),
            None => RollDirection::Up,
        });

        // popped right to left, matching the iteration over `parts` below
        let mut previous_digits: SmallVec<[DigitRoller; 16]> = self
            .slots
            .drain(..)
            .filter_map(|slot| match slot {
                NumberSlot::Digit(roller) => Some(roller),
                NumberSlot::Symbol(_) => None,
            })
            .collect();

        let mut slots = Vec::with_capacity(parts.len());
        for part in parts.iter().rev() {
            match *part {
                NumberPart::Digit(digit) => {
                    let digit = digit.min(9);
                    let roller = match previous_digits.pop() {
                        Some(mut roller) => {
                            roller.set_value(digit, direction, &self.options.glyphs);
                            roller
                        }
                        None => DigitRoller::new(
                            digit,
                            self.options.variant,
                            self.options.timing,
                            self.options.row_height,
                            &self.options.glyphs,
                        ),
                    };
                    slots.push(NumberSlot::Digit(roller));
                }
                NumberPart::Symbol(ch) => slots.push(NumberSlot::Symbol(ch)),
            }
        }
        slots.reverse();

        let text_changed = self.value.is_none_or(|previous| previous != value);
        self.slots = slots;
        self.value = Some(value);
        if text_changed {
            self.width.reset();
        }
        true
    }

    /// Advances every column. Returns `true` while any digit is rolling.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let mut rolling = false;
        for slot in &mut self.slots {
            if let NumberSlot::Digit(roller) = slot {
                rolling |= roller.tick(dt_ms);
            }
        }
        rolling
    }

    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| matches!(slot, NumberSlot::Digit(roller) if roller.is_rolling()))
    }

    #[must_use]
    pub fn frames(&self) -> Vec<SlotFrame> {
        self.slots
            .iter()
            .map(|slot| match slot {
                NumberSlot::Digit(roller) => SlotFrame::Digit {
                    state: roller.state(),
                    frame: roller.frame(),
                    width: roller.width(),
                },
                NumberSlot::Symbol(ch) => SlotFrame::Symbol(*ch),
            })
            .collect()
    }

    /// Settled text, as it reads once every roll has finished.
    #[must_use]
    pub fn text(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                NumberSlot::Digit(roller) => char::from(b'0' + roller.state().value),
                NumberSlot::Symbol(ch) => *ch,
            })
            .collect()
    }

    /// Feeds a layout measurement of the rendered text.
    pub fn record_width_measurement(&mut self, width: f64) -> Option<f64> {
        self.width.record(width)
    }

    #[must_use]
    pub fn stable_width(&self) -> Option<f64> {
        self.width.stable_width()
    }
}
