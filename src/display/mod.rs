//! Character-display rendering.
//!
//! Nothing in here touches the bus.  Views and overlays are turned into a
//! short [`RenderBatch`] of [`RenderCommand`]s that the
//! [`DisplayPort`](crate::app::ports::DisplayPort) adapter executes.
//!
//! ```text
//!   rotator ──┐
//!             ├──▶ RenderBatch ──▶ DisplayPort ──▶ LCD driver
//!   overlay ──┘
//! ```

pub mod overlay;
pub mod rotator;

use core::fmt;

pub use rotator::DisplayRotator;

/// Widest panel we drive (20x4); narrower panels truncate in the adapter.
pub const LINE_CAPACITY: usize = 20;

/// One line of display text.
pub type LcdLine = heapless::String<LINE_CAPACITY>;

/// Longest batch any view or overlay emits: clear + four prints.
pub const MAX_BATCH: usize = 5;

/// Instructions consumed by the display driver, in order.
pub type RenderBatch = heapless::Vec<RenderCommand, MAX_BATCH>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Blank the panel and home the cursor.
    Clear,
    /// Move the cursor to (`col`, `row`) and print `text` from there.
    Print { col: u8, row: u8, text: LcdLine },
}

impl RenderCommand {
    pub fn print(col: u8, row: u8, text: &str) -> Self {
        Self::Print {
            col,
            row,
            text: line(text),
        }
    }

    pub fn print_fmt(col: u8, row: u8, args: fmt::Arguments<'_>) -> Self {
        Self::Print {
            col,
            row,
            text: line_fmt(args),
        }
    }
}

/// The views the rotator cycles through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Temperature and humidity.
    #[default]
    Climate,
    /// Soil moisture and light level.
    SoilLight,
    /// Pump and grow-light relay state.
    ActuatorStatus,
}

impl DisplayMode {
    pub const COUNT: u8 = 3;

    /// Position in the rotation (0, 1, 2).
    pub fn index(self) -> u8 {
        match self {
            Self::Climate => 0,
            Self::SoilLight => 1,
            Self::ActuatorStatus => 2,
        }
    }

    pub fn from_index(index: u8) -> Self {
        match index % Self::COUNT {
            0 => Self::Climate,
            1 => Self::SoilLight,
            _ => Self::ActuatorStatus,
        }
    }

    /// `(mode + 1) mod 3`.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Rotation position plus the time of the last switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayState {
    /// View rendered on the next switch.
    pub mode: DisplayMode,
    pub last_switch_ms: u64,
}

// ── Text helpers ──────────────────────────────────────────────

/// Writer that silently drops whatever does not fit.
struct Truncating<'a>(&'a mut LcdLine);

impl fmt::Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Copy `s` into a line, truncating at [`LINE_CAPACITY`].
pub fn line(s: &str) -> LcdLine {
    line_fmt(format_args!("{s}"))
}

/// Format into a line, truncating at [`LINE_CAPACITY`].
pub fn line_fmt(args: fmt::Arguments<'_>) -> LcdLine {
    let mut out = LcdLine::new();
    let _ = fmt::Write::write_fmt(&mut Truncating(&mut out), args);
    out
}
