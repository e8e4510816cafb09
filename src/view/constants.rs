//! Terminal layout and timing constants.

/// Height of the status bar in lines.
///
/// The hex component gets everything above it.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// How long the event loop waits for input before advancing the caret
/// blink clock.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_SCROLL_ROWS: usize = 3;

/// Terminal width used when the backend reports zero columns.
pub const FALLBACK_WIDTH: u16 = 80;
