use crate::resolution::DEFAULT_WIDTH;

/// Source of the current display width, in pixels.
pub trait ScreenMetrics {
    fn screen_width(&self) -> i32;
}

/// Reads the pixel size the terminal reports for its window.
///
/// Terminals that do not answer the pixel query report zero; those fall back
/// to 1920.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalScreen;

impl ScreenMetrics for TerminalScreen {
    fn screen_width(&self) -> i32 {
        match crossterm::terminal::window_size() {
            Ok(size) if size.width > 0 => i32::from(size.width),
            Ok(_) => DEFAULT_WIDTH,
            Err(err) => {
                tracing::debug!(%err, "window size query failed");
                DEFAULT_WIDTH
            }
        }
    }
}

/// A fixed width, from `--screen-width` or tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedScreen(pub i32);

impl ScreenMetrics for FixedScreen {
    fn screen_width(&self) -> i32 {
        self.0
    }
}
