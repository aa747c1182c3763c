//! Error types for the e-paper driver.

use display_interface::DisplayError;
use thiserror::Error;

use crate::driver::State;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving the panel.
#[derive(Error, Debug)]
pub enum Error {
    /// Bus or control line failure.
    #[error("display interface error: {0:?}")]
    Interface(DisplayError),

    /// The busy line could not be read.
    #[error("failed to read busy line")]
    BusyLine,

    /// The busy line did not reach its idle level within the poll budget.
    #[error("panel still busy after {polls} polls")]
    BusyTimeout {
        /// Number of status polls issued before giving up.
        polls: u32,
    },

    /// Buffer rows must be byte aligned and at least as wide as the visible area.
    #[error("invalid logical width {logical_width} for visible width {width}")]
    InvalidLogicalWidth {
        /// Requested buffer row width.
        logical_width: u16,
        /// Requested visible width.
        width: u16,
    },

    /// Refresh requested while the panel cannot accept commands.
    #[error("panel not ready for refresh (state: {0:?})")]
    NotReady(State),
}

impl From<DisplayError> for Error {
    fn from(err: DisplayError) -> Self {
        Error::Interface(err)
    }
}
