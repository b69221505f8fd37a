//! Per-step transition classification.

use std::fmt;

/// How a step changed the board, checked in this order: extinction, static,
/// cycled, advanced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// None of the other cases. Also the resting value after an edit.
    #[default]
    Advanced,
    /// The new generation has no live cells.
    Extinct,
    /// The new generation is identical to the one before the step.
    Static,
    /// The new generation equals one seen `period` steps ago, `period >= 2`,
    /// within the history window.
    Cycled { period: usize },
}

impl Outcome {
    /// Extinct, static and cycled boards will keep repeating themselves.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Advanced)
    }

    /// Extinction or a still life.
    #[inline]
    pub fn is_stabilized(self) -> bool {
        matches!(self, Outcome::Extinct | Outcome::Static)
    }

    #[inline]
    pub fn period(self) -> Option<usize> {
        match self {
            Outcome::Cycled { period } => Some(period),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Advanced => write!(f, "advanced"),
            Outcome::Extinct => write!(f, "extinct"),
            Outcome::Static => write!(f, "static"),
            Outcome::Cycled { period } => write!(f, "cycled (period {period})"),
        }
    }
}
