//! Build-time selection between live checking and no-op checking

/// Type-level switch selecting whether a [`crate::StateChecker`] checks.
pub trait CheckMode {
    /// Transitions are verified and recorded
    const ENABLED: bool;
}

/// Every transition is verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checked;

/// Every transition is an empty function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unchecked;

impl CheckMode for Checked {
    const ENABLED: bool = true;
}

impl CheckMode for Unchecked {
    const ENABLED: bool = false;
}

/// Mode selected by the `state-check` feature
#[cfg(feature = "state-check")]
pub type DefaultMode = Checked;

/// Mode selected by the `state-check` feature
#[cfg(not(feature = "state-check"))]
pub type DefaultMode = Unchecked;
