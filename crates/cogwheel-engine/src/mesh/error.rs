use std::collections::TryReserveError;

/// Gear generation failure.
#[derive(Debug, thiserror::Error)]
pub enum GearError {
    #[error("invalid gear parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("failed to allocate gear mesh storage")]
    Allocation(#[from] TryReserveError),
}
