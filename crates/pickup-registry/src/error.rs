use crate::ticket::TicketState;

/// A result type defaulting to the registry [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors a registry can produce.
///
/// [`Error::InvalidTransition`] and [`Error::Exhausted`] are caller-facing and
/// leave the registry untouched. The remaining variants signal a broken
/// internal invariant; see [`Error::is_fatal`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The ticket does not exist or is not in the state the transition starts
    /// from.
    #[error("order number {number} cannot move to the next state: expected {expected}, found {}", display_actual(.actual))]
    InvalidTransition {
        /// The order number the transition was requested for.
        number: u32,
        /// The state the transition requires.
        expected: TicketState,
        /// The current state, or `None` if the number was never issued.
        actual: Option<TicketState>,
    },

    /// A ticket is in cooldown without a recorded cooldown start.
    #[error("order number {number} is in cooldown but the cooldown start has not been set")]
    CorruptState {
        /// The offending order number.
        number: u32,
    },

    /// The allocator tried to create a ticket for a number that already
    /// exists.
    #[error("order number {number} already exists")]
    DuplicateKey {
        /// The colliding order number.
        number: u32,
    },

    /// Every number up to [`u32::MAX`] has been issued and none is idle.
    #[error("order number space exhausted")]
    Exhausted,

    /// The operation failed because the registry lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
    #[cfg(all(feature = "lock", not(feature = "parking-lot")))]
    #[error("registry lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` for errors that indicate a broken registry rather than a
    /// bad request. These should be propagated, never retried.
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidTransition { .. } | Self::Exhausted => false,
            Self::CorruptState { .. } | Self::DuplicateKey { .. } => true,
            #[cfg(all(feature = "lock", not(feature = "parking-lot")))]
            Self::LockPoisoned => true,
        }
    }
}

fn display_actual(actual: &Option<TicketState>) -> &'static str {
    match actual {
        Some(state) => state.as_str(),
        None => "no such order number",
    }
}

#[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
use crate::registry::{MutexGuard, PoisonError};
#[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
