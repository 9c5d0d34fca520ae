use core::time::Duration;

use crate::error::Result;

/// The operations every order number registry supports.
///
/// Implemented by [`BasicRegistry`] for single-threaded use and by
/// [`LockRegistry`] for shared use. All methods are fallible so both can be
/// driven through the same interface; the lock-based registry additionally
/// reports a poisoned lock.
///
/// [`BasicRegistry`]: crate::BasicRegistry
/// [`LockRegistry`]: crate::LockRegistry
pub trait OrderNumberRegistry {
    /// Inclusive lower bound for reissued and newly minted numbers.
    fn min_order_number(&self) -> Result<u32>;

    /// Changes the floor. Existing tickets keep their state.
    fn set_min_order_number(&mut self, min_order_number: u32) -> Result<()>;

    fn order_number_cooldown(&self) -> Result<Duration>;

    /// Changes the cooldown. Applies to tickets already cooling down.
    fn set_order_number_cooldown(&mut self, cooldown: Duration) -> Result<()>;

    /// Returns every cooled-down ticket to idle.
    ///
    /// Runs automatically at the start of every allocation. Calling it again
    /// without time passing changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if a ticket in cooldown has no start
    /// time. No ticket is modified in that case.
    ///
    /// [`Error::CorruptState`]: crate::Error::CorruptState
    fn refresh_cooldown(&mut self) -> Result<()>;

    /// Hands out the lowest idle number at or above the floor, or mints a new
    /// one, and marks it as in preparation.
    ///
    /// # Errors
    ///
    /// - [`Error::CorruptState`] from the cooldown sweep
    /// - [`Error::DuplicateKey`] if the minted number already exists
    /// - [`Error::Exhausted`] if no number above the highest issued one is
    ///   left
    ///
    /// [`Error::CorruptState`]: crate::Error::CorruptState
    /// [`Error::DuplicateKey`]: crate::Error::DuplicateKey
    /// [`Error::Exhausted`]: crate::Error::Exhausted
    fn next_idle_order_number(&mut self) -> Result<u32>;

    /// Marks an order as ready for pickup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the number is unknown or not in
    /// preparation.
    ///
    /// [`Error::InvalidTransition`]: crate::Error::InvalidTransition
    fn set_order_ready(&mut self, number: u32) -> Result<()>;

    /// Marks an order as picked up and starts the number's cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the number is unknown or not
    /// ready for pickup.
    ///
    /// [`Error::InvalidTransition`]: crate::Error::InvalidTransition
    fn set_order_picked_up(&mut self, number: u32) -> Result<()>;

    /// All numbers currently in preparation, ascending.
    fn order_numbers_in_preparation(&self) -> Result<Vec<u32>>;

    /// All numbers currently waiting for pickup, ascending.
    fn order_numbers_ready_for_pickup(&self) -> Result<Vec<u32>>;

    /// Count of distinct numbers ever issued. Never decreases.
    fn order_number_pool_size(&self) -> Result<usize>;
}
