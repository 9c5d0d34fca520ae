use core::time::Duration;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    config::RegistryConfig,
    error::Result,
    registry::{BasicRegistry, Mutex, MutexGuard, OrderNumberRegistry},
    ticket::Ticket,
    time::{MonotonicClock, TimeSource},
};

/// A lock-based order number registry suitable for multi-threaded
/// environments.
///
/// This registry wraps a [`BasicRegistry`] in an [`Arc<Mutex<_>>`]. Every
/// public call holds the lock for its whole duration, so the cooldown sweep and
/// the scan-then-mutate allocation run as one critical section. Clones share
/// the same tickets.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Same reuse order as [`BasicRegistry`]
///
/// ## Recommended When
/// - Several threads hand out or advance order numbers
///
/// ## See Also
/// - [`BasicRegistry`]
pub struct LockRegistry<T>
where
    T: TimeSource,
{
    pub(crate) state: Arc<Mutex<BasicRegistry<T>>>,
}

impl<T> Clone for LockRegistry<T>
where
    T: TimeSource,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for LockRegistry<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::default())
    }
}

impl<T> From<BasicRegistry<T>> for LockRegistry<T>
where
    T: TimeSource,
{
    fn from(registry: BasicRegistry<T>) -> Self {
        Self {
            state: Arc::new(Mutex::new(registry)),
        }
    }
}

impl<T> LockRegistry<T>
where
    T: TimeSource,
{
    /// Creates an empty registry with the default [`RegistryConfig`].
    ///
    /// # Example
    /// ```
    /// use pickup_registry::{LockRegistry, MonotonicClock};
    ///
    /// let registry = LockRegistry::new(MonotonicClock::default());
    /// let handle = registry.clone();
    ///
    /// let number = std::thread::spawn(move || handle.next_idle_order_number())
    ///     .join()
    ///     .unwrap()
    ///     .unwrap();
    ///
    /// assert_eq!(number, 1);
    /// assert_eq!(registry.order_numbers_in_preparation().unwrap(), vec![1]);
    /// ```
    pub fn new(time: T) -> Self {
        Self::with_config(RegistryConfig::default(), time)
    }

    pub fn with_config(config: RegistryConfig, time: T) -> Self {
        BasicRegistry::with_config(config, time).into()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BasicRegistry<T>>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn config(&self) -> Result<RegistryConfig> {
        Ok(*self.lock()?.config())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn min_order_number(&self) -> Result<u32> {
        Ok(self.lock()?.min_order_number())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn set_min_order_number(&self, min_order_number: u32) -> Result<()> {
        self.lock()?.set_min_order_number(min_order_number);
        Ok(())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn order_number_cooldown(&self) -> Result<Duration> {
        Ok(self.lock()?.order_number_cooldown())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn set_order_number_cooldown(&self, cooldown: Duration) -> Result<()> {
        self.lock()?.set_order_number_cooldown(cooldown);
        Ok(())
    }

    /// See [`BasicRegistry::refresh_cooldown`].
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    /// - Returns [`Error::CorruptState`] for a cooling ticket without a start.
    ///
    /// [`Error::CorruptState`]: crate::Error::CorruptState
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn refresh_cooldown(&self) -> Result<()> {
        self.lock()?.refresh_cooldown()
    }

    /// See [`BasicRegistry::next_idle_order_number`].
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    /// - Otherwise the same errors as the single-threaded registry.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_idle_order_number(&self) -> Result<u32> {
        self.lock()?.next_idle_order_number()
    }

    /// See [`BasicRegistry::set_order_ready`].
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    /// - Returns [`Error::InvalidTransition`] if the number is not in
    ///   preparation.
    ///
    /// [`Error::InvalidTransition`]: crate::Error::InvalidTransition
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn set_order_ready(&self, number: u32) -> Result<()> {
        self.lock()?.set_order_ready(number)
    }

    /// See [`BasicRegistry::set_order_picked_up`].
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    /// - Returns [`Error::InvalidTransition`] if the number is not ready for
    ///   pickup.
    ///
    /// [`Error::InvalidTransition`]: crate::Error::InvalidTransition
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn set_order_picked_up(&self, number: u32) -> Result<()> {
        self.lock()?.set_order_picked_up(number)
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn order_numbers_in_preparation(&self) -> Result<Vec<u32>> {
        Ok(self.lock()?.order_numbers_in_preparation())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn order_numbers_ready_for_pickup(&self) -> Result<Vec<u32>> {
        Ok(self.lock()?.order_numbers_ready_for_pickup())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn order_numbers_in_cooldown(&self) -> Result<Vec<u32>> {
        Ok(self.lock()?.order_numbers_in_cooldown())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn order_number_pool_size(&self) -> Result<usize> {
        Ok(self.lock()?.order_number_pool_size())
    }

    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn ticket(&self, number: u32) -> Result<Option<Ticket>> {
        Ok(self.lock()?.ticket(number))
    }
}

impl<T> OrderNumberRegistry for LockRegistry<T>
where
    T: TimeSource,
{
    fn min_order_number(&self) -> Result<u32> {
        self.min_order_number()
    }

    fn set_min_order_number(&mut self, min_order_number: u32) -> Result<()> {
        LockRegistry::set_min_order_number(self, min_order_number)
    }

    fn order_number_cooldown(&self) -> Result<Duration> {
        self.order_number_cooldown()
    }

    fn set_order_number_cooldown(&mut self, cooldown: Duration) -> Result<()> {
        LockRegistry::set_order_number_cooldown(self, cooldown)
    }

    fn refresh_cooldown(&mut self) -> Result<()> {
        LockRegistry::refresh_cooldown(self)
    }

    fn next_idle_order_number(&mut self) -> Result<u32> {
        LockRegistry::next_idle_order_number(self)
    }

    fn set_order_ready(&mut self, number: u32) -> Result<()> {
        LockRegistry::set_order_ready(self, number)
    }

    fn set_order_picked_up(&mut self, number: u32) -> Result<()> {
        LockRegistry::set_order_picked_up(self, number)
    }

    fn order_numbers_in_preparation(&self) -> Result<Vec<u32>> {
        self.order_numbers_in_preparation()
    }

    fn order_numbers_ready_for_pickup(&self) -> Result<Vec<u32>> {
        self.order_numbers_ready_for_pickup()
    }

    fn order_number_pool_size(&self) -> Result<usize> {
        self.order_number_pool_size()
    }
}
