use core::time::Duration;
use std::collections::{BTreeMap, btree_map::Entry};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    config::RegistryConfig,
    error::{Error, Result},
    registry::OrderNumberRegistry,
    ticket::{Ticket, TicketState},
    time::{MonotonicClock, TimeSource},
};

/// A non-concurrent order number registry suitable for single-threaded
/// environments.
///
/// Tickets are kept in a [`BTreeMap`] keyed by number, so the search for a
/// reusable number always returns the lowest eligible one. Tickets are never
/// removed; the pool only grows.
///
/// Cooldowns expire lazily: nothing happens in the background, and cooled-down
/// tickets only return to idle when the next allocation sweeps them.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Deterministic, lowest-number-first reuse
///
/// ## Recommended When
/// - You own the registry from a single thread or behind your own lock
///
/// ## See Also
/// - [`LockRegistry`]
///
/// [`LockRegistry`]: crate::LockRegistry
#[derive(Clone, Debug)]
pub struct BasicRegistry<T>
where
    T: TimeSource,
{
    tickets: BTreeMap<u32, Ticket>,
    config: RegistryConfig,
    time: T,
}

impl Default for BasicRegistry<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::default())
    }
}

impl<T> BasicRegistry<T>
where
    T: TimeSource,
{
    /// Creates an empty registry with the default [`RegistryConfig`]: numbers
    /// start at 1 and rest for 10 minutes after pickup.
    ///
    /// # Example
    /// ```
    /// use pickup_registry::{BasicRegistry, MonotonicClock};
    ///
    /// let mut registry = BasicRegistry::new(MonotonicClock::default());
    /// assert_eq!(registry.next_idle_order_number().unwrap(), 1);
    /// assert_eq!(registry.next_idle_order_number().unwrap(), 2);
    /// ```
    pub fn new(time: T) -> Self {
        Self::with_config(RegistryConfig::default(), time)
    }

    /// Creates an empty registry with explicit settings.
    pub fn with_config(config: RegistryConfig, time: T) -> Self {
        Self {
            tickets: BTreeMap::new(),
            config,
            time,
        }
    }

    /// The registry's current settings.
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Inclusive lower bound for reissued and newly minted numbers.
    ///
    /// # Example
    /// ```
    /// use pickup_registry::{BasicRegistry, MonotonicClock};
    ///
    /// let registry = BasicRegistry::new(MonotonicClock::default());
    /// assert_eq!(registry.min_order_number(), 1);
    /// ```
    pub const fn min_order_number(&self) -> u32 {
        self.config.min_order_number()
    }

    /// Changes the floor for reissued and newly minted numbers.
    ///
    /// Existing tickets are not touched. Raising the floor only hides lower
    /// idle numbers from the allocator until it is lowered again. A floor of
    /// `0` is stored as `1`.
    pub fn set_min_order_number(&mut self, min_order_number: u32) {
        self.config.set_min_order_number(min_order_number);
    }

    /// How long a picked-up number rests before it may be reissued.
    pub const fn order_number_cooldown(&self) -> Duration {
        self.config.order_number_cooldown()
    }

    /// Changes the cooldown. Tickets already cooling down are measured
    /// against the new value on the next sweep.
    ///
    /// # Example
    /// ```
    /// use core::time::Duration;
    /// use pickup_registry::{BasicRegistry, MonotonicClock};
    ///
    /// let mut registry = BasicRegistry::new(MonotonicClock::default());
    /// registry.set_order_number_cooldown(Duration::ZERO);
    ///
    /// let number = registry.next_idle_order_number().unwrap();
    /// registry.set_order_ready(number).unwrap();
    /// registry.set_order_picked_up(number).unwrap();
    /// assert_eq!(registry.next_idle_order_number().unwrap(), number);
    /// ```
    pub fn set_order_number_cooldown(&mut self, cooldown: Duration) {
        self.config.set_order_number_cooldown(cooldown);
    }

    /// Returns every ticket whose cooldown has elapsed to idle.
    ///
    /// All cooling tickets are validated before any is modified, so an error
    /// leaves the registry unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if a ticket is in cooldown without a
    /// recorded start.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn refresh_cooldown(&mut self) -> Result<()> {
        self.check_cooldown()?;
        let now = self.time.current_millis();
        self.promote_cooled_down(now);
        Ok(())
    }

    fn check_cooldown(&self) -> Result<()> {
        match self
            .tickets
            .values()
            .find(|t| t.state == TicketState::Cooldown && t.cooldown_start.is_none())
        {
            Some(ticket) => Err(Self::cold_corrupt_state(ticket.number)),
            None => Ok(()),
        }
    }

    fn promote_cooled_down(&mut self, now: u64) {
        let cooldown = self.config.cooldown_millis();
        for ticket in self.tickets.values_mut() {
            if ticket.is_cooled_down(now, cooldown) {
                ticket.state = TicketState::Idle;
                ticket.cooldown_start = None;
                #[cfg(feature = "tracing")]
                tracing::debug!(number = ticket.number, "order number cooled down");
            }
        }
    }

    /// Hands out an order number and marks it as in preparation.
    ///
    /// Expired cooldowns are swept first. Then the lowest idle number at or
    /// above [`Self::min_order_number`] is reused. If there is none, a new
    /// number is minted: the floor, or one past the highest number ever
    /// issued, whichever is larger.
    ///
    /// The number is chosen before anything is written, so on error neither
    /// the sweep nor the allocation is applied.
    ///
    /// # Errors
    ///
    /// - [`Error::CorruptState`] if the sweep finds a corrupt ticket
    /// - [`Error::DuplicateKey`] if the minted number already exists
    /// - [`Error::Exhausted`] if [`u32::MAX`] has already been issued
    ///
    /// # Example
    /// ```
    /// use pickup_registry::{BasicRegistry, MonotonicClock};
    ///
    /// let mut registry = BasicRegistry::new(MonotonicClock::default());
    /// registry.set_min_order_number(100);
    /// assert_eq!(registry.next_idle_order_number().unwrap(), 100);
    /// assert_eq!(registry.next_idle_order_number().unwrap(), 101);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_idle_order_number(&mut self) -> Result<u32> {
        self.check_cooldown()?;

        let now = self.time.current_millis();
        let cooldown = self.config.cooldown_millis();
        let min = self.config.min_order_number();

        // idle now, or idle once this call's sweep is applied
        let reusable = self
            .tickets
            .range(min..)
            .map(|(_, ticket)| ticket)
            .find(|ticket| ticket.is_eligible(min) || ticket.is_cooled_down(now, cooldown))
            .map(Ticket::number);

        let number = match reusable {
            Some(number) => number,
            None => self.next_new_number(min)?,
        };

        self.promote_cooled_down(now);

        match self.tickets.entry(number) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().state = TicketState::InPreparation;
                #[cfg(feature = "tracing")]
                tracing::debug!(number, "reusing idle order number");
            }
            Entry::Vacant(slot) => {
                slot.insert(Ticket::in_preparation(number));
                #[cfg(feature = "tracing")]
                tracing::debug!(number, "no idle order number, minted a new one");
            }
        }
        Ok(number)
    }

    fn next_new_number(&self, min: u32) -> Result<u32> {
        let number = match self.tickets.last_key_value() {
            Some((&highest, _)) => highest.checked_add(1).ok_or(Error::Exhausted)?.max(min),
            None => min,
        };

        if self.tickets.contains_key(&number) {
            return Err(Error::DuplicateKey { number });
        }
        Ok(number)
    }

    /// Moves an order from in preparation to ready for pickup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the number is unknown or not in
    /// preparation. The registry is unchanged in that case.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn set_order_ready(&mut self, number: u32) -> Result<()> {
        self.advance(number, TicketState::InPreparation)?;
        Ok(())
    }

    /// Moves an order from ready for pickup to cooldown and stamps the
    /// cooldown start with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the number is unknown or not
    /// ready for pickup. The registry is unchanged in that case.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn set_order_picked_up(&mut self, number: u32) -> Result<()> {
        let now = self.time.current_millis();
        let ticket = self.advance(number, TicketState::ReadyForPickup)?;
        ticket.cooldown_start = Some(now);
        Ok(())
    }

    fn advance(&mut self, number: u32, from: TicketState) -> Result<&mut Ticket> {
        match self.tickets.get_mut(&number) {
            Some(ticket) if ticket.state == from => {
                ticket.state = from.next();
                Ok(ticket)
            }
            other => Err(Error::InvalidTransition {
                number,
                expected: from,
                actual: other.map(|ticket| ticket.state),
            }),
        }
    }

    /// All numbers currently in preparation, ascending.
    ///
    /// # Example
    /// ```
    /// use pickup_registry::{BasicRegistry, MonotonicClock};
    ///
    /// let mut registry = BasicRegistry::new(MonotonicClock::default());
    /// for _ in 0..3 {
    ///     registry.next_idle_order_number().unwrap();
    /// }
    /// registry.set_order_ready(2).unwrap();
    ///
    /// assert_eq!(registry.order_numbers_in_preparation(), vec![1, 3]);
    /// ```
    pub fn order_numbers_in_preparation(&self) -> Vec<u32> {
        self.numbers_in(TicketState::InPreparation)
    }

    /// All numbers waiting for the customer, ascending.
    pub fn order_numbers_ready_for_pickup(&self) -> Vec<u32> {
        self.numbers_in(TicketState::ReadyForPickup)
    }

    /// Numbers picked up but not yet swept back to idle. Does not sweep.
    pub fn order_numbers_in_cooldown(&self) -> Vec<u32> {
        self.numbers_in(TicketState::Cooldown)
    }

    fn numbers_in(&self, state: TicketState) -> Vec<u32> {
        self.tickets
            .values()
            .filter(|ticket| ticket.state == state)
            .map(Ticket::number)
            .collect()
    }

    /// Count of distinct numbers ever issued, in any state. Never decreases.
    pub fn order_number_pool_size(&self) -> usize {
        self.tickets.len()
    }

    /// A copy of the ticket for `number`, if it was ever issued.
    pub fn ticket(&self, number: u32) -> Option<Ticket> {
        self.tickets.get(&number).copied()
    }

    /// All tickets in ascending number order.
    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    #[cfg(test)]
    pub(crate) fn ticket_mut(&mut self, number: u32) -> Option<&mut Ticket> {
        self.tickets.get_mut(&number)
    }

    #[cold]
    #[inline(never)]
    fn cold_corrupt_state(number: u32) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(number, "order number in cooldown without a start time");
        Error::CorruptState { number }
    }
}

impl<T> OrderNumberRegistry for BasicRegistry<T>
where
    T: TimeSource,
{
    fn min_order_number(&self) -> Result<u32> {
        Ok(self.min_order_number())
    }

    fn set_min_order_number(&mut self, min_order_number: u32) -> Result<()> {
        self.set_min_order_number(min_order_number);
        Ok(())
    }

    fn order_number_cooldown(&self) -> Result<Duration> {
        Ok(self.order_number_cooldown())
    }

    fn set_order_number_cooldown(&mut self, cooldown: Duration) -> Result<()> {
        self.set_order_number_cooldown(cooldown);
        Ok(())
    }

    fn refresh_cooldown(&mut self) -> Result<()> {
        self.refresh_cooldown()
    }

    fn next_idle_order_number(&mut self) -> Result<u32> {
        self.next_idle_order_number()
    }

    fn set_order_ready(&mut self, number: u32) -> Result<()> {
        self.set_order_ready(number)
    }

    fn set_order_picked_up(&mut self, number: u32) -> Result<()> {
        self.set_order_picked_up(number)
    }

    fn order_numbers_in_preparation(&self) -> Result<Vec<u32>> {
        Ok(self.order_numbers_in_preparation())
    }

    fn order_numbers_ready_for_pickup(&self) -> Result<Vec<u32>> {
        Ok(self.order_numbers_ready_for_pickup())
    }

    fn order_number_pool_size(&self) -> Result<usize> {
        Ok(self.order_number_pool_size())
    }
}
