use core::time::Duration;

/// Lowest order number handed out unless configured otherwise.
pub const DEFAULT_MIN_ORDER_NUMBER: u32 = 1;

/// Time a picked-up number rests before it may be reissued: 10 minutes.
pub const DEFAULT_ORDER_NUMBER_COOLDOWN: Duration = Duration::from_secs(10 * 60);

/// Registry settings.
///
/// Both values can also be changed on a live registry. Changes never touch
/// existing tickets; they only affect which idle numbers are eligible for reuse,
/// what number is minted next, and when cooling tickets expire (the cooldown is
/// evaluated against each ticket's start time on every sweep).
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use pickup_registry::RegistryConfig;
///
/// let config = RegistryConfig::default()
///     .with_min_order_number(100)
///     .with_order_number_cooldown(Duration::from_secs(30));
///
/// assert_eq!(config.min_order_number(), 100);
/// assert_eq!(config.order_number_cooldown(), Duration::from_secs(30));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistryConfig {
    min_order_number: u32,
    order_number_cooldown: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ORDER_NUMBER, DEFAULT_ORDER_NUMBER_COOLDOWN)
    }
}

impl RegistryConfig {
    /// Order numbers are positive, so a minimum of `0` is stored as `1`.
    pub const fn new(min_order_number: u32, order_number_cooldown: Duration) -> Self {
        Self {
            min_order_number: clamp_min(min_order_number),
            order_number_cooldown,
        }
    }

    /// Returns the config with a different floor. `0` is stored as `1`.
    #[must_use]
    pub const fn with_min_order_number(mut self, min_order_number: u32) -> Self {
        self.set_min_order_number(min_order_number);
        self
    }

    /// Returns the config with a different cooldown.
    #[must_use]
    pub const fn with_order_number_cooldown(mut self, cooldown: Duration) -> Self {
        self.order_number_cooldown = cooldown;
        self
    }

    /// Inclusive lower bound for reissued and newly minted numbers.
    pub const fn min_order_number(&self) -> u32 {
        self.min_order_number
    }

    /// Minimum time a picked-up number rests before it may be reissued.
    pub const fn order_number_cooldown(&self) -> Duration {
        self.order_number_cooldown
    }

    /// Changes the floor in place. `0` is stored as `1`.
    pub const fn set_min_order_number(&mut self, min_order_number: u32) {
        self.min_order_number = clamp_min(min_order_number);
    }

    /// Changes the cooldown in place.
    pub const fn set_order_number_cooldown(&mut self, cooldown: Duration) {
        self.order_number_cooldown = cooldown;
    }

    /// The cooldown in whole milliseconds, rounded up so a sub-millisecond
    /// remainder never shortens it.
    pub(crate) const fn cooldown_millis(&self) -> u128 {
        let cooldown = self.order_number_cooldown;
        cooldown.as_millis() + (cooldown.subsec_nanos() % 1_000_000 != 0) as u128
    }
}

const fn clamp_min(min_order_number: u32) -> u32 {
    if min_order_number == 0 {
        1
    } else {
        min_order_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.min_order_number(), 1);
        assert_eq!(config.order_number_cooldown(), Duration::from_secs(600));
    }

    #[test]
    fn zero_minimum_is_raised_to_one() {
        assert_eq!(RegistryConfig::default().with_min_order_number(0).min_order_number(), 1);

        let mut config = RegistryConfig::new(0, Duration::ZERO);
        assert_eq!(config.min_order_number(), 1);
        config.set_min_order_number(42);
        assert_eq!(config.min_order_number(), 42);
    }

    #[test]
    fn cooldown_millis_rounds_up() {
        let cooldown = |d: Duration| RegistryConfig::default().with_order_number_cooldown(d).cooldown_millis();

        assert_eq!(cooldown(Duration::ZERO), 0);
        assert_eq!(cooldown(Duration::from_nanos(1)), 1);
        assert_eq!(cooldown(Duration::from_micros(900)), 1);
        assert_eq!(cooldown(Duration::from_millis(2)), 2);
        assert_eq!(cooldown(Duration::from_micros(2_500)), 3);
        assert_eq!(cooldown(Duration::from_secs(600)), 600_000);
    }
}
