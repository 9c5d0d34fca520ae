use core::fmt;

/// Lifecycle state of an issued order number.
///
/// Tickets only ever move forward along the cycle
/// `Idle -> InPreparation -> ReadyForPickup -> Cooldown -> Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketState {
    /// Issued before but not assigned to an active order.
    #[default]
    Idle,
    /// Assigned to an order that is being prepared.
    InPreparation,
    /// Preparation is done and the order waits for the customer.
    ReadyForPickup,
    /// Picked up; the number is quarantined until the cooldown elapses.
    Cooldown,
}

impl TicketState {
    /// The only state this one may transition to.
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::InPreparation,
            Self::InPreparation => Self::ReadyForPickup,
            Self::ReadyForPickup => Self::Cooldown,
            Self::Cooldown => Self::Idle,
        }
    }

    /// Lower-case name used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InPreparation => "in preparation",
            Self::ReadyForPickup => "ready for pickup",
            Self::Cooldown => "cooldown",
        }
    }
}

impl fmt::Display for TicketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata kept for every order number a registry has issued.
///
/// `cooldown_start` is the [`TimeSource`] reading taken when the ticket was
/// picked up. It is set exactly while the ticket is in
/// [`TicketState::Cooldown`].
///
/// [`TimeSource`]: crate::TimeSource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub(crate) number: u32,
    pub(crate) state: TicketState,
    pub(crate) cooldown_start: Option<u64>,
}

impl Ticket {
    pub(crate) const fn in_preparation(number: u32) -> Self {
        Self {
            number,
            state: TicketState::InPreparation,
            cooldown_start: None,
        }
    }

    /// The order number. Fixed for the ticket's lifetime.
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> TicketState {
        self.state
    }

    /// Milliseconds reading at which the cooldown began, if cooling down.
    pub const fn cooldown_start(&self) -> Option<u64> {
        self.cooldown_start
    }

    /// Whether the allocator may hand this ticket out under the given floor.
    pub const fn is_eligible(&self, min_order_number: u32) -> bool {
        matches!(self.state, TicketState::Idle) && self.number >= min_order_number
    }

    /// Whether this ticket is cooling down and has done so for at least
    /// `cooldown_millis` at time `now`.
    ///
    /// A ticket in cooldown without a start time never counts as cooled down,
    /// nor does a clock reading behind the start.
    pub(crate) fn is_cooled_down(&self, now: u64, cooldown_millis: u128) -> bool {
        match (self.state, self.cooldown_start) {
            (TicketState::Cooldown, Some(start)) => {
                u128::from(now.saturating_sub(start)) >= cooldown_millis
            }
            _ => false,
        }
    }
}
