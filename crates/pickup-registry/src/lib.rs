//! Recycling pickup numbers for orders.
//!
//! A registry hands out sequential ticket numbers, tracks each ticket through
//! `Idle -> InPreparation -> ReadyForPickup -> Cooldown -> Idle`, and only
//! reissues a number once its cooldown has elapsed and it is at or above the
//! configured minimum.
//!
//! ```
//! use core::time::Duration;
//! use pickup_registry::{BasicRegistry, MonotonicClock, RegistryConfig};
//!
//! let config = RegistryConfig::default().with_order_number_cooldown(Duration::from_secs(60));
//! let mut registry = BasicRegistry::with_config(config, MonotonicClock::default());
//!
//! let number = registry.next_idle_order_number().unwrap();
//! assert_eq!(number, 1);
//!
//! registry.set_order_ready(number).unwrap();
//! assert_eq!(registry.order_numbers_ready_for_pickup(), vec![1]);
//!
//! registry.set_order_picked_up(number).unwrap();
//! assert_eq!(registry.next_idle_order_number().unwrap(), 2);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod registry;
mod ticket;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::registry::*;
pub use crate::ticket::*;
pub use crate::time::*;
