mod basic;
mod interface;
#[cfg(feature = "lock")]
mod lock;

pub use basic::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "lock")))]
#[cfg(feature = "lock")]
pub use lock::*;

#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
pub(crate) use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Mutex, MutexGuard};
