//! Queue engine
//!
//! The moving parts above the store: the per-day sequence allocator, the
//! staff status register, the read-only view projections, and the
//! [`QueueService`] facade that the HTTP and CLI layers drive.

pub mod allocator;
pub mod register;
pub mod service;
pub mod view;

pub use allocator::{Clock, IssuedNumber, SequenceAllocator, SystemClock};
pub use register::StatusRegister;
pub use service::{
    PURGE_CONFIRMATION, PreviousDayCheck, QueueService, TakeNumber, VisitorStatus,
};
pub use view::{DisplayStatus, display_status, position_of};
