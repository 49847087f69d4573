//! G-TTCAN: a globally-scheduled, time-triggered CAN protocol core.
//!
//! The core is a single-instance state machine driven by two external
//! events: timer expiry ([`GTtCan::on_tick`]) and frame reception
//! ([`GTtCan::on_frame`]), plus the quiescent [`GTtCan::try_new`] /
//! [`GTtCan::start`] calls made from the main context. It never blocks and
//! never allocates after construction; the only collaborators it knows about
//! are the four methods of the [`Callbacks`] trait supplied at construction
//! time.
//!
//! This crate is `no_std` and does not allocate: the local schedule lives in
//! a fixed-capacity [`heapless::Vec`], sized by the `N` const generic
//! parameter threaded through [`GTtCan`].
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod callbacks;
mod error;
mod frame;
mod node;
mod rx;
mod schedule;
mod slot;
mod tx;

pub use callbacks::Callbacks;
pub use error::Error;
pub use frame::{decode, encode, GTTCAN_NUM_DATA_ID_BITS, GTTCAN_NUM_SLOT_ID_BITS};
pub use node::GTtCan;
pub use schedule::{GlobalScheduleEntry, LocalScheduleEntry, REFERENCE_FRAME_DATA_ID};
pub use slot::{slots_to_next, time_to_next};

/// Number of slots a freshly-started node waits, per unit of its own node id,
/// before its first transmission, staggering simultaneously-booting nodes so
/// they don't collide on slot 0.
pub const DEFAULT_STARTUP_PAUSE_SLOTS: u8 = 2;

/// Consecutive drift-free reference frames required before a non-master
/// follower starts accepting drift hints from *any* sender, not just the
/// elected time master.
pub const NUM_ROUNDS_BEFORE_SWITCHING_TO_ALL_NODE_ADJUST: u8 = 2;
