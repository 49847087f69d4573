use crate::schedule::{self, GlobalScheduleEntry, LocalScheduleEntry};
use crate::{Callbacks, Error, DEFAULT_STARTUP_PAUSE_SLOTS};

/// The G-TTCAN protocol state machine for a single node.
///
/// `C` is the application's [`Callbacks`] implementation; `N` is the fixed
/// capacity of the local schedule (the projected subsequence of the global
/// schedule this node must act on: its own slots plus every reference
/// slot). Both are chosen once, at construction, and never change.
pub struct GTtCan<'g, C: Callbacks, const N: usize> {
    // Identity & config.
    pub(crate) node_id: u8,
    pub(crate) global: &'g [GlobalScheduleEntry],
    pub(crate) global_schedule_length: u16,
    pub(crate) slot_duration: u32,
    pub(crate) interrupt_timing_offset: u32,
    pub(crate) dynamic_slot_duration_correction: bool,

    // Lifecycle flags.
    pub(crate) is_initialised: bool,
    pub(crate) is_active: bool,
    pub(crate) is_time_master: bool,

    // Schedule cursor.
    pub(crate) local: heapless::Vec<LocalScheduleEntry, N>,
    pub(crate) local_schedule_index: u16,

    // Drift tracking.
    pub(crate) slot_duration_offset: i32,
    pub(crate) reached_end_of_my_schedule_prematurely: bool,
    pub(crate) rounds_without_shuffling_against_master: u8,

    // Election tracking.
    pub(crate) last_lowest_seen_node_id: u8,
    pub(crate) current_lowest_seen_node_id: u8,

    pub(crate) callbacks: C,
}

impl<'g, C: Callbacks, const N: usize> GTtCan<'g, C, N> {
    /// Construct a node's state machine: validate the global schedule,
    /// project this node's local schedule from it, and zero all drift and
    /// election state. Does not arm a timer or become active (call
    /// [`GTtCan::start`] for that).
    ///
    /// `global` must be the same, in the same order, on every node.
    pub fn try_new(
        node_id: u8,
        global: &'g [GlobalScheduleEntry],
        slot_duration: u32,
        interrupt_timing_offset: u32,
        dynamic_slot_duration_correction: bool,
        callbacks: C,
    ) -> Result<Self, Error> {
        if node_id == 0 {
            return Err(Error::ZeroNodeId);
        }
        schedule::validate(global)?;
        let local = schedule::project(global, node_id)?;

        Ok(Self {
            node_id,
            global,
            global_schedule_length: global.len() as u16,
            slot_duration,
            interrupt_timing_offset,
            dynamic_slot_duration_correction,

            is_initialised: true,
            is_active: false,
            is_time_master: false,

            local,
            local_schedule_index: 0,

            slot_duration_offset: 0,
            reached_end_of_my_schedule_prematurely: false,
            rounds_without_shuffling_against_master: 0,

            last_lowest_seen_node_id: 0,
            current_lowest_seen_node_id: 0,

            callbacks,
        })
    }

    /// Enter operation. Arms a staggered first timer (`node_id *
    /// DEFAULT_STARTUP_PAUSE_SLOTS` extra slots on top of one full cycle),
    /// so that two nodes booting at the same instant don't collide on their
    /// first transmission.
    pub fn start(&mut self) {
        self.is_active = true;
        self.local_schedule_index = 0;
        self.last_lowest_seen_node_id = self.node_id;

        let startup_slots =
            self.global_schedule_length + self.node_id as u16 * DEFAULT_STARTUP_PAUSE_SLOTS as u16;
        let startup_wait = startup_slots as u32 * self.slot_duration;
        self.callbacks.set_timer_interrupt(startup_wait);
    }

    /// This node's id.
    pub fn node_id(&self) -> u8 {
        self.node_id
    }

    /// Whether the node has completed [`GTtCan::try_new`].
    pub fn is_initialised(&self) -> bool {
        self.is_initialised
    }

    /// Whether the node is pacing transmissions from its local schedule.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether this node is currently entitled to emit reference frames.
    pub fn is_time_master(&self) -> bool {
        self.is_time_master
    }

    /// Current position within the local schedule.
    pub fn local_schedule_index(&self) -> u16 {
        self.local_schedule_index
    }

    /// The node's own projected schedule.
    pub fn local_schedule(&self) -> &[LocalScheduleEntry] {
        &self.local
    }

    /// Current slot duration, in the caller's time units. May drift from the
    /// value passed to [`GTtCan::try_new`] if dynamic slot-duration
    /// correction is enabled.
    pub fn slot_duration(&self) -> u32 {
        self.slot_duration
    }

    /// Signed accumulator of drift hints since the last reference frame;
    /// positive means this node believes it is running fast.
    pub fn slot_duration_offset(&self) -> i32 {
        self.slot_duration_offset
    }

    /// A reference to the shared application callbacks, for tests that need
    /// to inspect what was recorded without tearing the node down.
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    #[cfg(test)]
    pub(crate) fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }
}
