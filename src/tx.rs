use crate::node::GTtCan;
use crate::schedule::REFERENCE_FRAME_DATA_ID;
use crate::{frame, slot, Callbacks};

impl<'g, C: Callbacks, const N: usize> GTtCan<'g, C, N> {
    /// Handle a timer expiry. Arms the next timer before emitting, so jitter
    /// in the CAN driver cannot delay subsequent slots.
    ///
    /// A no-op if the node isn't active yet (before [`GTtCan::start`], or
    /// before a reference frame has granted passive activation).
    pub fn on_tick(&mut self) {
        if !self.is_active {
            return;
        }

        let current = self.local[self.local_schedule_index as usize];

        // Cycle boundary: settle last cycle's election before starting a
        // new one.
        if self.local_schedule_index == 0 {
            self.is_time_master = self.last_lowest_seen_node_id == self.current_lowest_seen_node_id
                && self.current_lowest_seen_node_id == self.node_id
                && self.current_lowest_seen_node_id != 0;
            self.last_lowest_seen_node_id = self.current_lowest_seen_node_id;
            self.current_lowest_seen_node_id = 0;
        }

        let local_len = self.local.len() as u16;
        let next_index = (self.local_schedule_index + 1) % local_len;
        self.local_schedule_index = next_index;
        if next_index == 0 && !self.is_time_master {
            self.reached_end_of_my_schedule_prematurely = true;
        }

        let next_slot_id = self.local[next_index as usize].slot_id;
        let dt = slot::time_to_next(
            current.slot_id,
            next_slot_id,
            self.global_schedule_length,
            self.slot_duration,
            self.interrupt_timing_offset,
        );
        self.callbacks.set_timer_interrupt(dt);

        let frame_id = frame::encode(current.slot_id, current.data_id);
        let payload = self.callbacks.read_value(current.data_id);

        if current.data_id != REFERENCE_FRAME_DATA_ID || self.is_time_master {
            self.callbacks.transmit_frame(frame_id, payload);
        }

        if self.node_id < self.current_lowest_seen_node_id || self.current_lowest_seen_node_id == 0 {
            self.current_lowest_seen_node_id = self.node_id;
        }
    }
}
