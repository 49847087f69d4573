use crate::node::GTtCan;
use crate::schedule::REFERENCE_FRAME_DATA_ID;
use crate::{frame, slot, Callbacks, NUM_ROUNDS_BEFORE_SWITCHING_TO_ALL_NODE_ADJUST};

impl<'g, C: Callbacks, const N: usize> GTtCan<'g, C, N> {
    /// Handle a received CAN frame. A no-op before [`GTtCan::try_new`]
    /// returns (there is no schedule to interpret it against).
    ///
    /// Every node processes every frame on the bus, including its own
    /// echoed transmissions and those of nodes it doesn't own slots with.
    pub fn on_frame(&mut self, frame_id: u32, data: u64) {
        if !self.is_initialised {
            return;
        }

        let (slot_id, data_id) = frame::decode(frame_id);

        let rx_node_id = self
            .global
            .iter()
            .find(|e| e.slot_id == slot_id)
            .map_or(0, |e| e.node_id);

        let established_master = self.last_lowest_seen_node_id == self.current_lowest_seen_node_id
            && self.last_lowest_seen_node_id != 0;
        let is_from_master = established_master && rx_node_id == self.last_lowest_seen_node_id;

        // Drift hints: only trust a mid-cycle position to adjust pacing once
        // we trust its source, and only while we still have a cycle position
        // of our own to compare it against.
        let index = self.local_schedule_index as usize;
        let trusted = is_from_master
            || self.rounds_without_shuffling_against_master >= NUM_ROUNDS_BEFORE_SWITCHING_TO_ALL_NODE_ADJUST;
        if trusted && index > 0 && !self.reached_end_of_my_schedule_prematurely {
            let mut hinted = false;
            if slot_id > self.local[index].slot_id {
                // A frame we expected to precede our next slot arrived after
                // it: we're lagging the bus, speed up.
                self.slot_duration_offset -= 1;
                hinted = true;
            }
            if slot_id != 0 && slot_id < self.local[index - 1].slot_id {
                // A frame arrived earlier in the cycle than the one we last
                // acted on: we're ahead of the bus, slow down.
                self.slot_duration_offset += 1;
                hinted = true;
            }
            if hinted && is_from_master {
                self.rounds_without_shuffling_against_master = 0;
            }
        }

        // A node that hasn't started its own timer yet can still join
        // passively off the bus's own reference cadence.
        if !self.is_active && slot_id == 0 {
            self.is_active = true;
        }

        if data_id == REFERENCE_FRAME_DATA_ID {
            if slot_id == 0 && !self.is_time_master {
                if self.dynamic_slot_duration_correction {
                    match self.slot_duration_offset.signum() {
                        1 => self.slot_duration = self.slot_duration.saturating_add(1),
                        -1 => self.slot_duration = self.slot_duration.saturating_sub(1),
                        _ => {}
                    }
                }
                if self.slot_duration_offset == 0
                    && self.rounds_without_shuffling_against_master
                        < NUM_ROUNDS_BEFORE_SWITCHING_TO_ALL_NODE_ADJUST
                {
                    self.rounds_without_shuffling_against_master =
                        self.rounds_without_shuffling_against_master.saturating_add(1);
                }
                self.slot_duration_offset = 0;
                self.reached_end_of_my_schedule_prematurely = false;
            }

            // Re-seek to the first local entry past this slot, speeding up
            // if we were still behind where the reference says the cycle is.
            let gate = trusted && !self.reached_end_of_my_schedule_prematurely;
            match self.local.iter().position(|e| e.slot_id > slot_id) {
                Some(i) => {
                    let i = i as u16;
                    let behind = self.local_schedule_index < i
                        || (i == 0 && self.local_schedule_index != 0);
                    if behind && gate {
                        self.slot_duration_offset -= 1;
                    }
                    self.local_schedule_index = i;
                }
                None => {
                    if gate {
                        self.slot_duration_offset -= 1;
                    }
                    self.local_schedule_index = 0;
                }
            }

            let next = self.local[self.local_schedule_index as usize].slot_id;
            let dt = slot::time_to_next(
                slot_id,
                next,
                self.global_schedule_length,
                self.slot_duration,
                self.interrupt_timing_offset,
            );
            self.callbacks.set_timer_interrupt(dt);
        } else {
            self.callbacks.write_value(data_id, data);
        }

        if rx_node_id != 0 && (rx_node_id < self.current_lowest_seen_node_id || self.current_lowest_seen_node_id == 0)
        {
            self.current_lowest_seen_node_id = rx_node_id;
        }
    }
}
