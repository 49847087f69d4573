//! The global schedule and its per-node projection.

use crate::Error;

/// `data_id` reserved for the reference frame. Slot id 0 is reserved for it:
/// the entry at cycle origin must carry this data id.
pub const REFERENCE_FRAME_DATA_ID: u16 = 0;

/// One entry of the schedule every node holds identically: node `node_id`
/// transmits `data_id` in slot `slot_id`. Position within the schedule slice
/// is the slot's logical time within one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlobalScheduleEntry {
    pub node_id: u8,
    pub slot_id: u16,
    pub data_id: u16,
}

/// One entry of a node's own projection of the global schedule: the slots it
/// must react to, own transmissions and reference frames alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalScheduleEntry {
    pub slot_id: u16,
    pub data_id: u16,
}

/// Check the global schedule for the structural misconfigurations this core
/// can detect ahead of time: a forbidden node id, a missing reference frame
/// at cycle origin, or two entries disputing ownership of the same slot.
pub fn validate(global: &[GlobalScheduleEntry]) -> Result<(), Error> {
    let Some(origin) = global.first() else {
        return Err(Error::EmptySchedule);
    };
    if origin.data_id != REFERENCE_FRAME_DATA_ID {
        return Err(Error::MissingReferenceFrame);
    }
    for entry in global {
        if entry.node_id == 0 {
            return Err(Error::ZeroNodeId);
        }
    }
    for (i, a) in global.iter().enumerate() {
        for b in &global[i + 1..] {
            if a.slot_id == b.slot_id && a.node_id != b.node_id {
                return Err(Error::ConflictingSlotOwner { slot_id: a.slot_id });
            }
        }
    }
    Ok(())
}

/// Project the global schedule down to the entries this node must act on:
/// every entry it owns, plus every reference-frame entry. Order is preserved
/// from the global schedule.
pub fn project<const N: usize>(
    global: &[GlobalScheduleEntry],
    node_id: u8,
) -> Result<heapless::Vec<LocalScheduleEntry, N>, Error> {
    let mut local = heapless::Vec::new();
    for entry in global {
        if entry.node_id == node_id || entry.data_id == REFERENCE_FRAME_DATA_ID {
            local
                .push(LocalScheduleEntry {
                    slot_id: entry.slot_id,
                    data_id: entry.data_id,
                })
                .map_err(|_| Error::LocalScheduleOverflow)?;
        }
    }
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(node_id: u8, slot_id: u16, data_id: u16) -> GlobalScheduleEntry {
        GlobalScheduleEntry { node_id, slot_id, data_id }
    }

    #[test]
    fn scenario_schedule_projection_correctness() {
        let global = [
            entry(1, 0, 0),
            entry(2, 1, 1),
            entry(1, 2, 1),
            entry(3, 3, 0),
            entry(2, 4, 1),
        ];
        let local: heapless::Vec<LocalScheduleEntry, 8> = project(&global, 2).unwrap();
        assert_eq!(
            local.as_slice(),
            &[
                LocalScheduleEntry { slot_id: 1, data_id: 1 },
                LocalScheduleEntry { slot_id: 3, data_id: 0 },
                LocalScheduleEntry { slot_id: 4, data_id: 1 },
            ]
        );
    }

    #[test]
    fn projection_is_idempotent_given_an_already_filtered_input() {
        let global = [entry(1, 0, 0), entry(2, 1, 1), entry(1, 2, 1)];
        let once: heapless::Vec<LocalScheduleEntry, 8> = project(&global, 2).unwrap();
        let reprojected: heapless::Vec<GlobalScheduleEntry, 8> = once
            .iter()
            .map(|e| entry(2, e.slot_id, e.data_id))
            .collect();
        let twice: heapless::Vec<LocalScheduleEntry, 8> = project(&reprojected, 2).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn overflow_is_an_error_not_a_silent_truncation() {
        let global = [entry(1, 0, 0), entry(1, 1, 1), entry(1, 2, 1)];
        let result: Result<heapless::Vec<LocalScheduleEntry, 2>, Error> = project(&global, 1);
        assert_eq!(result, Err(Error::LocalScheduleOverflow));
    }

    #[test]
    fn rejects_node_id_zero() {
        let global = [entry(0, 0, 0)];
        assert_eq!(validate(&global), Err(Error::ZeroNodeId));
    }

    #[test]
    fn rejects_missing_reference_frame_at_origin() {
        let global = [entry(1, 0, 1)];
        assert_eq!(validate(&global), Err(Error::MissingReferenceFrame));
    }

    #[test]
    fn rejects_conflicting_slot_owners() {
        let global = [entry(1, 0, 0), entry(1, 1, 1), entry(2, 1, 2)];
        assert_eq!(
            validate(&global),
            Err(Error::ConflictingSlotOwner { slot_id: 1 })
        );
    }
}
