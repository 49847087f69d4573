//! Slot arithmetic: distances around the cycle, and the timer deadline they
//! imply.

/// Number of slots from `current` to `next`, wrapping around a cycle of
/// length `global_schedule_length`. Always in `1..=global_schedule_length`.
///
/// Callers never invoke this with `current == next` except at cycle wrap,
/// where the intended result is a full cycle: the formula returns
/// `global_schedule_length` in that case, which is exactly that.
#[inline]
pub const fn slots_to_next(current: u16, next: u16, global_schedule_length: u16) -> u16 {
    if current < next {
        next - current
    } else {
        global_schedule_length - current + next
    }
}

/// Time until the slot at `next_slot_id`, counted from `current_slot_id`,
/// compensating for ISR entry latency (`interrupt_timing_offset`) and
/// clamped to a minimum of 1 time unit so a non-positive deadline can never
/// arm an immediately-refiring timer.
#[inline]
pub const fn time_to_next(
    current_slot_id: u16,
    next_slot_id: u16,
    global_schedule_length: u16,
    slot_duration: u32,
    interrupt_timing_offset: u32,
) -> u32 {
    let slots = slots_to_next(current_slot_id, next_slot_id, global_schedule_length) as u32;
    let time = slots * slot_duration;
    if time > interrupt_timing_offset {
        time - interrupt_timing_offset
    } else {
        1
    }
}
