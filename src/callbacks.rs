/// The four hardware collaborators the core requires, injected at
/// construction instead of reached through process-wide state.
///
/// An implementer typically comes in two flavours: an "operational" one that
/// wraps the real CAN controller, timer peripheral, and application data
/// store, and a "simulated" one used in tests that records calls against a
/// virtual bus and clock. Both satisfy the same trait.
pub trait Callbacks {
    /// Queue `data` for transmission under extended CAN id `frame_id`.
    /// Best-effort; must not block.
    fn transmit_frame(&mut self, frame_id: u32, data: u64);

    /// Replace any outstanding timer with one that fires once after `delay`
    /// time units.
    fn set_timer_interrupt(&mut self, delay: u32);

    /// Return the current application value for `data_id`.
    fn read_value(&mut self, data_id: u16) -> u64;

    /// Store a received application value for `data_id`.
    fn write_value(&mut self, data_id: u16, data: u64);
}
