/// Structural misconfiguration detected at construction time.
///
/// G-TTCAN does not retry or recover from these; they indicate the global
/// schedule or the node's own parameters are wrong, and must be fixed before
/// the node is brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Node id 0 is reserved and forbidden; it is used internally as the
    /// "no observation yet" sentinel for master election.
    ZeroNodeId,
    /// The global schedule is empty, so there is no cycle to project.
    EmptySchedule,
    /// The entry at cycle origin (index 0) does not carry the
    /// reference-frame data id.
    MissingReferenceFrame,
    /// Two global schedule entries claim the same slot id for different
    /// node ids, so no single node owns that slot.
    ConflictingSlotOwner {
        /// The slot id claimed by more than one node.
        slot_id: u16,
    },
    /// The projected local schedule is longer than the node's fixed-capacity
    /// storage (the `N` const generic parameter of [`crate::GTtCan`]).
    LocalScheduleOverflow,
}
