//! # Publisher Entities

/// Store operation chosen for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    /// INSERT; on unique violation UPDATE by fingerprint.
    InsertElseUpdate,
    /// UPDATE by fingerprint; when no row matched, INSERT.
    UpdateElseInsert,
    /// DELETE by fingerprint; a missing row is success.
    Delete,
}

/// Final state reached in the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted,
    Updated,
    Deleted,
    AlreadyAbsent,
}

/// Successful publish acknowledgment.
///
/// `Filtered` and `Disabled` are successes with zero store writes; callers
/// must not treat them as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAck {
    Written(WriteOutcome),
    /// The event did not pass the only-revoked gate.
    Filtered,
    /// CRL publishing is switched off.
    Disabled,
}

impl PublishAck {
    pub fn wrote(&self) -> bool {
        matches!(self, PublishAck::Written(_))
    }
}
