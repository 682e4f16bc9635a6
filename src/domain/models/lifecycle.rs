#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Issued when a request is submitted. Only the ticket matching the
/// lifecycle's latest sequence number may settle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        return self.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// The result belongs to the live request and should be written to state.
    Applied,
    /// The request was superseded while in flight. The gate is released but
    /// the result must be dropped.
    Discarded,
    /// Not the in-flight request, nothing changed.
    Unknown,
}

/// Single-flight state machine for one kind of remote request:
/// Idle -> Pending -> (Succeeded | Failed), back to Pending on the next
/// submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lifecycle {
    phase: Phase,
    sequence: u64,
    superseded: bool,
}

impl Lifecycle {
    pub fn phase(&self) -> Phase {
        return self.phase;
    }

    pub fn is_pending(&self) -> bool {
        return self.phase == Phase::Pending;
    }

    pub fn is_superseded(&self) -> bool {
        return self.is_pending() && self.superseded;
    }

    /// Takes the gate. Returns `None` while another request is pending.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_pending() {
            return None;
        }

        self.sequence += 1;
        self.phase = Phase::Pending;
        self.superseded = false;

        return Some(Ticket(self.sequence));
    }

    /// Marks the in-flight request as stale. Returns false when idle.
    pub fn supersede(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }

        self.superseded = true;
        return true;
    }

    pub fn settle(&mut self, ticket: Ticket, succeeded: bool) -> Settlement {
        if !self.is_pending() || ticket.0 != self.sequence {
            return Settlement::Unknown;
        }

        if self.superseded {
            self.superseded = false;
            self.phase = Phase::Idle;
            return Settlement::Discarded;
        }

        if succeeded {
            self.phase = Phase::Succeeded;
        } else {
            self.phase = Phase::Failed;
        }

        return Settlement::Applied;
    }
}
