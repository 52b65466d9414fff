use serde::Serialize;

/// Snapshot of a token's remaining byte budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaView {
    pub remaining_bytes: i64,
}

impl QuotaView {
    pub fn new(remaining_bytes: i64) -> Self {
        Self { remaining_bytes }
    }

    pub fn unlimited() -> Self {
        Self {
            remaining_bytes: i64::MAX,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_bytes <= 0
    }
}
