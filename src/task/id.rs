use std::fmt;

/// Sequence number of one submission attempt, unique per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(u64);

impl SubmissionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for SubmissionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Where submissions are POSTed.
pub const DEFAULT_ENDPOINT: &str = "/workouts/";
