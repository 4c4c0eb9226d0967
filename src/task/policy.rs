use serde::{Deserialize, Serialize};

/// What to do when the submit control is activated while a request is
/// still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyPolicy {
    /// Ignore the new activation.
    DropNew,
    /// Every activation sends its own request, unsynchronized.
    #[default]
    Parallel,
}
