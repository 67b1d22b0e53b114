use std::time::Duration;

use crate::{Query, SearchId};

/// Delay after which a still-running search shows the "taking longer" advisory.
pub const SLOW_WARNING_AFTER: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowFailure { title: String },
    StartSearch { search_id: SearchId, query: Query },
    ArmSlowWarning { search_id: SearchId, after: Duration },
}
