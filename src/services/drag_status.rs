use crate::config::Constraints;
use serde::{Deserialize, Serialize};

/// Visual state of a dropzone while something hovers over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragStatus {
    Base,
    Accept,
    Reject,
}

/// What the host knows during a drag, before any file name or size is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    pub active: bool,
    /// Host-level verdicts on the dragged items (type checks and the like).
    /// Both are false when the host cannot judge, e.g. for non-file payloads.
    pub host_accepts: bool,
    pub host_rejects: bool,
    pub item_count: usize,
}

/// Predicts whether a drop would be accepted.
///
/// Duplicates cannot be detected while dragging, so a batch that overflows
/// `max_files` here may still be admitted once dropped.
pub fn drag_status(drag: DragState, held_len: usize, constraints: &Constraints) -> DragStatus {
    if !drag.active {
        return DragStatus::Base;
    }

    let over_capacity = constraints
        .max_files
        .is_some_and(|max| held_len + drag.item_count > max);

    if drag.host_accepts && !over_capacity {
        DragStatus::Accept
    } else if drag.host_rejects || over_capacity {
        DragStatus::Reject
    } else {
        DragStatus::Base
    }
}
