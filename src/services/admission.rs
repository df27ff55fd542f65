use crate::config::Constraints;
use crate::models::{DroppedFile, HeldFileSet, RawRejection};

/// Outcome of one admission decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// The held set to persist. Equal to the input on overflow.
    pub held: HeldFileSet,
    /// Host rejections, followed by capacity rejections on overflow.
    pub rejections: Vec<RawRejection>,
    /// Candidates that were not already held, for callers tracking their own set.
    pub additions: Vec<DroppedFile>,
    /// False when the batch was refused for capacity.
    pub admitted: bool,
}

/// Files of `to_filter` whose identity appears nowhere in `intersecting`.
pub fn without_duplicates(to_filter: &[DroppedFile], intersecting: &[DroppedFile]) -> Vec<DroppedFile> {
    to_filter
        .iter()
        .filter(|file| !intersecting.iter().any(|other| other.same_identity(file)))
        .cloned()
        .collect()
}

/// Collapses files of one batch that share an identity, keeping the last one.
fn dedupe_batch(candidates: Vec<DroppedFile>) -> Vec<DroppedFile> {
    let mut kept: Vec<DroppedFile> = Vec::with_capacity(candidates.len());
    for file in candidates.into_iter().rev() {
        if !kept.iter().any(|other| other.same_identity(&file)) {
            kept.push(file);
        }
    }
    kept.reverse();
    kept
}

/// Reconciles a drop batch against the held set.
///
/// - Candidates sharing an identity within the batch collapse to the last one.
/// - Single-file mode: one accepted candidate replaces the whole set, with no
///   duplicate or capacity check, whatever the host rejected alongside it.
///   More than one candidate overflows a capacity of one.
/// - Held files sharing an identity with a candidate are superseded by it.
/// - Capacity is all-or-nothing: if retained plus candidates exceed
///   `max_files`, every candidate is refused with `too-many-files` and the
///   held set is returned unchanged, even when part of the batch would fit.
pub fn admit(
    held: &HeldFileSet,
    candidates: Vec<DroppedFile>,
    host_rejections: Vec<RawRejection>,
    constraints: &Constraints,
) -> Admission {
    let proposed = candidates.len();
    let candidates = dedupe_batch(candidates);
    if candidates.len() < proposed {
        tracing::debug!(
            collapsed = proposed - candidates.len(),
            "Collapsed repeated files in drop batch"
        );
    }

    if !constraints.multiple && candidates.len() == 1 {
        let additions = without_duplicates(&candidates, held.as_slice());
        tracing::debug!(name = %candidates[0].name, "Single file replaces held set");
        return Admission {
            held: HeldFileSet::from(candidates),
            rejections: host_rejections,
            additions,
            admitted: true,
        };
    }

    let capacity = if constraints.multiple {
        constraints.max_files
    } else {
        Some(1)
    };
    let retained = without_duplicates(held.as_slice(), &candidates);
    let fits = candidates.is_empty()
        || capacity.is_none_or(|max| retained.len() + candidates.len() <= max);

    if fits {
        let additions = without_duplicates(&candidates, held.as_slice());
        tracing::debug!(
            retained = retained.len(),
            superseded = held.len() - retained.len(),
            added = candidates.len(),
            "Admitted drop batch"
        );

        let mut files = retained;
        files.extend(candidates);
        return Admission {
            held: HeldFileSet::from(files),
            rejections: host_rejections,
            additions,
            admitted: true,
        };
    }

    // Previews during drag cannot dedupe, so they may predict this branch for
    // batches that end up admitted above.
    tracing::debug!(
        held = held.len(),
        refused = candidates.len(),
        max_files = ?capacity,
        "Drop batch exceeds capacity"
    );

    let mut rejections = host_rejections;
    rejections.extend(candidates.into_iter().map(RawRejection::too_many_files));
    Admission {
        held: held.clone(),
        rejections,
        additions: Vec::new(),
        admitted: false,
    }
}
