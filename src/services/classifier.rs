use crate::models::{HeldFileSet, RawRejection, RejectionCode, RejectionRecord};

/// Groups raw rejections into at most one record per cause.
///
/// Records come out in the fixed order too-many-files, file-invalid-type,
/// file-too-large. Entries whose file is already held are skipped, and so are
/// entries whose primary cause is not part of the taxonomy. File names keep
/// their first-seen order and appear once per record.
pub fn classify(raw: &[RawRejection], held: &HeldFileSet) -> Vec<RejectionRecord> {
    let mut buckets: [Vec<String>; 3] = Default::default();

    for rejection in raw {
        if held.contains_file(&rejection.file) {
            tracing::debug!(name = %rejection.file.name, "Skipping rejection of a held file");
            continue;
        }

        let Some(code) = rejection.primary_code() else {
            tracing::debug!(
                name = %rejection.file.name,
                code = rejection.errors.first().map(|e| e.code.as_str()).unwrap_or(""),
                "Ignoring unrecognized rejection cause"
            );
            continue;
        };

        let slot = bucket_index(code);
        if !buckets[slot].contains(&rejection.file.name) {
            buckets[slot].push(rejection.file.name.clone());
        }
    }

    RejectionCode::ORDER
        .into_iter()
        .zip(buckets)
        .filter(|(_, files)| !files.is_empty())
        .map(|(code, files)| RejectionRecord { code, files })
        .collect()
}

fn bucket_index(code: RejectionCode) -> usize {
    match code {
        RejectionCode::TooManyFiles => 0,
        RejectionCode::FileInvalidType => 1,
        RejectionCode::FileTooLarge => 2,
    }
}
