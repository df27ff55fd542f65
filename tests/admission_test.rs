use file_dropzone::{
    ByteUnit, Constraints, DroppedFile, FileError, FileIdentity, HeldFileSet, RawRejection,
    RejectionCode, admit, classify, format_bytes, get_bytes,
};
use std::collections::HashSet;

fn kb(name: &str, kilobytes: u64) -> DroppedFile {
    DroppedFile::new(name, kilobytes * 1024, "application/octet-stream")
}

fn names(set: &HeldFileSet) -> Vec<String> {
    set.iter().map(|f| f.name.clone()).collect()
}

fn capped(max_files: usize) -> Constraints {
    Constraints {
        max_files: Some(max_files),
        multiple: true,
        ..Default::default()
    }
}

/// Scenario: empty dropzone, two files dropped under a limit of four.
#[test]
fn test_drop_into_empty_dropzone() {
    let outcome = admit(
        &HeldFileSet::new(),
        vec![kb("a", 1), kb("b", 2)],
        vec![],
        &capped(4),
    );
    assert_eq!(names(&outcome.held), vec!["a", "b"]);
    assert!(outcome.rejections.is_empty());
}

/// Scenario: a full dropzone refuses the next file.
#[test]
fn test_full_dropzone_refuses_new_file() {
    let held = HeldFileSet::from(vec![kb("a", 1), kb("b", 2), kb("c", 3), kb("d", 4)]);
    let outcome = admit(&held, vec![kb("e", 5)], vec![], &capped(4));

    assert_eq!(names(&outcome.held), vec!["a", "b", "c", "d"]);

    let records = classify(&outcome.rejections, &outcome.held);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code, RejectionCode::TooManyFiles);
    assert_eq!(records[0].files, vec!["e"]);
}

/// Scenario: a file with the same name and size supersedes the held one.
#[test]
fn test_same_identity_supersedes() {
    let a = DroppedFile::new("a", 1024, "text/plain");
    let a_prime = DroppedFile::new("a", 1024, "text/csv");
    let held = HeldFileSet::from(vec![a]);

    let outcome = admit(&held, vec![a_prime.clone()], vec![], &Constraints::default());
    assert_eq!(outcome.held.len(), 1);
    assert_eq!(outcome.held.as_slice()[0], a_prime);
}

#[test]
fn test_unbounded_admission_length_and_uniqueness() {
    let held = HeldFileSet::from(vec![kb("a", 1), kb("b", 2), kb("c", 3)]);
    let candidates = vec![kb("b", 2), kb("c", 30), kb("d", 4)];

    let duplicates = held
        .iter()
        .filter(|h| candidates.iter().any(|c| c.same_identity(h)))
        .count();
    let outcome = admit(&held, candidates.clone(), vec![], &Constraints::default());

    assert_eq!(outcome.held.len(), held.len() - duplicates + candidates.len());
    let identities: HashSet<FileIdentity> = outcome.held.iter().map(|f| f.identity()).collect();
    assert_eq!(identities.len(), outcome.held.len());
}

#[test]
fn test_repeated_identities_within_one_drop_are_held_once() {
    // two equal-sized report.pdf files from different folders
    let held = HeldFileSet::from(vec![kb("a", 1)]);
    let candidates = vec![kb("report.pdf", 5), kb("b", 2), kb("report.pdf", 5)];

    let outcome = admit(&held, candidates, vec![], &Constraints::default());
    assert_eq!(names(&outcome.held), vec!["a", "b", "report.pdf"]);
    let identities: HashSet<FileIdentity> = outcome.held.iter().map(|f| f.identity()).collect();
    assert_eq!(identities.len(), outcome.held.len());

    // the collapsed batch counts once against the limit
    let outcome = admit(
        &held,
        vec![kb("report.pdf", 5), kb("report.pdf", 5)],
        vec![],
        &capped(2),
    );
    assert!(outcome.admitted);
    assert_eq!(names(&outcome.held), vec!["a", "report.pdf"]);
}

#[test]
fn test_remove_after_admit_restores_previous_set() {
    let held = HeldFileSet::from(vec![kb("a", 1), kb("b", 2)]);
    let f = kb("z", 9);

    let outcome = admit(&held, vec![f.clone()], vec![], &Constraints::default());
    assert_eq!(outcome.held.remove(&f.identity()), held);

    // a colliding file leaves the prior set minus the collision
    let collide = kb("a", 1);
    let outcome = admit(&held, vec![collide.clone()], vec![], &Constraints::default());
    assert_eq!(
        outcome.held.remove(&collide.identity()),
        held.remove(&collide.identity())
    );
}

#[test]
fn test_overflow_is_all_or_nothing() {
    let held = HeldFileSet::from(vec![kb("a", 1), kb("b", 2)]);
    let batch = vec![kb("c", 3), kb("d", 4), kb("e", 5)];

    let outcome = admit(&held, batch.clone(), vec![], &capped(4));
    assert_eq!(outcome.held, held);
    assert!(!outcome.admitted);
    for candidate in &batch {
        let rejection = outcome
            .rejections
            .iter()
            .find(|r| r.file == *candidate)
            .expect("every candidate is rejected");
        assert_eq!(rejection.primary_code(), Some(RejectionCode::TooManyFiles));
    }
}

#[test]
fn test_single_file_mode_always_replaces() {
    let held = HeldFileSet::from(vec![kb("a", 1), kb("b", 2)]);
    let constraints = Constraints {
        max_files: Some(1),
        multiple: false,
        ..Default::default()
    };

    let outcome = admit(&held, vec![kb("a", 1)], vec![], &constraints);
    assert_eq!(names(&outcome.held), vec!["a"]);

    let outcome = admit(&held, vec![kb("new", 7)], vec![], &constraints);
    assert_eq!(names(&outcome.held), vec!["new"]);
}

#[test]
fn test_classifier_grouping_example() {
    let reject = |name: &str, error: FileError| RawRejection::new(kb(name, 1), vec![error]);
    let raw = vec![
        reject("first.exe", FileError::invalid_type("image/*")),
        reject("extra.png", FileError::too_many_files()),
        reject("huge.png", FileError::too_large(10)),
        reject("second.bat", FileError::invalid_type("image/*")),
    ];

    let records = classify(&raw, &HeldFileSet::new());
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].code, RejectionCode::TooManyFiles);
    assert_eq!(records[1].code, RejectionCode::FileInvalidType);
    assert_eq!(records[1].files, vec!["first.exe", "second.bat"]);
    assert_eq!(records[2].code, RejectionCode::FileTooLarge);
}

#[test]
fn test_byte_conversion() {
    assert_eq!(get_bytes(1, ByteUnit::Mb), 1_048_576);
    assert_eq!(get_bytes(10, ByteUnit::Kb), 10_240);
    assert_eq!(format_bytes(1_048_576u64), "1 MB");
}
