use super::{DroppedFile, FileIdentity};
use serde::{Deserialize, Serialize};

/// Files currently accepted by a dropzone, in insertion order.
///
/// Values are replaced wholesale: every operation returns a new set and the
/// owner decides whether to keep it.
///
/// `From<Vec<_>>` and deserialization take the files as given. Sets built
/// that way may repeat an identity; admission never produces one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeldFileSet {
    files: Vec<DroppedFile>,
}

impl HeldFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DroppedFile> {
        self.files.iter()
    }

    pub fn as_slice(&self) -> &[DroppedFile] {
        &self.files
    }

    pub fn into_vec(self) -> Vec<DroppedFile> {
        self.files
    }

    pub fn contains(&self, identity: &FileIdentity) -> bool {
        self.files.iter().any(|f| f.has_identity(identity))
    }

    pub fn contains_file(&self, file: &DroppedFile) -> bool {
        self.files.iter().any(|f| f.same_identity(file))
    }

    /// True when no two entries share a name and size.
    pub fn has_unique_identities(&self) -> bool {
        self.files
            .iter()
            .enumerate()
            .all(|(i, file)| !self.files[i + 1..].iter().any(|other| other.same_identity(file)))
    }

    /// Drops every entry matching `target`.
    pub fn remove(&self, target: &FileIdentity) -> HeldFileSet {
        let files: Vec<DroppedFile> = self
            .files
            .iter()
            .filter(|f| !f.has_identity(target))
            .cloned()
            .collect();

        tracing::debug!(
            name = %target.name,
            size = target.size,
            removed = self.files.len() - files.len(),
            "Removed held file"
        );

        HeldFileSet { files }
    }

    pub fn clear(&self) -> HeldFileSet {
        HeldFileSet::new()
    }
}

impl From<Vec<DroppedFile>> for HeldFileSet {
    fn from(files: Vec<DroppedFile>) -> Self {
        Self { files }
    }
}

impl<'a> IntoIterator for &'a HeldFileSet {
    type Item = &'a DroppedFile;
    type IntoIter = std::slice::Iter<'a, DroppedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
