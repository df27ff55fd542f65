/// Default number of characters kept from a file stem in error listings.
pub const TRUNCATION_LENGTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitName {
    pub file_name: String,
    pub file_extension: String,
}

/// Splits a file name at its last dot, truncating the stem to `truncation`
/// characters followed by `...` when it is longer.
pub fn split_file_extension(name: &str, truncation: Option<usize>) -> SplitName {
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (name, ""),
    };

    let file_name = match truncation {
        Some(limit) if stem.chars().count() > limit => {
            let kept: String = stem.chars().take(limit).collect();
            format!("{}...", kept)
        }
        _ => stem.to_string(),
    };

    SplitName {
        file_name,
        file_extension: extension.to_string(),
    }
}

/// `"report (pdf)"` style label used when listing rejected files.
pub fn format_file_text(name: &str, truncation: Option<usize>) -> String {
    let split = split_file_extension(name, truncation);
    if split.file_extension.is_empty() {
        split.file_name
    } else {
        format!("{} ({})", split.file_name, split.file_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_extension() {
        let split = split_file_extension("report.pdf", None);
        assert_eq!(split.file_name, "report");
        assert_eq!(split.file_extension, "pdf");

        let split = split_file_extension("archive.tar.gz", None);
        assert_eq!(split.file_name, "archive.tar");
        assert_eq!(split.file_extension, "gz");

        let split = split_file_extension("Makefile", None);
        assert_eq!(split.file_name, "Makefile");
        assert_eq!(split.file_extension, "");

        let split = split_file_extension(".env", None);
        assert_eq!(split.file_name, ".env");
        assert_eq!(split.file_extension, "");
    }

    #[test]
    fn test_truncation() {
        let split = split_file_extension("a_really_long_file_name.txt", Some(TRUNCATION_LENGTH));
        assert_eq!(split.file_name, "a_really_long_f...");
        assert_eq!(split.file_extension, "txt");

        // exactly at the limit is kept whole
        let split = split_file_extension("fifteen_chars__.txt", Some(15));
        assert_eq!(split.file_name, "fifteen_chars__");

        // counts characters, not bytes
        let split = split_file_extension("日本語のファイル.mp4", Some(3));
        assert_eq!(split.file_name, "日本語...");
    }

    #[test]
    fn test_format_file_text() {
        assert_eq!(format_file_text("photo.jpg", Some(15)), "photo (jpg)");
        assert_eq!(format_file_text("README", None), "README");
    }
}
