//! High-score persistence.
//!
//! The file holds the bare decimal value. A missing file and malformed
//! contents both read as 0.

use std::{fs, io, path::Path};

use anyhow::Context as _;
use blockfall_engine::parse_high_score;

/// Reads the high score from `path`.
///
/// Returns `Ok(0)` if the file does not exist or does not hold a number. Other
/// I/O failures are reported as errors.
pub(crate) fn load(path: &Path) -> anyhow::Result<usize> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    Ok(parse_high_score(&String::from_utf8_lossy(&bytes)))
}

pub(crate) fn save(path: &Path, high_score: usize) -> anyhow::Result<()> {
    fs::write(path, high_score.to_string())
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("blockfall_test_{name}_{nanos}.txt"))
    }

    #[test]
    fn test_missing_file_is_zero() {
        let path = temp_path("missing");
        assert_eq!(load(&path).unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        save(&path, 1234).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1234");
        assert_eq!(load(&path).unwrap(), 1234);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_file_is_zero() {
        for (i, contents) in [&b"abc"[..], b"-1", b"", b"\xff\xfe", b"12 34"]
            .into_iter()
            .enumerate()
        {
            let path = temp_path(&format!("malformed{i}"));
            fs::write(&path, contents).unwrap();
            assert_eq!(load(&path).unwrap(), 0, "{contents:?}");
            fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let path = temp_path("whitespace");
        fs::write(&path, "  42\n").unwrap();
        assert_eq!(load(&path).unwrap(), 42);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_error_is_reported() {
        // A directory cannot be read as a file.
        let path = temp_path("dir");
        fs::create_dir(&path).unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
        fs::remove_dir(&path).unwrap();
    }
}
