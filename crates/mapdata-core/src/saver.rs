//! Pattern persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Error, Result};
use crate::pattern::OutputPattern;
use crate::status::OsuStatus;

/// Destination for rendered pattern text.
pub trait Saver {
    fn save(&self, destination: &str, text: &str) -> Result<()>;
}

/// Plain-text destination for a pattern.
pub fn destination_name(pattern_name: &str) -> String {
    format!("{}.txt", pattern_name)
}

/// Persist every non-memory pattern.
///
/// Patterns whose save event includes `status` get their rendered text;
/// the rest get an empty string so stale output from a previous status
/// is cleared.
pub fn save_map_strings(
    saver: &dyn Saver,
    patterns: &[OutputPattern],
    status: OsuStatus,
) -> Result<()> {
    for pattern in patterns.iter().filter(|p| !p.is_memory_format) {
        let destination = destination_name(&pattern.name);
        if pattern.save_event.contains(status) {
            saver.save(&destination, &pattern.formatted())?;
        } else {
            saver.save(&destination, "")?;
        }
    }
    Ok(())
}

/// Writes each destination as a file under a base directory.
pub struct FileSaver {
    base_dir: PathBuf,
}

impl FileSaver {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn write_file(&self, filename: &str, content: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        fs::write(self.base_dir.join(filename), content)
    }
}

impl Saver for FileSaver {
    fn save(&self, destination: &str, text: &str) -> Result<()> {
        trace!("Writing {} ({} bytes)", destination, text.len());
        self.write_file(destination, text)
            .map_err(|source| Error::SaveFailed {
                destination: destination.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingSaver, pattern};
    use crate::status::StatusMask;
    use tempfile::TempDir;

    #[test]
    fn test_destination_name() {
        assert_eq!(destination_name("np_playing"), "np_playing.txt");
    }

    #[test]
    fn test_matching_status_writes_text() {
        let saver = RecordingSaver::new();
        let patterns = vec![pattern("np", "hello", OsuStatus::Playing.into(), false)];

        save_map_strings(&saver, &patterns, OsuStatus::Playing).unwrap();
        assert_eq!(saver.saved(), vec![("np.txt".to_string(), "hello".to_string())]);
    }

    #[test]
    fn test_other_status_clears_destination() {
        let saver = RecordingSaver::new();
        let patterns = vec![pattern("np", "hello", OsuStatus::Playing.into(), false)];

        save_map_strings(&saver, &patterns, OsuStatus::Listening).unwrap();
        assert_eq!(saver.saved(), vec![("np.txt".to_string(), String::new())]);
    }

    #[test]
    fn test_memory_patterns_are_skipped() {
        let saver = RecordingSaver::new();
        let patterns = vec![
            pattern("mem", "x", StatusMask::ALL, true),
            pattern("disk", "y", StatusMask::ALL, false),
        ];

        for status in [OsuStatus::Playing, OsuStatus::Null] {
            save_map_strings(&saver, &patterns, status).unwrap();
        }
        let saved = saver.saved();
        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|(dest, _)| dest == "disk.txt"));
    }

    #[test]
    fn test_file_saver_writes_files() {
        let temp = TempDir::new().unwrap();
        let saver = FileSaver::new(temp.path().join("out"));

        saver.save("np.txt", "content").unwrap();
        let written = fs::read_to_string(temp.path().join("out").join("np.txt")).unwrap();
        assert_eq!(written, "content");

        saver.save("np.txt", "").unwrap();
        let written = fs::read_to_string(temp.path().join("out").join("np.txt")).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_file_saver_reports_destination_on_failure() {
        let temp = TempDir::new().unwrap();
        // base_dir is a file, so creating the directory fails
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let saver = FileSaver::new(&blocker);

        let err = saver.save("np.txt", "x").unwrap_err();
        assert!(matches!(err, Error::SaveFailed { ref destination, .. } if destination == "np.txt"));
    }
}
