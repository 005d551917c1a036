use crate::error::ConsoleError;
use derivative::Derivative;
use std::fs;
use std::path::Path;

/// Which format endpoint an item is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Check,
    Commit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Queued,
    InFlight,
    Succeeded,
    Failed,
}

impl ItemStatus {
    /// A resolved item may be replaced by a new selection.
    pub fn is_resolved(self) -> bool {
        matches!(self, ItemStatus::Succeeded | ItemStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Checking,
    AwaitingConfirmation,
    Committing,
    Deleting,
    Done,
    Rejected,
}

/// The referential file held in the upload slot.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct UploadItem {
    pub file_name: String,
    #[derivative(Debug = "ignore")]
    pub content: Vec<u8>,
    pub target: UploadTarget,
    pub status: ItemStatus,
}

impl UploadItem {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
            target: UploadTarget::Check,
            status: ItemStatus::Queued,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConsoleError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConsoleError::Io("invalid file name".to_string()))?
            .to_string();
        let content = fs::read(path)?;
        Ok(Self::new(file_name, content))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Human-readable byte count for the selected file.
pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn debug_output_hides_file_bytes() {
        let item = UploadItem::new("DROID_SignatureFile.xml", b"<FFSignatureFile/>".to_vec());
        let rendered = format!("{:?}", item);
        assert!(rendered.contains("DROID_SignatureFile.xml"));
        assert!(!rendered.contains("content"));
    }

    #[test]
    fn from_path_reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formats.xml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"<FFSignatureFile/>").unwrap();

        let item = UploadItem::from_path(&path).unwrap();
        assert_eq!(item.file_name, "formats.xml");
        assert_eq!(item.size(), 18);
        assert_eq!(item.target, UploadTarget::Check);
        assert_eq!(item.status, ItemStatus::Queued);
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = UploadItem::from_path(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, ConsoleError::Io(_)));
    }

    #[test]
    fn format_size_uses_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
