use derivative::Derivative;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name the joined workbook is always saved under.
pub const OUTPUT_FILE_NAME: &str = "joined_output.xlsx";

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];

    /// Multipart field name the backend expects for this slot.
    pub fn field_name(self) -> &'static str {
        match self {
            Slot::First => "file1",
            Slot::Second => "file2",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Slot::First => "Upload File 1",
            Slot::Second => "Upload File 2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A file picked for one slot. Contents are read only when a request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: Option<u64>,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path).ok().map(|m| m.len());

        Self { path, name, size }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Everything a worker needs to run one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub file1: SelectedFile,
    pub file2: SelectedFile,
}

/// Raw answer from the join backend.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct JoinResponse {
    pub status: u16,
    #[derivative(Debug = "ignore")]
    pub body: Vec<u8>,
}

impl JoinResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Downloaded { path: PathBuf, bytes: usize },
    Rejected { status: u16, detail: String },
    Failed { reason: String },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    pub generation: u64,
    pub outcome: SubmitOutcome,
}
