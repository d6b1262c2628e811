use crate::upload::{SelectedFile, Slot, SubmitOutcome, SubmitTicket};
use std::path::PathBuf;

/// User-visible notification. Replaces blocking dialogs: the UI just
/// renders whatever the state currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    MissingFiles,
    AlreadySubmitting,
    Saved(PathBuf),
    ProcessingFailed,
    TransportFailed,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::MissingFiles => "Please select both files.".to_string(),
            Notice::AlreadySubmitting => "A join is already in progress.".to_string(),
            Notice::Saved(_) => "✅ File joined and downloaded!".to_string(),
            Notice::ProcessingFailed => {
                "❌ Failed to process files. Please check the input format.".to_string()
            }
            Notice::TransportFailed => "⚠️ Error occurred during file processing.".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved(_))
    }
}

/// Why `begin_submit` refused to start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    MissingFiles,
    InFlight,
}

impl SubmitBlocked {
    pub fn notice(self) -> Notice {
        match self {
            SubmitBlocked::MissingFiles => Notice::MissingFiles,
            SubmitBlocked::InFlight => Notice::AlreadySubmitting,
        }
    }
}

/// The whole form. Transitions take `&self` and hand back a new value, so
/// `loading && success` can be checked after every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub file1: Option<SelectedFile>,
    pub file2: Option<SelectedFile>,
    pub loading: bool,
    pub success: bool,
    pub generation: u64,
    pub notice: Option<Notice>,
    pub last_output: Option<PathBuf>,
}

impl FormState {
    pub fn file(&self, slot: Slot) -> Option<&SelectedFile> {
        match slot {
            Slot::First => self.file1.as_ref(),
            Slot::Second => self.file2.as_ref(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.file1.is_some() && self.file2.is_some()
    }

    /// Replaces one slot. A request still in flight is superseded: its
    /// generation is retired so its late result gets dropped.
    pub fn select_file(&self, slot: Slot, file: SelectedFile) -> FormState {
        let mut next = self.clone();
        match slot {
            Slot::First => next.file1 = Some(file),
            Slot::Second => next.file2 = Some(file),
        }
        next.success = false;
        next.notice = None;

        if self.loading {
            next.loading = false;
            next.generation += 1;
        }
        next
    }

    pub fn begin_submit(&self) -> Result<(FormState, SubmitTicket), SubmitBlocked> {
        let (file1, file2) = match (&self.file1, &self.file2) {
            (Some(file1), Some(file2)) => (file1.clone(), file2.clone()),
            _ => return Err(SubmitBlocked::MissingFiles),
        };
        if self.loading {
            return Err(SubmitBlocked::InFlight);
        }

        let mut next = self.clone();
        next.generation += 1;
        next.loading = true;
        next.success = false;
        next.notice = None;

        let ticket = SubmitTicket {
            generation: next.generation,
            file1,
            file2,
        };
        Ok((next, ticket))
    }

    /// Records a refused submit without touching `loading`.
    pub fn blocked(&self, reason: SubmitBlocked) -> FormState {
        FormState {
            notice: Some(reason.notice()),
            ..self.clone()
        }
    }

    /// Applies a finished attempt. Results from any generation other than
    /// the current one are ignored.
    pub fn complete(&self, generation: u64, outcome: &SubmitOutcome) -> FormState {
        if generation != self.generation || !self.loading {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping result of superseded submission"
            );
            return self.clone();
        }

        let mut next = self.clone();
        next.loading = false;
        match outcome {
            SubmitOutcome::Downloaded { path, .. } => {
                next.success = true;
                next.last_output = Some(path.clone());
                next.notice = Some(Notice::Saved(path.clone()));
            }
            SubmitOutcome::Rejected { .. } => {
                next.notice = Some(Notice::ProcessingFailed);
            }
            SubmitOutcome::Failed { .. } => {
                next.notice = Some(Notice::TransportFailed);
            }
            SubmitOutcome::Cancelled => {}
        }
        next
    }
}
