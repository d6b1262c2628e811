mod download;
mod join_client;
#[cfg(test)]
pub mod mock;
mod submission;
mod types;

pub use download::{DirectorySink, DownloadSink};
pub use join_client::{HttpJoinService, JoinService};
pub use submission::run_submission;
pub use types::{SelectedFile, Slot, SubmitEvent, SubmitOutcome, SubmitTicket};

#[cfg(test)]
pub use types::OUTPUT_FILE_NAME;
