//! One-shot joins from the command line, driven through the same form
//! transitions the window uses.

use crate::app::FormState;
use crate::error::JoinError;
use crate::upload::{
    run_submission, DownloadSink, JoinService, SelectedFile, Slot, SubmitOutcome,
};
use anyhow::{anyhow, bail};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

pub async fn join_once(
    service: &dyn JoinService,
    sink: &dyn DownloadSink,
    file1: Option<PathBuf>,
    file2: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let mut state = FormState::default();
    for (slot, path) in [(Slot::First, file1), (Slot::Second, file2)] {
        if let Some(path) = path {
            state = state.select_file(slot, SelectedFile::new(path));
        }
    }

    let (running, ticket) = match state.begin_submit() {
        Ok(started) => started,
        Err(reason) => bail!(reason.notice().message()),
    };

    let outcome = run_submission(service, sink, &ticket, &CancellationToken::new()).await;
    let done = running.complete(ticket.generation, &outcome);
    let message = done
        .notice
        .as_ref()
        .map(|n| n.message())
        .unwrap_or_default();

    match outcome {
        SubmitOutcome::Downloaded { path, .. } => {
            println!("{message}");
            println!("{}", path.display());
            Ok(path)
        }
        SubmitOutcome::Rejected { status, detail } => {
            Err(anyhow!(JoinError::Rejected { status, detail }).context(message))
        }
        SubmitOutcome::Failed { reason } => Err(anyhow!(reason).context(message)),
        SubmitOutcome::Cancelled => bail!("join was cancelled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::mock::{MockJoinService, MockReply, RecordingSink};
    use crate::upload::OUTPUT_FILE_NAME;
    use std::fs;

    #[tokio::test]
    async fn single_file_is_refused_before_any_request() {
        let service = MockJoinService::ok(&[1]);
        let sink = RecordingSink::default();

        let err = join_once(&service, &sink, Some(PathBuf::from("a.xlsx")), None)
            .await
            .expect_err("should refuse");

        assert_eq!(err.to_string(), "Please select both files.");
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn joins_two_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.xlsx");
        let b = dir.path().join("b.xlsx");
        fs::write(&a, b"A").expect("write");
        fs::write(&b, b"B").expect("write");
        let service = MockJoinService::ok(&[1, 2, 3]);
        let sink = RecordingSink::default();

        let path = join_once(&service, &sink, Some(a), Some(b))
            .await
            .expect("join");

        assert!(path.ends_with(OUTPUT_FILE_NAME));
        assert_eq!(sink.saved()[0].1, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn rejection_keeps_backend_detail_in_the_error_chain() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.xlsx");
        let b = dir.path().join("b.xlsx");
        fs::write(&a, b"A").expect("write");
        fs::write(&b, b"B").expect("write");
        let service = MockJoinService::new(MockReply::Status(422, b"sheet empty".to_vec()));
        let sink = RecordingSink::default();

        let err = join_once(&service, &sink, Some(a), Some(b))
            .await
            .expect_err("should fail");

        assert_eq!(
            err.to_string(),
            "❌ Failed to process files. Please check the input format."
        );
        assert!(format!("{err:#}").contains("sheet empty"));
        assert!(sink.saved().is_empty());
    }
}
