use crate::error::JoinError;
use crate::upload::download::DownloadSink;
use crate::upload::join_client::{JoinService, UploadPart};
use crate::upload::types::{
    JoinResponse, SelectedFile, Slot, SubmitOutcome, SubmitTicket, OUTPUT_FILE_NAME,
};
use tokio_util::sync::CancellationToken;

async fn read_part(slot: Slot, file: &SelectedFile) -> Result<UploadPart, JoinError> {
    let contents = tokio::fs::read(file.path())
        .await
        .map_err(|source| JoinError::ReadInput {
            path: file.path.clone(),
            source,
        })?;

    Ok(UploadPart {
        slot,
        file_name: file.name.clone(),
        contents,
    })
}

async fn fetch(service: &dyn JoinService, ticket: &SubmitTicket) -> Result<JoinResponse, JoinError> {
    let file1 = read_part(Slot::First, &ticket.file1).await?;
    let file2 = read_part(Slot::Second, &ticket.file2).await?;

    service.join(&file1, &file2).await
}

/// Turns a backend answer into an outcome, saving the body on 2xx.
pub fn settle(response: JoinResponse, sink: &dyn DownloadSink) -> SubmitOutcome {
    if !response.is_success() {
        let detail = String::from_utf8_lossy(&response.body).into_owned();
        tracing::error!(status = response.status, "Join failed: {}", detail);
        return SubmitOutcome::Rejected {
            status: response.status,
            detail,
        };
    }

    if response.body.is_empty() {
        tracing::warn!(status = response.status, "join succeeded with an empty body");
    }

    match sink.save(OUTPUT_FILE_NAME, &response.body) {
        Ok(path) => SubmitOutcome::Downloaded {
            path,
            bytes: response.body.len(),
        },
        Err(e) => {
            tracing::error!("Error while saving joined output: {}", e);
            SubmitOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Runs one submit attempt to completion. Never saves anything once
/// `cancel` has fired.
pub async fn run_submission(
    service: &dyn JoinService,
    sink: &dyn DownloadSink,
    ticket: &SubmitTicket,
    cancel: &CancellationToken,
) -> SubmitOutcome {
    tracing::info!(
        generation = ticket.generation,
        "Submitting files: {} {}",
        ticket.file1.name,
        ticket.file2.name
    );

    let response = tokio::select! {
        _ = cancel.cancelled() => None,
        response = fetch(service, ticket) => Some(response),
    };

    match response {
        None => {
            tracing::debug!(generation = ticket.generation, "submission cancelled in flight");
            SubmitOutcome::Cancelled
        }
        Some(_) if cancel.is_cancelled() => SubmitOutcome::Cancelled,
        Some(Ok(response)) => settle(response, sink),
        Some(Err(e)) => {
            tracing::error!("Error during file upload: {}", e);
            SubmitOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
