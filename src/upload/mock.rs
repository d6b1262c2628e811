//! Hand-rolled test doubles for the join backend and the download sink.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::download::DownloadSink;
use super::join_client::{JoinService, UploadPart};
use super::types::JoinResponse;
use crate::error::JoinError;

#[derive(Clone, Debug)]
pub enum MockReply {
    Status(u16, Vec<u8>),
    /// Simulate a request that never completes at the transport level.
    Unreachable,
}

pub struct MockJoinService {
    reply: MockReply,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    seen: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl MockJoinService {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            delay: None,
            call_count: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(body: &[u8]) -> Self {
        Self::new(MockReply::Status(200, body.to_vec()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// `(field name, file name, contents)` for every part received so far.
    pub fn seen(&self) -> Vec<(String, String, Vec<u8>)> {
        self.seen.lock().unwrap().clone()
    }
}

impl JoinService for MockJoinService {
    fn join<'a>(
        &'a self,
        file1: &'a UploadPart,
        file2: &'a UploadPart,
    ) -> Pin<Box<dyn Future<Output = Result<JoinResponse, JoinError>> + Send + 'a>> {
        Box::pin(async move {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            {
                let mut seen = self.seen.lock().unwrap();
                for part in [file1, file2] {
                    seen.push((
                        part.slot.field_name().to_string(),
                        part.file_name.clone(),
                        part.contents.clone(),
                    ));
                }
            }

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            match &self.reply {
                MockReply::Status(status, body) => Ok(JoinResponse {
                    status: *status,
                    body: body.clone(),
                }),
                MockReply::Unreachable => Err(JoinError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl DownloadSink for RecordingSink {
    fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, JoinError> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.to_vec()));
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}
