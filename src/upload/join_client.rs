use crate::error::JoinError;
use crate::upload::types::{JoinResponse, Slot, XLSX_MIME};
use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// One spreadsheet as it goes over the wire.
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub slot: Slot,
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// The remote join operation. Implementations only move bytes; deciding
/// what a status means is up to the caller.
pub trait JoinService: Send + Sync {
    fn join<'a>(
        &'a self,
        file1: &'a UploadPart,
        file2: &'a UploadPart,
    ) -> Pin<Box<dyn Future<Output = Result<JoinResponse, JoinError>> + Send + 'a>>;
}

#[derive(Clone)]
pub struct HttpJoinService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpJoinService {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, JoinError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn part(upload: &UploadPart) -> Result<Part, JoinError> {
        Ok(Part::bytes(upload.contents.clone())
            .file_name(upload.file_name.clone())
            .mime_str(XLSX_MIME)?)
    }

    async fn post(&self, file1: &UploadPart, file2: &UploadPart) -> Result<JoinResponse, JoinError> {
        let form = Form::new()
            .part(file1.slot.field_name(), Self::part(file1)?)
            .part(file2.slot.field_name(), Self::part(file2)?);

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, bytes = body.len(), "join endpoint responded");
        Ok(JoinResponse { status, body })
    }
}

impl JoinService for HttpJoinService {
    fn join<'a>(
        &'a self,
        file1: &'a UploadPart,
        file2: &'a UploadPart,
    ) -> Pin<Box<dyn Future<Output = Result<JoinResponse, JoinError>> + Send + 'a>> {
        Box::pin(self.post(file1, file2))
    }
}
