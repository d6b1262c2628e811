mod state;
mod ui;

use crate::config::Settings;
use crate::error::JoinError;
use crate::upload::{
    run_submission, DirectorySink, DownloadSink, HttpJoinService, JoinService, SelectedFile, Slot,
    SubmitEvent, SubmitOutcome, SubmitTicket,
};
use eframe::{egui, App};
pub use state::{FormState, Notice};
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct ExcelJoiner {
    state: FormState,
    service: Arc<dyn JoinService>,
    sink: Arc<dyn DownloadSink>,
    output_dir: PathBuf,
    event_sender: std_mpsc::Sender<SubmitEvent>,
    event_receiver: std_mpsc::Receiver<SubmitEvent>,
    in_flight: Option<CancellationToken>,
    repaint: Option<egui::Context>,
}

impl ExcelJoiner {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        service: HttpJoinService,
        settings: Settings,
    ) -> Self {
        tracing::info!(endpoint = service.endpoint(), "Initializing Excel Joiner");
        let sink = DirectorySink::new(settings.output_dir.clone());

        let mut app = Self::with_backend(Arc::new(service), Arc::new(sink), settings.output_dir);
        app.repaint = Some(cc.egui_ctx.clone());
        app
    }

    pub fn with_backend(
        service: Arc<dyn JoinService>,
        sink: Arc<dyn DownloadSink>,
        output_dir: PathBuf,
    ) -> Self {
        let (event_sender, event_receiver) = std_mpsc::channel();
        Self {
            state: FormState::default(),
            service,
            sink,
            output_dir,
            event_sender,
            event_receiver,
            in_flight: None,
            repaint: None,
        }
    }

    pub fn select_file(&mut self, slot: Slot, path: PathBuf) {
        let file = SelectedFile::new(path);
        tracing::info!(slot = %slot, "Selected {}", file.name);

        let was_loading = self.state.loading;
        self.state = self.state.select_file(slot, file);

        if was_loading {
            if let Some(token) = self.in_flight.take() {
                tracing::info!("Selection changed mid-request; cancelling in-flight join");
                token.cancel();
            }
        }
    }

    pub fn submit(&mut self) {
        match self.state.begin_submit() {
            Ok((next, ticket)) => {
                self.state = next;
                self.start_submission(ticket);
            }
            Err(reason) => {
                tracing::warn!(?reason, "Submit refused");
                self.state = self.state.blocked(reason);
            }
        }
    }

    fn start_submission(&mut self, ticket: SubmitTicket) {
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        let service = Arc::clone(&self.service);
        let sink = Arc::clone(&self.sink);
        let sender = self.event_sender.clone();
        let repaint = self.repaint.clone();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(run_submission(
                    service.as_ref(),
                    sink.as_ref(),
                    &ticket,
                    &cancel,
                )),
                Err(e) => {
                    let e = JoinError::Io(e);
                    tracing::error!("Error during file upload: {}", e);
                    SubmitOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            let _ = sender.send(SubmitEvent {
                generation: ticket.generation,
                outcome,
            });
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Applies every finished submission reported by worker threads.
    pub fn update_state(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            let next = self.state.complete(event.generation, &event.outcome);
            if next.loading != self.state.loading {
                self.in_flight = None;
            }
            self.state = next;
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

impl Drop for ExcelJoiner {
    fn drop(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

impl App for ExcelJoiner {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.repaint.is_none() {
            self.repaint = Some(ctx.clone());
        }
        self.update_state();
        self.render(ctx);
    }
}
