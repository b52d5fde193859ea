//! Single-task owner of a drawing session.
//!
//! Handles talk to the session over a bounded command channel. Timers,
//! recognizer calls and model preparation run as detached tasks and report
//! back over a second, internal channel, so every mutation happens on this
//! one task in arrival order.

use crate::config::{SessionConfig, COMMAND_BUFFER};
use crate::debouncer::RecognitionDebouncer;
use crate::error::{Result, SessionError};
use crate::snapshot::SessionSnapshot;
use crate::state::{DrawingSession, PointerTransition, TypedTransition};
use finder_catalog::{AppCatalog, AppLauncherRef};
use finder_events::{
    emit_event, event_names, now_ms, AppLaunchRequestedEvent, ClearReason, EventBusRef,
    ModelReadyEvent, RecognitionAppliedEvent, RecognitionDiscardedEvent, RecognitionFailedEvent,
    RecognitionRequestedEvent, SessionClearedEvent, StrokeCommittedEvent,
};
use finder_ink::PointerEvent;
use finder_recognition::{Recognition, RecognitionClientRef, RecognitionError};
use tokio::sync::{mpsc, oneshot, watch};
use uuid::Uuid;

enum Command {
    Pointer(PointerEvent),
    SetTypedText(String),
    Clear,
    Launch(String),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}

enum Internal {
    DebounceElapsed {
        generation: u64,
    },
    RecognitionFinished {
        generation: u64,
        outcome: std::result::Result<Recognition, RecognitionError>,
    },
    ModelPrepared(std::result::Result<(), RecognitionError>),
}

/// Cloneable handle to a running session.
///
/// The session stops when every handle is dropped or after
/// [`shutdown`](SessionHandle::shutdown).
#[derive(Clone)]
pub struct SessionHandle {
    session_id: Uuid,
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Start a session task on the current tokio runtime.
    ///
    /// The recognizer's `prepare` runs in the background right away; until it
    /// resolves, snapshots report `model_loading`.
    pub fn spawn(
        catalog: AppCatalog,
        recognizer: RecognitionClientRef,
        launcher: AppLauncherRef,
        bus: EventBusRef,
        config: SessionConfig,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();

        let session = DrawingSession::new();
        let initial = SessionSnapshot::capture(session_id, &session, &catalog, true, false);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let actor = SessionActor {
            session_id,
            session,
            catalog,
            recognizer,
            launcher,
            bus,
            debouncer: RecognitionDebouncer::new(config.debounce),
            config,
            in_flight: None,
            model_loading: true,
            commands: commands_rx,
            internal_tx,
            internal_rx,
            snapshots: snapshot_tx,
        };

        tokio::spawn(actor.run());

        Self {
            session_id,
            commands: commands_tx,
            snapshots: snapshot_rx,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn pointer(&self, event: PointerEvent) -> Result<()> {
        self.send(Command::Pointer(event)).await
    }

    pub async fn set_typed_text(&self, text: impl Into<String>) -> Result<()> {
        self.send(Command::SetTypedText(text.into())).await
    }

    /// "Clear All": reset strokes, recognized and typed text, and cancel any
    /// pending recognition.
    pub async fn clear(&self) -> Result<()> {
        self.send(Command::Clear).await
    }

    /// Launch an application from the current results. Identifiers that are
    /// not in the results are ignored.
    pub async fn launch(&self, identifier: impl Into<String>) -> Result<()> {
        self.send(Command::Launch(identifier.into())).await
    }

    /// Snapshot taken after every previously sent command was applied.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Receiver that is notified whenever the published snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("session_id", &self.session_id)
            .field("closed", &self.commands.is_closed())
            .finish()
    }
}

struct SessionActor {
    session_id: Uuid,
    session: DrawingSession,
    catalog: AppCatalog,
    recognizer: RecognitionClientRef,
    launcher: AppLauncherRef,
    bus: EventBusRef,
    config: SessionConfig,
    debouncer: RecognitionDebouncer,
    /// Generation of the recognizer call whose result is still awaited.
    in_flight: Option<u64>,
    model_loading: bool,
    commands: mpsc::Receiver<Command>,
    internal_tx: mpsc::UnboundedSender<Internal>,
    internal_rx: mpsc::UnboundedReceiver<Internal>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionActor {
    async fn run(mut self) {
        tracing::info!(
            session_id = %self.session_id,
            recognizer = self.recognizer.name(),
            "drawing session started"
        );
        self.prepare_recognizer();

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        tracing::debug!("all session handles dropped");
                        break;
                    };
                    if !self.handle_command(command) {
                        break;
                    }
                }
                Some(internal) = self.internal_rx.recv() => self.handle_internal(internal),
            }

            self.publish();
        }

        self.debouncer.cancel();
        tracing::info!(session_id = %self.session_id, "drawing session stopped");
    }

    /// Returns false when the session should stop.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Pointer(event) => self.on_pointer(event),
            Command::SetTypedText(text) => self.on_typed_text(text),
            Command::Clear => self.on_clear(),
            Command::Launch(identifier) => self.on_launch(identifier),
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn handle_internal(&mut self, internal: Internal) {
        match internal {
            Internal::DebounceElapsed { generation } => self.on_debounce_elapsed(generation),
            Internal::RecognitionFinished {
                generation,
                outcome,
            } => self.on_recognition_finished(generation, outcome),
            Internal::ModelPrepared(result) => self.on_model_prepared(result),
        }
    }

    fn on_pointer(&mut self, event: PointerEvent) {
        let PointerTransition::StrokeCommitted {
            generation,
            stroke_index,
            points,
            duration_ms,
        } = self.session.handle_pointer(event)
        else {
            return;
        };

        tracing::debug!(generation, stroke_index, points, "stroke committed");
        emit_event(
            &*self.bus,
            event_names::STROKE_COMMITTED,
            &StrokeCommittedEvent {
                session_id: self.session_id,
                generation,
                stroke_index,
                points,
                duration_ms,
                ts_ms: now_ms(),
            },
        );

        self.debouncer.schedule(
            generation,
            self.internal_tx.clone(),
            Internal::DebounceElapsed { generation },
        );
    }

    fn on_typed_text(&mut self, text: String) {
        if let TypedTransition::DrawingReset { generation } = self.session.set_typed_text(text) {
            tracing::debug!(generation, "typed input replaced drawing");
            self.reset_recognition(generation, ClearReason::TypedInput);
        }
    }

    fn on_clear(&mut self) {
        let generation = self.session.clear();
        tracing::debug!(generation, "session cleared");
        self.reset_recognition(generation, ClearReason::User);
    }

    fn reset_recognition(&mut self, generation: u64, reason: ClearReason) {
        let cancelled_pending = self.debouncer.cancel();
        self.in_flight = None;

        emit_event(
            &*self.bus,
            event_names::SESSION_CLEARED,
            &SessionClearedEvent {
                session_id: self.session_id,
                generation,
                reason,
                cancelled_pending,
                ts_ms: now_ms(),
            },
        );
    }

    fn on_launch(&mut self, identifier: String) {
        let results = finder_catalog::search(
            &self.catalog,
            self.session.typed_text(),
            self.session.recognized_text(),
        );
        let Some(entry) = results
            .entries
            .into_iter()
            .find(|e| e.identifier == identifier)
        else {
            tracing::debug!(identifier = %identifier, "launch ignored: not in current results");
            return;
        };

        emit_event(
            &*self.bus,
            event_names::APP_LAUNCH_REQUESTED,
            &AppLaunchRequestedEvent {
                session_id: self.session_id,
                identifier: entry.identifier.clone(),
                display_name: entry.display_name.clone(),
                ts_ms: now_ms(),
            },
        );

        let launcher = self.launcher.clone();
        tokio::spawn(async move {
            if let Err(e) = launcher.launch(&entry.identifier).await {
                tracing::warn!(
                    identifier = %entry.identifier,
                    error = %e,
                    "failed to launch application"
                );
            }
        });
    }

    fn on_debounce_elapsed(&mut self, generation: u64) {
        if !self.debouncer.complete(generation) || !self.session.is_current(generation) {
            tracing::trace!(generation, "stale debounce timer ignored");
            return;
        }

        let ink = self.session.ink_payload();
        if ink.is_empty() {
            tracing::debug!(generation, "debounce elapsed with no strokes, nothing to recognize");
            return;
        }

        tracing::debug!(generation, strokes = ink.len(), "requesting recognition");
        emit_event(
            &*self.bus,
            event_names::RECOGNITION_REQUESTED,
            &RecognitionRequestedEvent {
                session_id: self.session_id,
                generation,
                strokes: ink.len(),
                points: ink.point_count(),
                ts_ms: now_ms(),
            },
        );

        self.in_flight = Some(generation);

        let recognizer = self.recognizer.clone();
        let timeout = self.config.recognition_timeout;
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, recognizer.recognize(&ink)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(RecognitionError::Timeout(timeout.as_millis() as u64)),
            };
            let _ = tx.send(Internal::RecognitionFinished {
                generation,
                outcome,
            });
        });
    }

    fn on_recognition_finished(
        &mut self,
        generation: u64,
        outcome: std::result::Result<Recognition, RecognitionError>,
    ) {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }

        if !self.session.is_current(generation) {
            tracing::debug!(
                generation,
                current = self.session.generation(),
                "discarding stale recognition result"
            );
            emit_event(
                &*self.bus,
                event_names::RECOGNITION_DISCARDED,
                &RecognitionDiscardedEvent {
                    session_id: self.session_id,
                    generation,
                    current_generation: self.session.generation(),
                    ts_ms: now_ms(),
                },
            );
            return;
        }

        let error = match outcome {
            Ok(recognition) => match recognition.best_text() {
                Some(text) => {
                    self.session.apply_recognition(generation, text);
                    tracing::debug!(generation, text, "recognition applied");
                    emit_event(
                        &*self.bus,
                        event_names::RECOGNITION_APPLIED,
                        &RecognitionAppliedEvent {
                            session_id: self.session_id,
                            generation,
                            text: text.to_string(),
                            ts_ms: now_ms(),
                        },
                    );
                    return;
                }
                None => "recognizer returned no candidates".to_string(),
            },
            Err(e) => e.to_string(),
        };

        tracing::warn!(generation, error = %error, "recognition failed");
        emit_event(
            &*self.bus,
            event_names::RECOGNITION_FAILED,
            &RecognitionFailedEvent {
                session_id: self.session_id,
                generation,
                error,
                ts_ms: now_ms(),
            },
        );
    }

    fn prepare_recognizer(&self) {
        let recognizer = self.recognizer.clone();
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = recognizer.prepare().await;
            let _ = tx.send(Internal::ModelPrepared(result));
        });
    }

    fn on_model_prepared(&mut self, result: std::result::Result<(), RecognitionError>) {
        self.model_loading = false;

        let error = result.err().map(|e| e.to_string());
        match &error {
            None => tracing::info!(recognizer = self.recognizer.name(), "recognizer ready"),
            Some(e) => tracing::warn!(
                recognizer = self.recognizer.name(),
                error = %e,
                "recognizer preparation failed"
            ),
        }

        emit_event(
            &*self.bus,
            event_names::MODEL_READY,
            &ModelReadyEvent {
                session_id: self.session_id,
                recognizer: self.recognizer.name().to_string(),
                ready: error.is_none(),
                error,
                ts_ms: now_ms(),
            },
        );
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            self.session_id,
            &self.session,
            &self.catalog,
            self.model_loading,
            self.debouncer.is_pending() || self.in_flight.is_some(),
        )
    }

    fn publish(&self) {
        let next = self.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
