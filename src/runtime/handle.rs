use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    aggregate::Aggregates,
    officer::{HouseOfficerRecord, OfficerForm},
    registration::Clock,
    session::{RegisterError, Session},
    types::OfficerId,
    view::ViewQuery,
};

use super::events::RegistryEvent;

/// Failure of a runtime request.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The registration was rejected or could not be stored.
    #[error(transparent)]
    Register(#[from] RegisterError),
    /// The runtime loop has stopped.
    #[error("registry runtime is not running")]
    ChannelClosed,
}

/// Cloneable handle to a running registry loop.
#[derive(Clone)]
pub struct RegistryHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<RegistryEvent>,
}

enum Command {
    Register {
        form: OfficerForm,
        resp: oneshot::Sender<Result<HouseOfficerRecord, RegisterError>>,
    },
    Remove {
        id: OfficerId,
        resp: oneshot::Sender<Option<HouseOfficerRecord>>,
    },
    Get {
        id: OfficerId,
        resp: oneshot::Sender<Option<HouseOfficerRecord>>,
    },
    List {
        resp: oneshot::Sender<Vec<HouseOfficerRecord>>,
    },
    View {
        query: ViewQuery,
        resp: oneshot::Sender<Vec<HouseOfficerRecord>>,
    },
    Aggregates {
        resp: oneshot::Sender<Aggregates>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `session` into a task that applies commands one at a time.
///
/// Channel sizes come from the session's configuration.
pub fn spawn_registry<C: Clock + 'static>(session: Session<C>) -> RegistryHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(session.config().command_queue_bound);
    let (events_tx, _) = broadcast::channel::<RegistryEvent>(session.config().event_capacity);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut session = session;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut session, &events_tx_loop) {
                break;
            }
        }
        tracing::debug!(records = session.store().len(), "registry runtime stopped");
    });

    RegistryHandle { cmd_tx, events_tx }
}

impl RegistryHandle {
    /// Subscribes to registration and deletion events.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events_tx.subscribe()
    }

    /// Validates and stores one submission.
    pub async fn register(&self, form: OfficerForm) -> Result<HouseOfficerRecord, RuntimeError> {
        let res = self.call(|resp| Command::Register { form, resp }).await?;
        res.map_err(RuntimeError::from)
    }

    /// Deletes one record. Absent ids yield `None`.
    pub async fn remove(&self, id: OfficerId) -> Result<Option<HouseOfficerRecord>, RuntimeError> {
        self.call(|resp| Command::Remove { id, resp }).await
    }

    /// Looks up one record.
    pub async fn get(&self, id: OfficerId) -> Result<Option<HouseOfficerRecord>, RuntimeError> {
        self.call(|resp| Command::Get { id, resp }).await
    }

    /// Every record in insertion order.
    pub async fn list(&self) -> Result<Vec<HouseOfficerRecord>, RuntimeError> {
        self.call(|resp| Command::List { resp }).await
    }

    /// Records visible under `query`, in display order.
    pub async fn view(&self, query: ViewQuery) -> Result<Vec<HouseOfficerRecord>, RuntimeError> {
        self.call(|resp| Command::View { query, resp }).await
    }

    /// Chart series over every record.
    pub async fn aggregates(&self) -> Result<Aggregates, RuntimeError> {
        self.call(|resp| Command::Aggregates { resp }).await
    }

    /// Stops the loop after commands already queued.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.call(|resp| Command::Shutdown { resp }).await
    }

    async fn call<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command<C: Clock>(
    cmd: Command,
    session: &mut Session<C>,
    events_tx: &broadcast::Sender<RegistryEvent>,
) -> bool {
    match cmd {
        Command::Register { form, resp } => {
            let res = session.register(&form).map(|reg| {
                let _ = events_tx.send(RegistryEvent::Registered { id: reg.record.id });
                reg.record
            });
            let _ = resp.send(res);
        }
        Command::Remove { id, resp } => {
            let removed = session.delete(id);
            if removed.is_some() {
                let _ = events_tx.send(RegistryEvent::Removed { id });
            }
            let _ = resp.send(removed);
        }
        Command::Get { id, resp } => {
            let _ = resp.send(session.store().get_cloned(id));
        }
        Command::List { resp } => {
            let _ = resp.send(session.store().list_cloned());
        }
        Command::View { query, resp } => {
            let _ = resp.send(query.apply(session.store().iter()).to_records());
        }
        Command::Aggregates { resp } => {
            let _ = resp.send(session.aggregates());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
