use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crawldash_core::{Effect, Msg};
use crawldash_logging::dash_trace;
use tokio_util::sync::CancellationToken;

use crate::EffectExecutor;

/// Trailing-edge debounce for search refreshes.
///
/// Scheduling cancels the previously pending firing. Firings carry their
/// revision so the controller can still discard one that raced a newer edit.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    pending: Option<CancellationToken>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, revision: u64, delay: Duration, msg_tx: mpsc::Sender<Msg>) {
        self.cancel();
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    dash_trace!("Search revision {} superseded", revision);
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = msg_tx.send(Msg::SearchDebounceElapsed { revision });
                }
            }
        });
    }

    pub fn cancel(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
    }
}

/// Background worker that owns the async runtime. Effects go in through
/// [`EngineHandle::dispatch`]; resulting messages come out of
/// [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Effect>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl EngineHandle {
    pub fn new(executor: EffectExecutor) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Effect>();
        let (msg_tx, msg_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let executor = Arc::new(executor);

        thread::spawn(move || {
            let _guard = runtime.enter();
            let mut debouncer = SearchDebouncer::new();
            while let Ok(effect) = cmd_rx.recv() {
                match effect {
                    Effect::ScheduleSearch { revision, delay } => {
                        debouncer.schedule(revision, delay, msg_tx.clone());
                    }
                    effect => {
                        let executor = executor.clone();
                        let msg_tx = msg_tx.clone();
                        runtime.spawn(async move {
                            if let Some(msg) = executor.execute(effect).await {
                                let _ = msg_tx.send(msg);
                            }
                        });
                    }
                }
            }
            debouncer.cancel();
        });

        Ok(Self { cmd_tx, msg_rx })
    }

    pub fn dispatch(&self, effect: Effect) {
        let _ = self.cmd_tx.send(effect);
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.msg_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.msg_rx.recv_timeout(timeout).ok()
    }
}
