//! Restart and exit signals of a single screen instance.
//!
//! Each screen gets a fresh pair of one-shot channels. The session holds the
//! sending half and fires one when it wants the screen gone; the driver
//! checks the receiving half between events.

use tokio::sync::oneshot;

/// Why a screen instance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenExit {
    /// Tear the screen down and build a new one, e.g. after an external
    /// program used the terminal.
    Restart,
    /// Leave the list for good.
    Quit,
}

/// Sending half, owned by the session.
#[derive(Debug)]
pub struct ScreenControl {
    restart: Option<oneshot::Sender<()>>,
    exit: Option<oneshot::Sender<()>>,
}

impl ScreenControl {
    pub fn request_restart(&mut self) {
        if let Some(tx) = self.restart.take() {
            // the receiver only disappears together with the screen
            let _ = tx.send(());
        }
    }

    pub fn request_exit(&mut self) {
        if let Some(tx) = self.exit.take() {
            let _ = tx.send(());
        }
    }
}

/// Receiving half, owned by the screen driver.
#[derive(Debug)]
pub struct ScreenSignals {
    restart: oneshot::Receiver<()>,
    exit: oneshot::Receiver<()>,
}

impl ScreenSignals {
    /// A fired signal, if any. Exit wins over restart.
    pub fn poll(&mut self) -> Option<ScreenExit> {
        if self.exit.try_recv().is_ok() {
            return Some(ScreenExit::Quit);
        }
        if self.restart.try_recv().is_ok() {
            return Some(ScreenExit::Restart);
        }
        None
    }
}

/// A fresh signal pair for one screen instance.
pub fn screen_channel() -> (ScreenControl, ScreenSignals) {
    let (restart_tx, restart_rx) = oneshot::channel();
    let (exit_tx, exit_rx) = oneshot::channel();
    (
        ScreenControl {
            restart: Some(restart_tx),
            exit: Some(exit_tx),
        },
        ScreenSignals {
            restart: restart_rx,
            exit: exit_rx,
        },
    )
}
