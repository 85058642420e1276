#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc::{Receiver, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interrupted {
    OsSigInt,
    OsSigTerm,
}

#[cfg(unix)]
async fn terminate_by_unix_signal(terminator: Sender<Interrupted>) {
    let (mut interrupt, mut terminate) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(interrupt), Ok(terminate)) => (interrupt, terminate),
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(%err, "could not listen for termination signals");
                return;
            }
        };

    let interrupted = tokio::select! {
        _ = interrupt.recv() => Interrupted::OsSigInt,
        _ = terminate.recv() => Interrupted::OsSigTerm,
    };
    tracing::info!(?interrupted, "received termination signal");

    if terminator.send(interrupted).await.is_err() {
        tracing::debug!("ui already stopped");
    }
}

// create a channel for retrieving the application kill signal
pub fn create_termination() -> (Sender<Interrupted>, Receiver<Interrupted>) {
    let (tx, rx) = tokio::sync::mpsc::channel(1);

    #[cfg(unix)]
    tokio::spawn(terminate_by_unix_signal(tx.clone()));

    (tx, rx)
}
