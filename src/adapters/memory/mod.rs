//! In-memory adapters for every storage and read port.
//!
//! Documents are kept in their persisted shape and converted on every read,
//! so these adapters go through the same validation a real document store
//! would. Change notification uses a `tokio::sync::broadcast` channel; each
//! subscription re-queries on every tick.

mod decision_store;
mod relationship_store;
mod stakeholder_directory;
mod team_hierarchy_store;

pub use decision_store::InMemoryDecisionStore;
pub use relationship_store::InMemoryRelationshipStore;
pub use stakeholder_directory::InMemoryStakeholderDirectory;
pub use team_hierarchy_store::InMemoryTeamHierarchyStore;

use futures::stream::{self, BoxStream, StreamExt};
use std::future::Future;
use tokio::sync::broadcast::{self, error::RecvError};

/// Buffer size of each store's change channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

fn change_channel() -> broadcast::Sender<()> {
    let (tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
    tx
}

/// Yields `load(state)` once immediately and again after every change tick.
///
/// Lagging receivers skip straight to a fresh load. The stream ends when the
/// store (and with it the sender) is dropped.
fn watch<S, T, F, Fut>(state: S, changes: broadcast::Receiver<()>, load: F) -> BoxStream<'static, T>
where
    S: Clone + Send + Sync + 'static,
    T: Send + 'static,
    F: Fn(S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    stream::unfold(
        (state, changes, load, true),
        |(state, mut changes, load, first)| async move {
            if !first {
                match changes.recv().await {
                    Ok(()) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => return None,
                }
            }
            let item = load(state.clone()).await;
            Some((item, (state, changes, load, false)))
        },
    )
    .boxed()
}
