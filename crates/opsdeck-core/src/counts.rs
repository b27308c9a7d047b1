// ── Sidebar counters ──
//
// Three cheap one-row list calls read `totalItems` as counters, polled
// on a fixed interval. A failed fetch is logged and that counter keeps
// its previous value; the other two still update. Nothing propagates to
// the consumer, and the poll task is cancelled deterministically on
// shutdown.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use opsdeck_api::ListParams;

use crate::inventory::Inventory;

/// Fixed polling interval for the counters.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The three dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarCounts {
    /// Tickets with status `waiting_dev`.
    pub waiting_tickets: u64,
    /// Servers with status `online`.
    pub online_servers: u64,
    /// Apps with status `running`.
    pub running_apps: u64,
}

impl Inventory {
    /// Fetch all three counters once. The three probes run concurrently
    /// and are unordered relative to each other; each failure is
    /// swallowed and the previous value retained (stale-but-available).
    pub async fn refresh_counts(&self, prev: SidebarCounts) -> SidebarCounts {
        let probe = || ListParams::default().page(1).per_page(1);

        let (tickets, servers, apps) = tokio::join!(
            self.tickets_collection()
                .get_by_filter("status = \"waiting_dev\"", probe()),
            self.servers_collection()
                .get_by_filter("status = \"online\"", probe()),
            self.apps_collection()
                .get_by_filter("status = \"running\"", probe()),
        );

        SidebarCounts {
            waiting_tickets: match tickets {
                Ok(page) => page.total_items,
                Err(e) => {
                    warn!(error = %e, "ticket counter fetch failed; keeping previous value");
                    prev.waiting_tickets
                }
            },
            online_servers: match servers {
                Ok(page) => page.total_items,
                Err(e) => {
                    warn!(error = %e, "server counter fetch failed; keeping previous value");
                    prev.online_servers
                }
            },
            running_apps: match apps {
                Ok(page) => page.total_items,
                Err(e) => {
                    warn!(error = %e, "app counter fetch failed; keeping previous value");
                    prev.running_apps
                }
            },
        }
    }
}

/// Background poller publishing [`SidebarCounts`] through a watch channel.
pub struct CountsPoller {
    counts: watch::Receiver<SidebarCounts>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CountsPoller {
    /// Spawn the poller at the fixed 30-second interval. The first
    /// refresh fires immediately.
    pub fn spawn(inventory: Inventory) -> Self {
        Self::spawn_with_interval(inventory, POLL_INTERVAL)
    }

    /// Spawn with an explicit interval (tests use a short one).
    pub fn spawn_with_interval(inventory: Inventory, period: Duration) -> Self {
        let (tx, rx) = watch::channel(SidebarCounts::default());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_task(inventory, tx, period, cancel.clone()));

        Self {
            counts: rx,
            cancel,
            handle,
        }
    }

    /// Subscribe to counter updates.
    pub fn subscribe(&self) -> watch::Receiver<SidebarCounts> {
        self.counts.clone()
    }

    /// The latest counters.
    pub fn current(&self) -> SidebarCounts {
        *self.counts.borrow()
    }

    /// Cancel the poll task and wait for it to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

async fn poll_task(
    inventory: Inventory,
    tx: watch::Sender<SidebarCounts>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let prev = *tx.borrow();
                let next = inventory.refresh_counts(prev).await;
                tx.send_replace(next);
            }
        }
    }
}
