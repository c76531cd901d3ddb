//! The bounded-concurrency range sweep.
//!
//! Every address in an [`AddressRange`] gets its own task running
//! [`HostProbe::evaluate`]. A counting semaphore caps how many of those tasks
//! exist at once: the dispatch loop must take a permit before spawning, so a
//! saturated gate stalls dispatch instead of piling up sockets.
//!
//! Verdicts travel over a channel to a single collector task that owns the
//! live-host list; no lock guards it.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use darkly_common::config::ScanSettings;
use darkly_common::network::host::HostResult;
use darkly_common::network::range::{AddressRange, InvalidAddress};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, error, info};

use crate::stop::StopSignal;

mod host;

pub use host::HostProbe;

/// Snapshot handed to the progress callback after each address completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    pub probed: u64,
    pub alive: usize,
    pub total: u64,
}

pub type ProgressCallback = Arc<dyn Fn(ScanProgress) + Send + Sync>;

/// Live hosts found by one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    results: Vec<HostResult>,
    probed: u64,
    interrupted: bool,
    elapsed: Duration,
}

impl ScanReport {
    pub fn new(results: Vec<HostResult>, probed: u64, interrupted: bool, elapsed: Duration) -> Self {
        Self {
            results,
            probed,
            interrupted,
            elapsed,
        }
    }

    /// Live hosts in completion order.
    pub fn results(&self) -> &[HostResult] {
        &self.results
    }

    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    /// Addresses whose evaluation finished.
    pub fn probed(&self) -> u64 {
        self.probed
    }

    /// Whether a stop signal cut dispatch short.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

pub struct BoundedScanner {
    probe: Arc<HostProbe>,
    concurrency_cap: usize,
    gate: Arc<Semaphore>,
    stop: StopSignal,
    on_progress: Option<ProgressCallback>,
}

impl BoundedScanner {
    /// The cap is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn new(probe: HostProbe, concurrency_cap: usize) -> Self {
        let concurrency_cap: usize = concurrency_cap.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            probe: Arc::new(probe),
            concurrency_cap,
            gate: Arc::new(Semaphore::new(concurrency_cap)),
            stop: StopSignal::new(),
            on_progress: None,
        }
    }

    /// ICMP probes and the system resolver, configured from `settings`.
    pub fn system(settings: &ScanSettings) -> Self {
        Self::new(HostProbe::system(settings), settings.concurrency)
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ScanProgress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn concurrency_cap(&self) -> usize {
        self.concurrency_cap
    }

    /// Permits not held by a running evaluation. Equals the cap between sweeps.
    pub fn available_permits(&self) -> usize {
        self.gate.available_permits()
    }

    /// Parses the range, then sweeps it. Nothing is probed when parsing fails.
    pub async fn scan_range(&self, start_text: &str, end_text: &str) -> Result<ScanReport, InvalidAddress> {
        let range: AddressRange = AddressRange::parse(start_text, end_text)?;
        Ok(self.scan(&range).await)
    }

    /// Evaluates every address in `range` and returns once all of them are done.
    ///
    /// Individual probe or lookup failures never fail the sweep.
    pub async fn scan(&self, range: &AddressRange) -> ScanReport {
        let started = std::time::Instant::now();
        let total: u64 = range.len();
        info!(%range, cap = self.concurrency_cap, total, "starting sweep");

        let (tx, rx) = mpsc::unbounded_channel::<HostResult>();
        let collector: JoinHandle<(Vec<HostResult>, u64)> =
            tokio::spawn(collect(rx, total, self.on_progress.clone()));

        let mut workers: JoinSet<()> = JoinSet::new();
        let mut interrupted = false;

        for addr in range.iter() {
            let Some(permit) = self.admit().await else {
                interrupted = true;
                break;
            };
            let probe = Arc::clone(&self.probe);
            let tx = tx.clone();
            workers.spawn(evaluate(probe, addr, permit, tx));

            while let Some(joined) = workers.try_join_next() {
                log_join_error(joined);
            }
        }

        drop(tx);
        while let Some(joined) = workers.join_next().await {
            log_join_error(joined);
        }

        let (results, probed) = match collector.await {
            Ok(collected) => collected,
            Err(e) => {
                error!("Result collector failed: {e}");
                (Vec::new(), 0)
            }
        };

        debug!(
            alive = results.len(),
            probed,
            available_permits = self.gate.available_permits(),
            "sweep finished"
        );
        ScanReport::new(results, probed, interrupted, started.elapsed())
    }

    /// Waits for a free permit, or gives up once the stop signal is raised.
    async fn admit(&self) -> Option<OwnedSemaphorePermit> {
        if self.stop.is_raised() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.stop.raised() => None,
            permit = Arc::clone(&self.gate).acquire_owned() => permit.ok(),
        }
    }
}

/// Sweeps `start_text..=end_text` with ICMP probes and system reverse lookups.
pub async fn scan_range(
    start_text: &str,
    end_text: &str,
    concurrency_cap: usize,
) -> Result<ScanReport, InvalidAddress> {
    let settings = ScanSettings {
        concurrency: concurrency_cap,
        ..ScanSettings::default()
    };
    BoundedScanner::system(&settings)
        .scan_range(start_text, end_text)
        .await
}

async fn evaluate(
    probe: Arc<HostProbe>,
    addr: Ipv4Addr,
    permit: OwnedSemaphorePermit,
    tx: mpsc::UnboundedSender<HostResult>,
) {
    let _permit = permit;
    let result: HostResult = probe.evaluate(addr).await;
    let _ = tx.send(result);
}

/// Sole owner of the live-host list.
async fn collect(
    mut rx: mpsc::UnboundedReceiver<HostResult>,
    total: u64,
    on_progress: Option<ProgressCallback>,
) -> (Vec<HostResult>, u64) {
    let mut alive: Vec<HostResult> = Vec::new();
    let mut probed: u64 = 0;

    while let Some(result) = rx.recv().await {
        probed += 1;
        if result.is_alive() {
            alive.push(result);
        }
        if let Some(callback) = &on_progress {
            callback(ScanProgress {
                probed,
                alive: alive.len(),
                total,
            });
        }
    }

    (alive, probed)
}

fn log_join_error(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        error!("Error while processing address: {e}");
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
