//! Pass-through streaming shell around the analyser.
//!
//! [`AnalyserStage`] owns an [`Analyser`] behind a [`SharedAnalyser`] handle
//! and drives it from `tokio::sync::mpsc` channels:
//!
//! ```text
//! upstream chunk ──▶ consume() ──▶ forward downstream (when attached)
//!                        │
//!                        └─ Completion::Deferred → yield_now().await
//! ```
//!
//! Chunks are processed strictly in arrival order; history and spectrum are
//! updated before the chunk is forwarded, so accessors on the shared handle
//! always reflect the most recently processed chunk. The deferral mapped
//! onto [`tokio::task::yield_now`] is the loop's only suspension point
//! besides channel I/O — there is no parallel chunk processing and no
//! locking beyond the shared handle. Dropping the receiver (or the whole
//! future) tears the stage down with no deferred work left behind.
//!
//! Without a downstream sender the stage runs as a sink, analysing chunks
//! without forwarding them.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::analyser::Analyser;

// ---------------------------------------------------------------------------
// SharedAnalyser
// ---------------------------------------------------------------------------

/// Thread-safe handle to an [`Analyser`].
///
/// Cheap to clone (`Arc` clone). Lock for a short critical section —
/// one `consume` or one accessor call — and do **not** hold the lock across
/// `.await` points.
pub type SharedAnalyser = Arc<Mutex<Analyser>>;

// ---------------------------------------------------------------------------
// AnalyserStage
// ---------------------------------------------------------------------------

/// Runs an analyser as an inline pipeline stage.
///
/// # Example
///
/// ```rust,no_run
/// use audio_analyser::{Analyser, AnalyserConfig, AnalyserStage, PcmFormat};
///
/// # async fn example() {
/// let analyser = Analyser::new(AnalyserConfig::default(), PcmFormat::default()).unwrap();
/// let stage = AnalyserStage::new(analyser);
/// let handle = stage.handle();
///
/// let (in_tx, in_rx) = tokio::sync::mpsc::channel::<Vec<u8>>(16);
/// let (out_tx, out_rx) = tokio::sync::mpsc::channel::<Vec<u8>>(16);
/// tokio::spawn(stage.run(in_rx, Some(out_tx)));
///
/// // Feed chunks through in_tx; read them unmodified from out_rx; pull
/// // spectra from `handle` at any time.
/// # let _ = (in_tx, out_rx, handle);
/// # }
/// ```
pub struct AnalyserStage {
    analyser: SharedAnalyser,
}

impl AnalyserStage {
    /// Wrap an analyser for streaming use.
    pub fn new(analyser: Analyser) -> Self {
        Self {
            analyser: Arc::new(Mutex::new(analyser)),
        }
    }

    /// A shared handle for pulling analysis data while the stage runs.
    pub fn handle(&self) -> SharedAnalyser {
        Arc::clone(&self.analyser)
    }

    /// Run until the input channel closes.
    ///
    /// Each received chunk is consumed by the analyser, then forwarded to
    /// `downstream` byte-for-byte. When the downstream receiver goes away
    /// the stage keeps analysing as a sink. A deferred pacing decision
    /// becomes a single cooperative yield before the next receive.
    pub async fn run(self, mut upstream: mpsc::Receiver<Vec<u8>>, downstream: Option<mpsc::Sender<Vec<u8>>>) {
        let mut downstream = downstream;

        while let Some(chunk) = upstream.recv().await {
            let completion = {
                let mut analyser = self.analyser.lock().unwrap();
                analyser.consume(&chunk)
            };

            if let Some(tx) = &downstream {
                if tx.send(chunk).await.is_err() {
                    log::warn!("stage: downstream receiver dropped, continuing as sink");
                    downstream = None;
                }
            }

            if completion.is_deferred() {
                tokio::task::yield_now().await;
            }
        }

        log::info!("stage: upstream channel closed, shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
