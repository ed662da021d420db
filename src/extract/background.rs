//! Extraction off the caller's thread
//!
//! Extraction over a multi-megapixel buffer is the only expensive engine
//! call. `ExtractionTask` runs it on the rayon pool and delivers the single
//! result through a one-slot channel. There is no cancellation: a caller that
//! no longer wants the result drops the task, and the worker's send is
//! silently discarded.
//!
//! ```no_run
//! use std::sync::Arc;
//! use chroma_palette::{ExtractionConfig, ExtractionMode, ExtractionTask, PixelBuffer};
//!
//! let pixels = Arc::new(PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255])?);
//! let task = ExtractionTask::spawn(pixels, ExtractionMode::Dominant, 2, true, ExtractionConfig::default());
//! let colors = task.wait()?;
//! # Ok::<(), chroma_palette::PaletteError>(())
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::pixels::{PixelBuffer, Region};
use super::{extract_prominent_colors, extract_random_colors};
use crate::color::Color;
use crate::config::ExtractionConfig;
use crate::{PaletteError, Result};

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// Which extractor a task runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Uniform random pixel sampling
    Random,
    /// Most frequent color buckets
    Dominant,
}

/// Handle to an extraction running in the background
///
/// Ids increase monotonically, so a caller juggling several requests can keep
/// only the newest one.
pub struct ExtractionTask {
    id: u64,
    receiver: Receiver<Result<Vec<Color>>>,
    delivered: AtomicBool,
}

impl ExtractionTask {
    /// Start extracting from the whole image
    pub fn spawn(
        pixels: Arc<PixelBuffer>,
        mode: ExtractionMode,
        count: usize,
        avoid_dark: bool,
        config: ExtractionConfig,
    ) -> Self {
        Self::spawn_in_region(pixels, mode, None, count, avoid_dark, config)
    }

    /// Start extracting; `region` only applies to `ExtractionMode::Dominant`
    pub fn spawn_in_region(
        pixels: Arc<PixelBuffer>,
        mode: ExtractionMode,
        region: Option<Region>,
        count: usize,
        avoid_dark: bool,
        config: ExtractionConfig,
    ) -> Self {
        let id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = bounded(1);

        debug!(task = id, ?mode, count, "spawning extraction");
        rayon::spawn(move || {
            let result = match mode {
                ExtractionMode::Random => {
                    extract_random_colors(&pixels, count, avoid_dark, &config)
                }
                ExtractionMode::Dominant => {
                    extract_prominent_colors(&pixels, region, count, avoid_dark, &config)
                }
            };
            // the receiver may already be gone; that is the caller discarding us
            if sender.send(result).is_err() {
                trace!(task = id, "extraction result discarded");
            }
        });

        Self {
            id,
            receiver,
            delivered: AtomicBool::new(false),
        }
    }

    /// Unique, increasing task id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the worker has produced its result
    ///
    /// Stays true after the result has been taken.
    pub fn is_finished(&self) -> bool {
        self.delivered.load(Ordering::Acquire) || !self.receiver.is_empty()
    }

    /// Take the result if it is ready, without blocking
    ///
    /// The result is handed out once; later calls return `None`.
    pub fn try_get(&self) -> Option<Result<Vec<Color>>> {
        if self.delivered.load(Ordering::Acquire) {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => Some(self.deliver(result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_lost(self.id))),
        }
    }

    /// Block until the result arrives
    ///
    /// # Errors
    ///
    /// `TaskFailed` if the result was already taken or the worker died.
    pub fn wait(self) -> Result<Vec<Color>> {
        if self.delivered.load(Ordering::Acquire) {
            return Err(PaletteError::TaskFailed {
                reason: format!("extraction task {} result already taken", self.id),
            });
        }
        self.receiver.recv().map_err(|_| worker_lost(self.id))?
    }

    /// Block for at most `timeout`; `None` if it has not finished or the
    /// result was already taken
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<Vec<Color>>> {
        if self.delivered.load(Ordering::Acquire) {
            return None;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(self.deliver(result)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(worker_lost(self.id))),
        }
    }

    fn deliver(&self, result: Result<Vec<Color>>) -> Result<Vec<Color>> {
        self.delivered.store(true, Ordering::Release);
        result
    }
}

fn worker_lost(id: u64) -> PaletteError {
    PaletteError::TaskFailed {
        reason: format!("extraction task {} stopped without a result", id),
    }
}
