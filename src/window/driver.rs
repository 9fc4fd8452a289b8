//! Render-driver thread and the engine-to-renderer handoff.
//!
//! The engine thread is the only producer of [`FrameReady`] notifications and
//! the render driver the only consumer. A notification carries no data: the
//! driver reloads the shared snapshot when it wakes.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

use crate::error::VisualizerError;

/// "A new snapshot is available."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReady;

/// Wakes a render loop that is blocked waiting for events.
pub trait RepaintSignal: Send + Sync {
    /// Ask the render loop to run another frame.
    fn request_repaint(&self);
}

impl RepaintSignal for eframe::egui::Context {
    fn request_repaint(&self) {
        eframe::egui::Context::request_repaint(self);
    }
}

/// A no-op signal for render loops that block on the frame channel itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelWake;

impl RepaintSignal for ChannelWake {
    fn request_repaint(&self) {}
}

/// One-shot latch the render driver trips once its window is up.
#[derive(Debug)]
pub struct ReadyLatch {
    tx: Sender<Arc<dyn RepaintSignal>>,
}

impl ReadyLatch {
    /// Report readiness and hand back the signal used to wake the loop.
    pub fn signal(self, waker: Arc<dyn RepaintSignal>) {
        // The spawner only stops listening if it already gave up on us.
        let _ = self.tx.send(waker);
    }
}

impl std::fmt::Debug for dyn RepaintSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RepaintSignal")
    }
}

/// Engine-side sender of frame-ready notifications.
#[derive(Debug, Clone)]
pub struct FrameNotifier {
    tx: Sender<FrameReady>,
    waker: Arc<dyn RepaintSignal>,
}

impl FrameNotifier {
    /// Queue a notification and wake the render loop. Never blocks.
    ///
    /// Returns `false` if the render driver is gone.
    #[must_use]
    pub fn notify(&self) -> bool {
        if self.tx.send(FrameReady).is_err() {
            tracing::debug!("frame notification dropped, render driver has exited");
            return false;
        }
        self.waker.request_repaint();
        true
    }
}

/// Handle to the render-driver thread.
#[derive(Debug)]
pub struct RenderDriver {
    handle: JoinHandle<()>,
}

impl RenderDriver {
    /// Start a render driver and block until it reports ready.
    ///
    /// `body` runs on the new thread. It receives the frame-ready channel and
    /// must call [`ReadyLatch::signal`] once it can accept notifications. If it
    /// returns or panics before that, spawning fails.
    ///
    /// # Errors
    ///
    /// Returns [`VisualizerError::Spawn`] if the thread cannot be created or
    /// exits without signalling readiness.
    pub fn spawn<F>(name: &str, body: F) -> Result<(Self, FrameNotifier), VisualizerError>
    where
        F: FnOnce(Receiver<FrameReady>, ReadyLatch) + Send + 'static,
    {
        let (frame_tx, frame_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);
        let latch = ReadyLatch { tx: ready_tx };

        let handle = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                tracing::info!("render driver starting");
                body(frame_rx, latch);
                tracing::info!("render driver exiting");
            })
            .map_err(|e| VisualizerError::Spawn(e.to_string()))?;

        let Ok(waker) = ready_rx.recv() else {
            let _ = handle.join();
            return Err(VisualizerError::Spawn(
                "render driver exited before it was ready".to_string(),
            ));
        };
        tracing::info!("render driver ready");

        Ok((
            Self { handle },
            FrameNotifier {
                tx: frame_tx,
                waker,
            },
        ))
    }

    /// Whether the driver thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
