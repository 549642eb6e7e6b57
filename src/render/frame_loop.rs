//! Continuous redraw cycle.
//!
//! The loop advances and repaints a [`Scene`] once per frame whatever the scene is doing. It owns
//! no timer: frames are driven by [`RenderLoop::tick`] with a timestamp, or by
//! [`RenderLoop::run`] pulling timestamps from a [`FrameClock`].

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};
use crate::render::surface::Surface;

/// Longest elapsed time a single frame may report, in milliseconds.
pub const MAX_FRAME_MS: f64 = 250.0;

/// Something advanced and painted every frame.
pub trait Scene {
    /// Advance simulation by `dt_ms` milliseconds.
    fn advance(&mut self, dt_ms: f64);

    /// Paint the current state.
    fn paint(&self, surface: &mut dyn Surface);
}

/// Shared stop flag handed out by [`RenderLoop::start`].
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Request the loop to stop before its next frame.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether [`CancelToken::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Source of frame timestamps in milliseconds.
pub trait FrameClock {
    /// Timestamp of the next frame. Blocks until it is due for real-time clocks.
    fn next_frame(&mut self) -> f64;
}

/// Deterministic clock advancing by a fixed interval, without sleeping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock {
    interval_ms: f64,
    now_ms: f64,
}

impl FixedClock {
    /// Clock producing `fps` frames per simulated second, starting at 0 ms.
    pub fn new(fps: f64) -> GlyphfieldResult<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(GlyphfieldError::validation("fps must be finite and > 0"));
        }
        Ok(Self {
            interval_ms: 1000.0 / fps,
            now_ms: -1000.0 / fps,
        })
    }

    /// Milliseconds between frames.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

impl FrameClock for FixedClock {
    fn next_frame(&mut self) -> f64 {
        self.now_ms += self.interval_ms;
        self.now_ms
    }
}

/// Drives a [`Scene`] frame by frame until cancelled.
#[derive(Debug, Default)]
pub struct RenderLoop {
    token: Option<CancelToken>,
    last_ms: Option<f64>,
    frames: u64,
}

impl RenderLoop {
    /// Stopped loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the loop and return a token that stops it.
    ///
    /// The first frame after a start reports zero elapsed time.
    pub fn start(&mut self) -> CancelToken {
        if let Some(old) = self.token.take() {
            old.cancel();
        }
        let token = CancelToken::default();
        self.token = Some(token.clone());
        self.last_ms = None;
        tracing::debug!("render loop started");
        token
    }

    /// Stop the loop. Idempotent.
    pub fn stop(&mut self) {
        if let Some(token) = &self.token {
            token.cancel();
        }
    }

    /// Whether frames are currently being produced.
    pub fn is_running(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Frames produced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Produce one frame at `now_ms`: advance the scene by the elapsed time, then repaint.
    ///
    /// Returns the elapsed milliseconds used, or `None` when the loop is stopped. Elapsed time is
    /// zero on the first frame and clamped to [`MAX_FRAME_MS`] afterwards.
    pub fn tick<S>(&mut self, now_ms: f64, scene: &mut S, surface: &mut dyn Surface) -> Option<f64>
    where
        S: Scene + ?Sized,
    {
        if !self.is_running() {
            return None;
        }
        let dt_ms = self
            .last_ms
            .map_or(0.0, |last| (now_ms - last).clamp(0.0, MAX_FRAME_MS));
        self.last_ms = Some(now_ms);

        scene.advance(dt_ms);
        scene.paint(surface);
        self.frames += 1;
        tracing::trace!(frame = self.frames, dt_ms, "frame");
        Some(dt_ms)
    }

    /// Tick on every timestamp from `clock` until the loop is stopped or `on_frame` breaks.
    ///
    /// Call [`RenderLoop::start`] first; a stopped loop returns immediately. `on_frame` sees the
    /// 0-based frame number of this run after each paint, with the painted surface, so it can read
    /// pixels back or navigate the scene. Returns the number of frames produced.
    pub fn run<C, S, T, F, E>(
        &mut self,
        clock: &mut C,
        scene: &mut S,
        surface: &mut T,
        mut on_frame: F,
    ) -> Result<u64, E>
    where
        C: FrameClock + ?Sized,
        S: Scene + ?Sized,
        T: Surface,
        F: FnMut(u64, &mut S, &mut T) -> Result<ControlFlow<()>, E>,
    {
        let mut produced = 0u64;
        while self.is_running() {
            let now = clock.next_frame();
            if self.tick(now, &mut *scene, &mut *surface).is_none() {
                break;
            }
            let flow = on_frame(produced, &mut *scene, &mut *surface)?;
            produced += 1;
            if flow.is_break() {
                self.stop();
            }
        }
        Ok(produced)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame_loop.rs"]
mod tests;
