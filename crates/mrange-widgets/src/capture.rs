#![forbid(unsafe_code)]

//! Global pointer capture as a resource scope.
//!
//! While a thumb is dragged, move and release signals must reach the slider
//! even after the pointer leaves the widget. Hosts implement
//! [`GlobalCapture`] to attach document-level (or window-level) listeners;
//! `acquire` hands back a [`CaptureDisposer`] that detaches them.
//!
//! The disposer releases exactly once: on [`dispose`](CaptureDisposer::dispose)
//! or when dropped, whichever comes first. Teardown paths therefore only need
//! to drop the active drag state.

use std::fmt;

/// Host hook that routes pointer signals to the slider during a drag.
pub trait GlobalCapture {
    /// Start routing signals for `pointer_id` and return the matching release.
    fn acquire(&mut self, pointer_id: u32) -> CaptureDisposer;
}

/// Release handle for one acquired capture.
#[must_use = "dropping a CaptureDisposer releases the capture immediately"]
pub struct CaptureDisposer {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureDisposer {
    /// Wrap a release action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A disposer with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Whether a release action is still outstanding.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.release.is_some()
    }

    /// Release now.
    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for CaptureDisposer {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for CaptureDisposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureDisposer")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Capture for hosts that already deliver every pointer signal to the
/// slider (headless hosts, tests, terminal frontends).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCapture;

impl GlobalCapture for NoopCapture {
    fn acquire(&mut self, _pointer_id: u32) -> CaptureDisposer {
        CaptureDisposer::noop()
    }
}

impl<F> GlobalCapture for F
where
    F: FnMut(u32) -> CaptureDisposer,
{
    fn acquire(&mut self, pointer_id: u32) -> CaptureDisposer {
        self(pointer_id)
    }
}
