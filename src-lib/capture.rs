// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! Camera acquisition and the background capture loop.
//!
//! One thread pulls frames from the device and publishes each into a
//! [`LatestCell`]; the UI drains the newest snapshot on its own tick. The
//! loop is cancelled cooperatively via a flag checked once per iteration,
//! and the device handle is released by dropping the capture when the loop
//! exits for any reason.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::{anyhow, Result};
use debug_print::debug_println;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::frame::Frame;
use crate::latest::LatestCell;
use crate::util::dialog;

pub struct Camera {
    capture: VideoCapture,
    mirror: bool,
}

impl Camera {
    /// Open a capture device. CAP_ANY lets the backend pick whatever the
    /// platform provides. Failure is recoverable: the caller reports it and
    /// carries on without a camera.
    pub fn open(index: i32, mirror: bool) -> Result<Camera> {
        let capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(anyhow!("cannot open capture device {index}"));
        }
        Ok(Camera { capture, mirror })
    }

    /// Pull one frame and convert it out of OpenCV's BGR layout.
    /// `Ok(None)` means the device produced nothing (end of stream).
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        let mut raw = Mat::default();
        if !self.capture.read(&mut raw)? || raw.empty() {
            return Ok(None);
        }
        if !raw.is_continuous() {
            return Err(anyhow!("camera frame is not continuous"));
        }
        if raw.channels() != 3 {
            return Err(anyhow!("expected a 3-channel BGR frame, got {} channels", raw.channels()));
        }

        let width = raw.cols() as u32;
        let height = raw.rows() as u32;
        Ok(Some(Frame::from_bgr(width, height, raw.data_bytes()?, self.mirror)))
    }
}

/// Handle to a running capture loop. Dropping it stops the loop and joins
/// the thread, which in turn releases the device.
pub struct CaptureWorker {
    running: Arc<AtomicBool>,
    frames: Arc<LatestCell<Frame>>,
    join_handle: Option<JoinHandle<()>>,
}

impl CaptureWorker {
    /// newest frame published by the loop, if any
    pub fn latest_frame(&self) -> Option<Arc<Frame>> {
        self.frames.latest()
    }

    /// signal the loop to stop and wait for the device to be released
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CaptureWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn the background capture loop for an opened camera.
pub fn spawn(mut camera: Camera) -> CaptureWorker {
    let running = Arc::new(AtomicBool::new(true));
    let frames: Arc<LatestCell<Frame>> = Arc::new(LatestCell::new());

    let join_handle = {
        let running = running.clone();
        let frames = frames.clone();
        std::thread::Builder::new()
            .name("capture-loop".to_string())
            .spawn(move || {
                while running.load(Ordering::Relaxed) {
                    match camera.read_frame() {
                        Ok(Some(frame)) => frames.publish(Arc::new(frame)),
                        Ok(None) => {
                            debug_println!("capture device stopped producing frames");
                            break;
                        }
                        Err(e) => {
                            debug_println!("capture loop error: {e}");
                            dialog::show_warning(format!("Camera error, stopping capture.\n\n{e}"));
                            break;
                        }
                    }
                }
                // camera dropped here, releasing the device handle
            })
            .unwrap()
    };

    CaptureWorker {
        running,
        frames,
        join_handle: Some(join_handle),
    }
}
