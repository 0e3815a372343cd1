//! Streaming frame capture.
//!
//! The session turns one composite refresh per tick into a stream of
//! frames. What happens to the frames is the sink's business; the
//! shipped [`PngSequenceSink`] writes a numbered PNG sequence into a
//! timestamped directory, ready for an external encoder to mux.

use crate::composite::Composite;
use crate::error::ExportError;
use crate::snapshot::encode_png;
use std::path::PathBuf;

/// External encoding boundary. `begin` may fail (unsupported target,
/// unwritable location) and the session guarantees a failed start leaves
/// no capture running.
pub trait FrameSink {
    fn begin(&mut self, width: u32, height: u32) -> Result<(), ExportError>;
    fn write_frame(&mut self, frame: &Composite) -> Result<(), ExportError>;
    fn finish(&mut self) -> Result<(), ExportError>;
}

/// Capture control wrapped around a sink.
pub struct CaptureSession {
    sink: Box<dyn FrameSink>,
    recording: bool,
    frames: u64,
}

impl CaptureSession {
    #[must_use]
    pub fn new(sink: Box<dyn FrameSink>) -> Self {
        Self {
            sink,
            recording: false,
            frames: 0,
        }
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    #[must_use]
    pub fn frames_captured(&self) -> u64 {
        self.frames
    }

    /// Start recording. On error the recording flag stays clear, so a
    /// failed start can simply be retried or ignored.
    pub fn start(&mut self, composite: &Composite) -> Result<(), ExportError> {
        if self.recording {
            return Err(ExportError::AlreadyRecording);
        }
        self.sink.begin(composite.width(), composite.height())?;
        self.recording = true;
        self.frames = 0;
        tracing::info!("capture started");
        Ok(())
    }

    /// Push the composite as refreshed for the current tick. Must be
    /// called after the tick's classification pass so the frame observes
    /// that tick's committed stores, not a stale one.
    pub fn capture_frame(&mut self, composite: &Composite) -> Result<(), ExportError> {
        if !self.recording {
            return Err(ExportError::NotRecording);
        }
        self.sink.write_frame(composite)?;
        self.frames += 1;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), ExportError> {
        if !self.recording {
            return Err(ExportError::NotRecording);
        }
        self.recording = false;
        self.sink.finish()?;
        tracing::info!(frames = self.frames, "capture stopped");
        Ok(())
    }
}

/// Writes `frame_NNNNN.png` files into `cylinder_recording_<timestamp>/`
/// under a parent directory.
pub struct PngSequenceSink {
    parent: PathBuf,
    dir: Option<PathBuf>,
    next_index: u64,
}

impl PngSequenceSink {
    #[must_use]
    pub fn new(parent: PathBuf) -> Self {
        Self {
            parent,
            dir: None,
            next_index: 0,
        }
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _width: u32, _height: u32) -> Result<(), ExportError> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let dir = self.parent.join(format!("cylinder_recording_{stamp}"));
        std::fs::create_dir_all(&dir)?;
        tracing::info!(dir = %dir.display(), "png sequence opened");
        self.dir = Some(dir);
        self.next_index = 0;
        Ok(())
    }

    fn write_frame(&mut self, frame: &Composite) -> Result<(), ExportError> {
        let dir = self.dir.as_ref().ok_or(ExportError::NotRecording)?;
        let path = dir.join(format!("frame_{:05}.png", self.next_index));
        encode_png(frame, &path)?;
        self.next_index += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        if let Some(dir) = &self.dir {
            tracing::info!(dir = %dir.display(), frames = self.next_index, "png sequence closed");
        }
        Ok(())
    }
}
