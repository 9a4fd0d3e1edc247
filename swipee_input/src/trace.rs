//! Dry-run injector that records samples instead of delivering them.
//!
//! Each sample is stored as one frame: an 8 byte big-endian length followed
//! by the bincode payload.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use swipee_core::{DeviceId, InjectionError, Injector, InputSource, TouchSample, WaitPolicy};

// Frames are a few dozen bytes; anything larger is a corrupt header.
const MAX_FRAME_LEN: u64 = 4096;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TraceFrame {
    pub device: DeviceId,
    pub source: InputSource,
    pub sample: TouchSample,
}

pub struct TraceRecorder<W: Write> {
    writer: W,
    frames: usize,
}

impl TraceRecorder<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl TraceRecorder<io::Sink> {
    /// Records nothing; samples only show up in the log.
    pub fn discard() -> Self {
        Self::new(io::sink())
    }
}

impl<W: Write> TraceRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_frame(&mut self, frame: &TraceFrame) -> Result<(), InjectionError> {
        let bytes =
            bincode::serialize(frame).map_err(|e| InjectionError::Encode(e.to_string()))?;
        let len = bytes.len() as u64;
        self.writer.write_all(&len.to_be_bytes())?;
        self.writer.write_all(&bytes)?;
        self.frames += 1;
        Ok(())
    }
}

impl<W: Write> Injector for TraceRecorder<W> {
    fn inject(
        &mut self,
        sample: &TouchSample,
        device: DeviceId,
        source: InputSource,
        wait: WaitPolicy,
    ) -> Result<(), InjectionError> {
        self.write_frame(&TraceFrame {
            device,
            source,
            sample: *sample,
        })?;
        if wait != WaitPolicy::Async {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), InjectionError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads every frame of a recorded trace.
pub fn read_trace<R: Read>(reader: &mut R) -> io::Result<Vec<TraceFrame>> {
    let mut frames = Vec::new();
    loop {
        let mut len_bytes = [0u8; 8];
        match reader.read_exact(&mut len_bytes) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
        let len = u64::from_be_bytes(len_bytes);
        if len > MAX_FRAME_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("trace frame of {len} bytes exceeds {MAX_FRAME_LEN}"),
            ));
        }

        let mut buffer = vec![0u8; len as usize];
        reader.read_exact(&mut buffer)?;
        let frame = bincode::deserialize(&buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        frames.push(frame);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use swipee_core::{Action, Point};

    fn sample(action: Action, x: f32) -> TouchSample {
        TouchSample {
            action,
            position: Point::new(x, 0.0),
            timestamp: Duration::from_millis(x as u64),
            pressure: 1.0,
        }
    }

    #[test]
    fn recorded_frames_read_back_in_order() {
        let mut recorder = TraceRecorder::new(Vec::new());
        for (action, x) in [(Action::Down, 0.0), (Action::Move, 5.0), (Action::Up, 10.0)] {
            recorder
                .inject(
                    &sample(action, x),
                    DeviceId(3),
                    InputSource::Touchpad,
                    WaitPolicy::WaitForFinish,
                )
                .unwrap();
        }
        assert_eq!(recorder.frames(), 3);

        let bytes = recorder.into_inner();
        let frames = read_trace(&mut bytes.as_slice()).unwrap();
        let actions: Vec<_> = frames.iter().map(|f| f.sample.action).collect();
        assert_eq!(actions, vec![Action::Down, Action::Move, Action::Up]);
        assert!(
            frames
                .iter()
                .all(|f| f.device == DeviceId(3) && f.source == InputSource::Touchpad)
        );
        assert_eq!(frames[1].sample.timestamp, Duration::from_millis(5));
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let mut recorder = TraceRecorder::new(Vec::new());
        recorder
            .inject(
                &sample(Action::Down, 1.0),
                DeviceId(0),
                InputSource::Mouse,
                WaitPolicy::Async,
            )
            .unwrap();
        let mut bytes = recorder.into_inner();
        bytes.truncate(bytes.len() - 1);
        assert!(read_trace(&mut bytes.as_slice()).is_err());
    }

    #[test]
    fn oversized_length_header_is_rejected() {
        let err = read_trace(&mut u64::MAX.to_be_bytes().as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let mut bytes = (MAX_FRAME_LEN + 1).to_be_bytes().to_vec();
        bytes.extend(std::iter::repeat_n(0u8, 16));
        assert!(read_trace(&mut bytes.as_slice()).is_err());
    }

    #[test]
    fn empty_trace_has_no_frames() {
        assert!(read_trace(&mut io::empty()).unwrap().is_empty());
    }

    #[test]
    fn discard_counts_frames() {
        let mut recorder = TraceRecorder::discard();
        recorder
            .inject(
                &sample(Action::Move, 1.0),
                DeviceId(0),
                InputSource::Touchscreen,
                WaitPolicy::Async,
            )
            .unwrap();
        recorder.finish().unwrap();
        assert_eq!(recorder.frames(), 1);
    }
}
