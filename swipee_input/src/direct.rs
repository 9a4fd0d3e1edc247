// This module will only be compiled if the `direct_input` feature is enabled.
#![cfg(feature = "direct_input")]

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use swipee_core::{
    Action, DeviceId, InjectionError, Injector, InputSource, TouchSample, WaitPolicy,
};

use crate::encoding::{Encoder, RawEvent};

// Queued bytes after which an async gesture is written out anyway.
const ASYNC_FLUSH_THRESHOLD: usize = 4096;

// Rust representation of the kernel's `struct input_event`.
// The kernel stamps injected events itself, so the time fields stay zero.
#[repr(C)]
struct InputEvent {
    time_sec: usize,  // Seconds
    time_usec: usize, // Microseconds
    type_: u16,
    code: u16,
    value: i32,
}

impl From<RawEvent> for InputEvent {
    fn from(raw: RawEvent) -> Self {
        InputEvent {
            time_sec: 0,
            time_usec: 0,
            type_: raw.type_,
            code: raw.code,
            value: raw.value,
        }
    }
}

fn append_event(buffer: &mut Vec<u8>, raw: RawEvent) {
    let ev = InputEvent::from(raw);
    // `#[repr(C)]` pins the layout to the kernel's, so the struct can be
    // written out as raw bytes.
    let bytes: &[u8] = unsafe {
        let ptr = &ev as *const InputEvent as *const u8;
        std::slice::from_raw_parts(ptr, mem::size_of::<InputEvent>())
    };
    buffer.extend_from_slice(bytes);
}

struct OpenDevice {
    device: DeviceId,
    source: InputSource,
    path: PathBuf,
    file: File,
    encoder: Encoder,
}

/// Writes samples straight into an evdev node such as `/dev/input/event1`.
///
/// Needs write access to the node, which on Android usually means root.
pub struct EvdevInjector {
    dev_dir: PathBuf,
    node_override: Option<PathBuf>,
    open: Option<OpenDevice>,
    pending: Vec<u8>,
}

impl EvdevInjector {
    /// Opens `<dev_dir>/event<id>` for whatever device the resolver picks.
    pub fn new(dev_dir: impl Into<PathBuf>) -> Self {
        Self {
            dev_dir: dev_dir.into(),
            node_override: None,
            open: None,
            pending: Vec::new(),
        }
    }

    /// Always writes to `node`, whatever device id is passed in.
    pub fn with_node(node: impl Into<PathBuf>) -> Self {
        let node = node.into();
        Self {
            dev_dir: node.parent().map(Path::to_path_buf).unwrap_or_default(),
            node_override: Some(node),
            open: None,
            pending: Vec::new(),
        }
    }

    fn node_path(&self, device: DeviceId) -> PathBuf {
        match &self.node_override {
            Some(node) => node.clone(),
            None => self.dev_dir.join(format!("event{}", device.0)),
        }
    }

    fn device(
        &mut self,
        device: DeviceId,
        source: InputSource,
    ) -> Result<&mut OpenDevice, InjectionError> {
        let open = match self.open.take() {
            Some(open) if open.device == device && open.source == source => open,
            stale => {
                // Queued events belong to the previous node.
                self.open = stale;
                self.flush()?;
                self.open_node(device, source)?
            }
        };
        Ok(self.open.insert(open))
    }

    fn open_node(
        &self,
        device: DeviceId,
        source: InputSource,
    ) -> Result<OpenDevice, InjectionError> {
        let encoder = Encoder::for_source(source)?;
        let path = self.node_path(device);
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| InjectionError::Open {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), encoding = ?encoder.encoding(), "opened input device");
        Ok(OpenDevice {
            device,
            source,
            path,
            file,
            encoder,
        })
    }

    /// Writes out everything queued by asynchronous injections.
    pub fn flush(&mut self) -> Result<(), InjectionError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let Some(open) = self.open.as_mut() else {
            self.pending.clear();
            return Ok(());
        };
        let result = open
            .file
            .write_all(&self.pending)
            .map_err(|source| InjectionError::Write {
                path: open.path.clone(),
                source,
            });
        self.pending.clear();
        result
    }
}

impl Injector for EvdevInjector {
    fn inject(
        &mut self,
        sample: &TouchSample,
        device: DeviceId,
        source: InputSource,
        wait: WaitPolicy,
    ) -> Result<(), InjectionError> {
        let open = self.device(device, source)?;
        let events = open.encoder.encode(sample);
        for raw in events {
            append_event(&mut self.pending, raw);
        }

        let queue = wait == WaitPolicy::Async
            && sample.action != Action::Up
            && self.pending.len() < ASYNC_FLUSH_THRESHOLD;
        if queue {
            return Ok(());
        }
        // A write to an evdev node returns once the kernel has dispatched the
        // events, which covers both waiting policies.
        self.flush()
    }

    fn finish(&mut self) -> Result<(), InjectionError> {
        self.flush()
    }
}

impl Drop for EvdevInjector {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("dropping queued input events: {e}");
        }
    }
}
