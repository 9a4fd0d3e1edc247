//! Host-side collaborators for `swipee`: evdev device discovery, direct
//! event-node injection, and a trace recorder for dry runs.

pub mod discover;
pub mod encoding;
pub mod trace;

#[cfg(feature = "direct_input")]
pub mod direct;

pub use discover::{Capabilities, EvdevResolver, device_id_from_node, event_number};
pub use encoding::{Encoder, Encoding, RawEvent};
pub use trace::{TraceFrame, TraceRecorder, read_trace};

#[cfg(feature = "direct_input")]
pub use direct::EvdevInjector;
