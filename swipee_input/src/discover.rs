// Finds an event node able to act as a given input source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use evdev::{AbsoluteAxisType, AttributeSet, Device, Key, PropType, RelativeAxisType};
use tracing::{debug, warn};

use swipee_core::{DeviceId, DeviceResolver, InputSource};

/// What one event node reports it can produce.
#[derive(Debug)]
pub struct Capabilities {
    pub keys: AttributeSet<Key>,
    pub relative: AttributeSet<RelativeAxisType>,
    pub absolute: AttributeSet<AbsoluteAxisType>,
    pub properties: AttributeSet<PropType>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            keys: AttributeSet::new(),
            relative: AttributeSet::new(),
            absolute: AttributeSet::new(),
            properties: AttributeSet::new(),
        }
    }
}

impl Capabilities {
    pub fn of(device: &Device) -> Self {
        Self {
            keys: device
                .supported_keys()
                .map(|keys| keys.iter().collect())
                .unwrap_or_else(AttributeSet::new),
            relative: device
                .supported_relative_axes()
                .map(|axes| axes.iter().collect())
                .unwrap_or_else(AttributeSet::new),
            absolute: device
                .supported_absolute_axes()
                .map(|axes| axes.iter().collect())
                .unwrap_or_else(AttributeSet::new),
            properties: device.properties().iter().collect(),
        }
    }

    /// Whether a device with these capabilities can act as `source`.
    pub fn supports(&self, source: InputSource) -> bool {
        let has_keys = |keys: &[Key]| keys.iter().all(|&k| self.keys.contains(k));
        let has_abs = |abs: &[AbsoluteAxisType]| abs.iter().all(|&a| self.absolute.contains(a));
        let has_rel = |rel: &[RelativeAxisType]| rel.iter().all(|&r| self.relative.contains(r));

        let multitouch = has_abs(&[
            AbsoluteAxisType::ABS_MT_POSITION_X,
            AbsoluteAxisType::ABS_MT_POSITION_Y,
        ]);
        let direct = self.properties.contains(PropType::DIRECT);
        let pointer = self.properties.contains(PropType::POINTER);
        let planar = has_abs(&[AbsoluteAxisType::ABS_X, AbsoluteAxisType::ABS_Y]);
        let relative = has_rel(&[RelativeAxisType::REL_X, RelativeAxisType::REL_Y]);

        match source {
            InputSource::Touchscreen => multitouch && direct,
            InputSource::Touchpad => multitouch && pointer && !direct,
            InputSource::TouchNavigation => multitouch,
            InputSource::Stylus => has_keys(&[Key::BTN_TOOL_PEN]) && planar,
            InputSource::Mouse => relative && has_keys(&[Key::BTN_LEFT]),
            InputSource::Trackball => relative,
            InputSource::Joystick => {
                has_keys(&[Key::BTN_TRIGGER]) && has_abs(&[AbsoluteAxisType::ABS_X])
            }
            InputSource::Gamepad => has_keys(&[Key::BTN_SOUTH]),
            InputSource::Dpad => {
                has_keys(&[Key::KEY_UP, Key::KEY_DOWN, Key::KEY_LEFT, Key::KEY_RIGHT])
            }
            InputSource::Keyboard => has_keys(&[Key::KEY_Q, Key::KEY_A]),
        }
    }
}

/// Parses the numeric suffix of an `eventN` name.
pub fn event_number(name: &str) -> Option<u32> {
    name.strip_prefix("event")?.parse().ok()
}

/// Device id of an event node path such as `/dev/input/event3`.
pub fn device_id_from_node(path: &Path) -> Option<DeviceId> {
    path.file_name()?.to_str().and_then(event_number).map(DeviceId)
}

/// Scans `eventN` nodes in ascending order and picks the first capable one.
#[derive(Debug, Clone)]
pub struct EvdevResolver {
    dev_dir: PathBuf,
}

impl EvdevResolver {
    pub fn new(dev_dir: impl Into<PathBuf>) -> Self {
        Self {
            dev_dir: dev_dir.into(),
        }
    }

    /// Event node numbers present in the directory, ascending.
    pub fn devices(&self) -> io::Result<Vec<u32>> {
        let mut ids: Vec<u32> = fs::read_dir(&self.dev_dir)?
            .flatten()
            .filter_map(|entry| entry.file_name().to_str().and_then(event_number))
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

impl DeviceResolver for EvdevResolver {
    fn resolve_device(&self, source: InputSource) -> DeviceId {
        let ids = match self.devices() {
            Ok(ids) => ids,
            Err(e) => {
                warn!("cannot list {}: {e}", self.dev_dir.display());
                return DeviceId::DEFAULT;
            }
        };

        for id in ids {
            let device = DeviceId(id);
            let path = self.dev_dir.join(format!("event{id}"));
            match Device::open(&path) {
                Ok(dev) if Capabilities::of(&dev).supports(source) => {
                    let name = dev.name().unwrap_or("unknown");
                    debug!(%source, %device, name, "resolved input device");
                    return device;
                }
                Ok(_) => {}
                Err(e) => debug!(path = %path.display(), "skipping device: {e}"),
            }
        }

        warn!(%source, "no capable device, falling back to {}", DeviceId::DEFAULT);
        DeviceId::DEFAULT
    }
}
