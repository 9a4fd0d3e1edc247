//! Translation of touch samples into kernel input events.

use std::process;

use evdev::{AbsoluteAxisType, EventType, Key, RelativeAxisType, Synchronization};

use swipee_core::{Action, InjectionError, InputSource, TouchSample};

/// One `(type, code, value)` record as the kernel sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub const fn new(type_: u16, code: u16, value: i32) -> Self {
        Self { type_, code, value }
    }

    pub const fn syn() -> Self {
        Self::new(EventType::SYNCHRONIZATION.0, Synchronization::SYN_REPORT.0, 0)
    }

    pub const fn abs(axis: AbsoluteAxisType, value: i32) -> Self {
        Self::new(EventType::ABSOLUTE.0, axis.0, value)
    }

    pub const fn rel(axis: RelativeAxisType, value: i32) -> Self {
        Self::new(EventType::RELATIVE.0, axis.0, value)
    }

    pub fn key(key: Key, pressed: bool) -> Self {
        Self::new(EventType::KEY.0, key.code(), pressed as i32)
    }
}

/// Event vocabulary used for a class of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Multitouch protocol B on slot 0.
    MultiTouch,
    /// Single-contact absolute axes with `BTN_TOUCH`.
    Absolute,
    /// Relative motion with `BTN_LEFT`.
    Relative,
}

impl Encoding {
    pub fn for_source(source: InputSource) -> Option<Encoding> {
        match source {
            InputSource::Touchscreen | InputSource::Touchpad | InputSource::TouchNavigation => {
                Some(Encoding::MultiTouch)
            }
            InputSource::Stylus | InputSource::Joystick | InputSource::Gamepad => {
                Some(Encoding::Absolute)
            }
            InputSource::Mouse | InputSource::Trackball => Some(Encoding::Relative),
            InputSource::Keyboard | InputSource::Dpad => None,
        }
    }
}

/// Stateful encoder for the samples of one gesture.
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Encoding,
    tracking_id: i32,
    slot_selected: bool,
    last: Option<(i32, i32)>,
}

impl Encoder {
    pub fn new(encoding: Encoding, tracking_id: i32) -> Self {
        Self {
            encoding,
            tracking_id,
            slot_selected: false,
            last: None,
        }
    }

    /// Encoder for `source`, with a tracking id derived from the pid.
    pub fn for_source(source: InputSource) -> Result<Self, InjectionError> {
        let tracking_id = (process::id() & 0x7fff) as i32;
        Encoding::for_source(source)
            .map(|encoding| Self::new(encoding, tracking_id))
            .ok_or(InjectionError::UnsupportedSource(source))
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Events for one sample, terminated by `SYN_REPORT`.
    pub fn encode(&mut self, sample: &TouchSample) -> Vec<RawEvent> {
        let x = sample.position.x.round() as i32;
        let y = sample.position.y.round() as i32;
        let mut events = Vec::with_capacity(7);

        match self.encoding {
            Encoding::MultiTouch => {
                if !self.slot_selected {
                    events.push(RawEvent::abs(AbsoluteAxisType::ABS_MT_SLOT, 0));
                    self.slot_selected = true;
                }
                if sample.action == Action::Down {
                    let id = self.tracking_id;
                    events.push(RawEvent::abs(AbsoluteAxisType::ABS_MT_TRACKING_ID, id));
                }
                events.push(RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_X, x));
                events.push(RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_Y, y));
                match sample.action {
                    Action::Down => events.push(RawEvent::key(Key::BTN_TOUCH, true)),
                    Action::Up => {
                        events.push(RawEvent::abs(AbsoluteAxisType::ABS_MT_TRACKING_ID, -1));
                        events.push(RawEvent::key(Key::BTN_TOUCH, false));
                    }
                    Action::Move => {}
                }
            }
            Encoding::Absolute => {
                events.push(RawEvent::abs(AbsoluteAxisType::ABS_X, x));
                events.push(RawEvent::abs(AbsoluteAxisType::ABS_Y, y));
                match sample.action {
                    Action::Down => events.push(RawEvent::key(Key::BTN_TOUCH, true)),
                    Action::Up => events.push(RawEvent::key(Key::BTN_TOUCH, false)),
                    Action::Move => {}
                }
            }
            Encoding::Relative => {
                // The first sample only anchors the pointer.
                if let Some((last_x, last_y)) = self.last {
                    if x != last_x {
                        events.push(RawEvent::rel(RelativeAxisType::REL_X, x - last_x));
                    }
                    if y != last_y {
                        events.push(RawEvent::rel(RelativeAxisType::REL_Y, y - last_y));
                    }
                }
                match sample.action {
                    Action::Down => events.push(RawEvent::key(Key::BTN_LEFT, true)),
                    Action::Up => events.push(RawEvent::key(Key::BTN_LEFT, false)),
                    Action::Move => {}
                }
            }
        }

        self.last = Some((x, y));
        events.push(RawEvent::syn());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use swipee_core::Point;

    fn sample(action: Action, x: f32, y: f32) -> TouchSample {
        TouchSample {
            action,
            position: Point::new(x, y),
            timestamp: Duration::ZERO,
            pressure: 1.0,
        }
    }

    #[test]
    fn keyboard_and_dpad_are_unsupported() {
        for source in [InputSource::Keyboard, InputSource::Dpad] {
            assert!(matches!(
                Encoder::for_source(source),
                Err(InjectionError::UnsupportedSource(s)) if s == source
            ));
        }
    }

    #[test]
    fn multitouch_contact_lifecycle() {
        let mut encoder = Encoder::new(Encoding::MultiTouch, 7);

        assert_eq!(
            encoder.encode(&sample(Action::Down, 10.2, 20.7)),
            vec![
                RawEvent::abs(AbsoluteAxisType::ABS_MT_SLOT, 0),
                RawEvent::abs(AbsoluteAxisType::ABS_MT_TRACKING_ID, 7),
                RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_X, 10),
                RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_Y, 21),
                RawEvent::key(Key::BTN_TOUCH, true),
                RawEvent::syn(),
            ]
        );
        assert_eq!(
            encoder.encode(&sample(Action::Move, 30.0, 40.0)),
            vec![
                RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_X, 30),
                RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_Y, 40),
                RawEvent::syn(),
            ]
        );
        assert_eq!(
            encoder.encode(&sample(Action::Up, 50.0, 60.0)),
            vec![
                RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_X, 50),
                RawEvent::abs(AbsoluteAxisType::ABS_MT_POSITION_Y, 60),
                RawEvent::abs(AbsoluteAxisType::ABS_MT_TRACKING_ID, -1),
                RawEvent::key(Key::BTN_TOUCH, false),
                RawEvent::syn(),
            ]
        );
    }

    #[test]
    fn multitouch_continuation_selects_slot_without_new_contact() {
        let mut encoder = Encoder::new(Encoding::MultiTouch, 1);
        let events = encoder.encode(&sample(Action::Move, 1.0, 2.0));
        assert_eq!(events[0], RawEvent::abs(AbsoluteAxisType::ABS_MT_SLOT, 0));
        assert!(!events.iter().any(|e| e.code == AbsoluteAxisType::ABS_MT_TRACKING_ID.0));
    }

    #[test]
    fn absolute_reports_touch_state() {
        let mut encoder = Encoder::for_source(InputSource::Stylus).unwrap();
        assert_eq!(encoder.encoding(), Encoding::Absolute);
        let down = encoder.encode(&sample(Action::Down, 5.0, 6.0));
        assert_eq!(down[2], RawEvent::key(Key::BTN_TOUCH, true));
        let up = encoder.encode(&sample(Action::Up, 7.0, 8.0));
        assert_eq!(up[2], RawEvent::key(Key::BTN_TOUCH, false));
    }

    #[test]
    fn relative_emits_deltas_from_previous_sample() {
        let mut encoder = Encoder::for_source(InputSource::Mouse).unwrap();
        assert_eq!(
            encoder.encode(&sample(Action::Down, 100.0, 100.0)),
            vec![RawEvent::key(Key::BTN_LEFT, true), RawEvent::syn()]
        );
        assert_eq!(
            encoder.encode(&sample(Action::Move, 104.4, 100.0)),
            vec![RawEvent::rel(RelativeAxisType::REL_X, 4), RawEvent::syn()]
        );
        assert_eq!(
            encoder.encode(&sample(Action::Up, 101.0, 90.0)),
            vec![
                RawEvent::rel(RelativeAxisType::REL_X, -3),
                RawEvent::rel(RelativeAxisType::REL_Y, -10),
                RawEvent::key(Key::BTN_LEFT, false),
                RawEvent::syn(),
            ]
        );
    }
}
