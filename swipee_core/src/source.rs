use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Class of input device a gesture pretends to come from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    Keyboard,
    Dpad,
    Gamepad,
    #[default]
    Touchscreen,
    Mouse,
    Stylus,
    Trackball,
    Touchpad,
    TouchNavigation,
    Joystick,
}

impl InputSource {
    /// Every source, in the order they are listed in the usage text.
    pub const ALL: [InputSource; 10] = [
        InputSource::Keyboard,
        InputSource::Dpad,
        InputSource::Gamepad,
        InputSource::Touchscreen,
        InputSource::Mouse,
        InputSource::Stylus,
        InputSource::Trackball,
        InputSource::Touchpad,
        InputSource::TouchNavigation,
        InputSource::Joystick,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            InputSource::Keyboard => "keyboard",
            InputSource::Dpad => "dpad",
            InputSource::Gamepad => "gamepad",
            InputSource::Touchscreen => "touchscreen",
            InputSource::Mouse => "mouse",
            InputSource::Stylus => "stylus",
            InputSource::Trackball => "trackball",
            InputSource::Touchpad => "touchpad",
            InputSource::TouchNavigation => "touchnavigation",
            InputSource::Joystick => "joystick",
        }
    }

    /// Case-sensitive lookup in the source table.
    pub fn from_name(name: &str) -> Option<InputSource> {
        Self::ALL.into_iter().find(|source| source.name() == name)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown input source: {s}"))
    }
}
