//! Core of `swipee`: turns a command line into a swipe and drives it through
//! an injector, one touch sample at a time.

pub mod command;
pub mod config;
pub mod error;
pub mod inject;
pub mod request;
pub mod sample;
pub mod source;
pub mod swiper;
pub mod trajectory;

pub use command::{Invocation, parse_args, usage};
pub use config::SwipeConfig;
pub use error::{ConfigError, InjectionError, ParseError};
pub use inject::{DeviceId, DeviceResolver, FixedDevice, Injector, WaitPolicy};
pub use request::{GestureRequest, SwipeMode};
pub use sample::{Action, Point, TouchSample, Waypoint};
pub use source::InputSource;
pub use swiper::{GestureReport, SwipeOptions, Swiper};
pub use trajectory::{DistanceMetric, Interpolation, Trajectory};
