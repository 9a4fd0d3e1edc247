//! Seams to the host's input pipeline: device lookup and sample injection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InjectionError;
use crate::sample::TouchSample;
use crate::source::InputSource;

/// Identifier of an input device instance, e.g. `3` for `/dev/input/event3`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceId(pub u32);

impl DeviceId {
    /// Returned when no device supports the requested source.
    pub const DEFAULT: DeviceId = DeviceId(0);
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How long `inject` blocks before returning.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaitPolicy {
    /// Return as soon as the sample is queued.
    Async,
    /// Return once the sample has been accepted.
    WaitForResult,
    /// Return once the sample has been fully dispatched.
    #[default]
    WaitForFinish,
}

impl fmt::Display for WaitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WaitPolicy::Async => "async",
            WaitPolicy::WaitForResult => "wait_for_result",
            WaitPolicy::WaitForFinish => "wait_for_finish",
        })
    }
}

impl FromStr for WaitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "async" => Ok(WaitPolicy::Async),
            "wait_for_result" => Ok(WaitPolicy::WaitForResult),
            "wait_for_finish" => Ok(WaitPolicy::WaitForFinish),
            other => Err(format!("unknown wait policy: {other}")),
        }
    }
}

pub trait DeviceResolver {
    /// Finds a device able to produce `source`, or [`DeviceId::DEFAULT`].
    fn resolve_device(&self, source: InputSource) -> DeviceId;
}

pub trait Injector {
    /// Submits one sample. Blocks according to `wait`.
    fn inject(
        &mut self,
        sample: &TouchSample,
        device: DeviceId,
        source: InputSource,
        wait: WaitPolicy,
    ) -> Result<(), InjectionError>;

    /// Called once after the last sample of a gesture. Delivers anything still queued.
    fn finish(&mut self) -> Result<(), InjectionError> {
        Ok(())
    }
}

/// Resolver that always answers with the same device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedDevice(pub DeviceId);

impl DeviceResolver for FixedDevice {
    fn resolve_device(&self, _source: InputSource) -> DeviceId {
        self.0
    }
}

impl<T: DeviceResolver + ?Sized> DeviceResolver for &T {
    fn resolve_device(&self, source: InputSource) -> DeviceId {
        (**self).resolve_device(source)
    }
}

impl<T: DeviceResolver + ?Sized> DeviceResolver for Box<T> {
    fn resolve_device(&self, source: InputSource) -> DeviceId {
        (**self).resolve_device(source)
    }
}

impl<T: Injector + ?Sized> Injector for &mut T {
    fn inject(
        &mut self,
        sample: &TouchSample,
        device: DeviceId,
        source: InputSource,
        wait: WaitPolicy,
    ) -> Result<(), InjectionError> {
        (**self).inject(sample, device, source, wait)
    }

    fn finish(&mut self) -> Result<(), InjectionError> {
        (**self).finish()
    }
}

impl<T: Injector + ?Sized> Injector for Box<T> {
    fn inject(
        &mut self,
        sample: &TouchSample,
        device: DeviceId,
        source: InputSource,
        wait: WaitPolicy,
    ) -> Result<(), InjectionError> {
        (**self).inject(sample, device, source, wait)
    }

    fn finish(&mut self) -> Result<(), InjectionError> {
        (**self).finish()
    }
}
