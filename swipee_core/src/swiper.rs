use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::error::InjectionError;
use crate::inject::{DeviceId, DeviceResolver, Injector, WaitPolicy};
use crate::request::GestureRequest;
use crate::sample::TouchSample;
use crate::trajectory::{DistanceMetric, Interpolation, Trajectory};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeOptions {
    pub interpolation: Interpolation,
    pub metric: DistanceMetric,
    pub wait: WaitPolicy,
    /// Pause between two consecutive samples.
    pub sample_interval: Duration,
}

/// Outcome of a gesture that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureReport {
    pub device: DeviceId,
    pub samples: usize,
}

/// Drives a [`Trajectory`] through an [`Injector`], one sample at a time.
pub struct Swiper<R, I> {
    resolver: R,
    injector: I,
    options: SwipeOptions,
}

impl<R: DeviceResolver, I: Injector> Swiper<R, I> {
    pub fn new(resolver: R, injector: I, options: SwipeOptions) -> Self {
        Self {
            resolver,
            injector,
            options,
        }
    }

    /// Injects the whole gesture, then calls [`Injector::finish`]. The first
    /// injection failure aborts it; samples already delivered are not rolled back.
    pub fn swipe(&mut self, request: &GestureRequest) -> Result<GestureReport, InjectionError> {
        let device = self.resolver.resolve_device(request.source);
        let trajectory = Trajectory::new(request, self.options.interpolation, self.options.metric);
        debug!(
            source = %request.source,
            mode = %request.mode,
            device = %device,
            distance = trajectory.distance(),
            step = request.step,
            interpolation = %self.options.interpolation,
            "starting swipe"
        );

        let started = Instant::now();
        let mut samples = 0;
        for waypoint in trajectory {
            if samples > 0 && !self.options.sample_interval.is_zero() {
                thread::sleep(self.options.sample_interval);
            }
            let sample = TouchSample::new(waypoint, started.elapsed());
            info!(source = %request.source, device = %device, "injectMotionEvent: {sample}");
            self.injector
                .inject(&sample, device, request.source, self.options.wait)
                .inspect_err(|e| {
                    error!(sample = samples, "injection failed, aborting gesture: {e}")
                })?;
            samples += 1;
        }
        self.injector
            .finish()
            .inspect_err(|e| error!("failed to deliver queued samples: {e}"))?;

        debug!(samples, elapsed_ms = started.elapsed().as_millis() as u64, "swipe finished");
        Ok(GestureReport { device, samples })
    }
}
