//! Fixed-interval progress driver
//!
//! Demo collaborator: the widget has no timing of its own, so something has
//! to feed it progress. Each tick writes the next value to the layer and
//! advances by a fixed step; once the value passes the limit the animation is
//! ended. The host clock is abstracted behind `Ticker`.

use std::time::Duration;

use crate::consts::{DRIVER_INTERVAL_MS, DRIVER_LIMIT, DRIVER_STEP};
use crate::layer::SandglassLayer;
use crate::settings::Settings;

/// Host clock: waits between ticks
pub trait Ticker {
    fn wait(&mut self, interval: Duration);
}

/// Blocks the current thread for each interval
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepTicker;

impl Ticker for SleepTicker {
    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// Accumulates virtual time without waiting (tests, headless export)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTicker {
    pub elapsed: Duration,
    pub waits: u64,
}

impl Ticker for ManualTicker {
    fn wait(&mut self, interval: Duration) {
        self.elapsed += interval;
        self.waits += 1;
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Running,
    Finished,
}

/// Feeds a linearly increasing progress value to a layer
#[derive(Debug, Clone)]
pub struct ProgressDriver {
    step: f32,
    interval: Duration,
    limit: f32,
    /// Ticks since `begin`; the value is `tick * step` to avoid drift
    tick: u32,
    running: bool,
}

impl Default for ProgressDriver {
    fn default() -> Self {
        Self::new(DRIVER_STEP, Duration::from_millis(DRIVER_INTERVAL_MS))
    }
}

impl ProgressDriver {
    pub fn new(step: f32, interval: Duration) -> Self {
        Self {
            step,
            interval,
            limit: DRIVER_LIMIT,
            tick: 0,
            running: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.driver_step, settings.driver_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Value the next tick will write
    pub fn value(&self) -> f32 {
        self.tick as f32 * self.step
    }

    /// Reset to an empty top bulb and start the falling sand
    pub fn begin(&mut self, layer: &mut SandglassLayer) {
        self.tick = 0;
        self.running = true;
        layer.set_progress(0.0);
        layer.begin_animate();
    }

    /// Write the next value, or end the animation once past the limit
    pub fn tick(&mut self, layer: &mut SandglassLayer) -> DriverStatus {
        if !self.running {
            return DriverStatus::Finished;
        }
        let value = self.value();
        if value > self.limit {
            layer.end_animate();
            self.running = false;
            log::info!("Driver finished after {} ticks", self.tick);
            return DriverStatus::Finished;
        }
        layer.set_progress(value);
        self.tick += 1;
        DriverStatus::Running
    }

    /// Run to completion, calling `on_frame` after every tick
    ///
    /// Returns the number of ticks that wrote a value.
    pub fn run<T, F>(&mut self, layer: &mut SandglassLayer, ticker: &mut T, mut on_frame: F) -> u32
    where
        T: Ticker + ?Sized,
        F: FnMut(&SandglassLayer),
    {
        self.begin(layer);
        loop {
            let status = self.tick(layer);
            on_frame(layer);
            if status == DriverStatus::Finished {
                break;
            }
            ticker.wait(self.interval);
        }
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn sample_layer() -> SandglassLayer {
        SandglassLayer::new(Rect::from_size(100.0, 106.0))
    }

    #[test]
    fn test_run_to_completion() {
        let mut layer = sample_layer();
        let mut driver = ProgressDriver::default();
        let mut ticker = ManualTicker::default();
        let mut frames = 0;
        let mut last_progress = -1.0;
        let mut monotonic = true;

        let ticks = driver.run(&mut layer, &mut ticker, |l| {
            frames += 1;
            monotonic &= l.progress() >= last_progress;
            last_progress = l.progress();
        });

        // 0.00, 0.01, ... 1.10 are written, then the driver stops
        assert!((110..=112).contains(&ticks), "ticks {}", ticks);
        assert_eq!(frames, ticks + 1);
        assert_eq!(ticker.waits, ticks as u64);
        assert!(monotonic);
        assert_eq!(layer.progress(), 1.0);
        assert!(!layer.is_animating());
        assert_eq!(layer.emitter().birth_rate, 0.0);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_animating_while_running() {
        let mut layer = sample_layer();
        let mut driver = ProgressDriver::default();
        driver.begin(&mut layer);
        assert!(layer.is_animating());
        assert_eq!(driver.tick(&mut layer), DriverStatus::Running);
        assert_eq!(driver.tick(&mut layer), DriverStatus::Running);
        assert!((layer.progress() - 0.01).abs() < 1e-6);
        assert!(layer.is_animating());
    }

    #[test]
    fn test_tick_before_begin_is_finished() {
        let mut layer = sample_layer();
        let mut driver = ProgressDriver::default();
        assert_eq!(driver.tick(&mut layer), DriverStatus::Finished);
        assert_eq!(layer.progress(), 0.0);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut layer = sample_layer();
        let mut driver = ProgressDriver::new(0.5, Duration::from_millis(1));
        driver.run(&mut layer, &mut ManualTicker::default(), |_| {});
        assert_eq!(layer.progress(), 1.0);
        driver.begin(&mut layer);
        assert_eq!(layer.progress(), 0.0);
        assert!(layer.is_animating());
    }
}
