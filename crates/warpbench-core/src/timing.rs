//! Monotonic stage timing.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Stage name used for the colour conversion.
pub const CONVERT_STAGE: &str = "convert_yuv420";
/// Stage name used for the perspective warp.
pub const WARP_STAGE: &str = "warp_perspective";

/// Elapsed time of one named stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTiming {
    pub name: String,
    pub duration: Duration,
}

impl StageTiming {
    /// Whole milliseconds elapsed, truncated toward zero.
    pub fn elapsed_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

/// Ordered collection of stage timings for one pipeline run.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StageTiming>,
    step_map: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timing: StageTiming) {
        *self
            .step_map
            .entry(timing.name.clone())
            .or_insert(Duration::ZERO) += timing.duration;
        self.steps.push(timing);
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Accumulated duration of every stage recorded under `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    /// First stage recorded under `name`.
    pub fn stage(&self, name: &str) -> Option<&StageTiming> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn steps(&self) -> &[StageTiming] {
        &self.steps
    }
}

/// A running stopwatch for one stage.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> StageTiming {
        StageTiming {
            duration: self.start.elapsed(),
            name: self.name,
        }
    }
}

/// Run `f` and return its result with the elapsed time.
pub fn time_stage<T>(name: impl Into<String>, f: impl FnOnce() -> T) -> (T, StageTiming) {
    let timer = Timer::start(name);
    let value = f();
    (value, timer.stop())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(name: &str, ms: u64) -> StageTiming {
        StageTiming {
            name: name.to_string(),
            duration: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_elapsed_ms_truncates() {
        let timing = StageTiming {
            name: "x".to_string(),
            duration: Duration::from_micros(2_999),
        };
        assert_eq!(timing.elapsed_ms(), 2);
    }

    #[test]
    fn test_timer_measures_sleep() {
        let timer = Timer::start("sleep");
        std::thread::sleep(Duration::from_millis(5));
        let timing = timer.stop();

        assert_eq!(timing.name, "sleep");
        assert!(timing.elapsed_ms() >= 5);
    }

    #[test]
    fn test_time_stage_returns_value() {
        let (value, timing) = time_stage(CONVERT_STAGE, || 21 * 2);
        assert_eq!(value, 42);
        assert_eq!(timing.name, CONVERT_STAGE);
    }

    #[test]
    fn test_pipeline_timings_order_and_totals() {
        let mut timings = PipelineTimings::new();
        timings.push(stage(CONVERT_STAGE, 3));
        timings.push(stage(WARP_STAGE, 7));

        let names: Vec<_> = timings.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![CONVERT_STAGE, WARP_STAGE]);
        assert_eq!(timings.total_duration(), Duration::from_millis(10));
        assert_eq!(timings.get_step(WARP_STAGE), Some(Duration::from_millis(7)));
        assert_eq!(timings.stage(CONVERT_STAGE).map(|s| s.elapsed_ms()), Some(3));
        assert!(timings.get_step("missing").is_none());
    }

    #[test]
    fn test_repeated_stage_accumulates() {
        let mut timings = PipelineTimings::new();
        timings.push(stage(WARP_STAGE, 2));
        timings.push(stage(WARP_STAGE, 4));

        assert_eq!(timings.steps().len(), 2);
        assert_eq!(timings.get_step(WARP_STAGE), Some(Duration::from_millis(6)));
        assert_eq!(timings.stage(WARP_STAGE).map(|s| s.elapsed_ms()), Some(2));
    }
}
