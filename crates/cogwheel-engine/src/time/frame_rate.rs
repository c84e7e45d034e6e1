use std::time::{Duration, Instant};

/// Frames counted over one benchmark interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameRateReport {
    pub frames: u32,
    pub interval: Duration,
}

impl FrameRateReport {
    pub fn fps(&self) -> f32 {
        self.frames as f32 / self.interval.as_secs_f32()
    }
}

impl std::fmt::Display for FrameRateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames in {} seconds: {:.6} fps",
            self.frames,
            self.interval.as_secs(),
            self.fps()
        )
    }
}

/// Counts presented frames and yields a report once per interval.
///
/// The window opens at the first recorded frame after a report and closes at
/// the first frame strictly later than `interval` after it.
#[derive(Debug, Clone)]
pub struct FrameRateMeter {
    interval: Duration,
    window_start: Option<Instant>,
    frames: u32,
}

impl FrameRateMeter {
    /// A zero interval is raised to one second.
    pub fn new(interval: Duration) -> Self {
        let interval = if interval.is_zero() { Duration::from_secs(1) } else { interval };
        Self { interval, window_start: None, frames: 0 }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records one frame presented at `now`.
    pub fn record(&mut self, now: Instant) -> Option<FrameRateReport> {
        let start = *self.window_start.get_or_insert(now);

        let mut report = None;
        if now.saturating_duration_since(start) > self.interval {
            report = Some(FrameRateReport { frames: self.frames, interval: self.interval });
            self.window_start = Some(now);
            self.frames = 0;
        }

        self.frames += 1;
        report
    }
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn run(meter: &mut FrameRateMeter, t0: Instant, fps: u64, secs: u64) -> Vec<FrameRateReport> {
        let step = Duration::from_nanos(1_000_000_000 / fps);
        (0..fps * secs)
            .filter_map(|i| meter.record(t0 + step * i as u32))
            .collect()
    }

    #[test]
    fn reports_once_per_interval() {
        let mut meter = FrameRateMeter::new(Duration::from_secs(5));
        let reports = run(&mut meter, Instant::now(), 60, 16);
        assert_eq!(reports.len(), 3);
        for r in &reports {
            assert!((300..=302).contains(&r.frames), "{r:?}");
            assert_relative_eq!(r.fps(), r.frames as f32 / 5.0);
        }
    }

    #[test]
    fn no_report_before_interval_elapses() {
        let mut meter = FrameRateMeter::new(Duration::from_secs(5));
        let t0 = Instant::now();
        assert!(meter.record(t0).is_none());
        assert!(meter.record(t0 + Duration::from_secs(5)).is_none());
        let r = meter.record(t0 + Duration::from_millis(5001)).unwrap();
        assert_eq!(r.frames, 2);
    }

    #[test]
    fn report_line_format() {
        let r = FrameRateReport { frames: 300, interval: Duration::from_secs(5) };
        assert_eq!(r.to_string(), "300 frames in 5 seconds: 60.000000 fps");
    }

    #[test]
    fn zero_interval_is_raised() {
        assert_eq!(FrameRateMeter::new(Duration::ZERO).interval(), Duration::from_secs(1));
    }
}
