use std::time::{Duration, Instant};

use num_traits::Float;

/// Angular speed of the pulse, in radians per second.
pub const PULSE_SPEED: f32 = 4.;

#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: Instant,
}
impl Stopwatch {
    pub fn new(start: Instant) -> Self {
        Self { start }
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }
}

/// Red channel swinging between 0 and 1 with the rest dark.
pub fn pulse_red(elapsed: Duration) -> [f32; 3] {
    let t = elapsed.as_secs_f32();
    let red = normalize_neg_pos_1(f32::sin(t * PULSE_SPEED));
    [red, 0., 0.]
}

/// Maps `[-1, 1]` onto `[0, 1]`.
pub fn normalize_neg_pos_1<T: Float>(v: T) -> T {
    let one = T::one();
    let two = one + one;
    (v + one) / two
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_neg_pos_1(-1.), 0.);
        assert_eq!(normalize_neg_pos_1(0.), 0.5);
        assert_eq!(normalize_neg_pos_1(1_f64), 1.);
    }

    #[test]
    fn test_pulse_red() {
        assert_eq!(pulse_red(Duration::ZERO), [0.5, 0., 0.]);

        // sin peaks a quarter turn in
        let peak = Duration::from_secs_f32(PI / 2. / PULSE_SPEED);
        assert!(close(pulse_red(peak)[0], 1.));
        let trough = Duration::from_secs_f32(3. * PI / 2. / PULSE_SPEED);
        assert!(close(pulse_red(trough)[0], 0.));

        for ms in (0..5_000).step_by(37) {
            let [r, g, b] = pulse_red(Duration::from_millis(ms));
            assert!((0. ..=1.).contains(&r));
            assert_eq!((g, b), (0., 0.));
        }
    }

    #[test]
    fn test_stopwatch() {
        let start = Instant::now();
        let watch = Stopwatch::new(start);
        let later = start + Duration::from_millis(250);
        assert_eq!(watch.elapsed_at(later), Duration::from_millis(250));
        assert_eq!(watch.elapsed_at(start), Duration::ZERO);
    }
}
