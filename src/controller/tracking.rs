use micromath::F32Ext;

/// Exponential ramp streamed to the host while tracking a motor.
///
/// Sample `i` is `1 - e^(-rate * i)`, for `i` in `0..samples`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct TrackingRamp {
    rate: f32,
    next: u16,
    samples: u16,
}
impl TrackingRamp {
    /// Creates a new `TrackingRamp`, positioned at its first sample.
    ///
    /// # Parameters
    ///
    /// - `samples`: Number of samples in the ramp.
    /// - `rate`: Exponential rate of the ramp.
    pub fn new(samples: u16, rate: f32) -> Self {
        Self {
            rate,
            next: 0,
            samples,
        }
    }

    /// Returns the number of samples still to be produced.
    pub fn remaining(&self) -> u16 {
        self.samples - self.next
    }

    /// Checks if every sample has been produced.
    pub fn is_drained(&self) -> bool {
        self.next >= self.samples
    }
}
impl Iterator for TrackingRamp {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.is_drained() {
            return None;
        }
        let i = self.next as f32;
        self.next += 1;
        Some(1.0 - (-self.rate * i).exp())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ramp_length() {
        let ramp = TrackingRamp::new(500, 0.005);
        assert_eq!(500, ramp.remaining());
        assert_eq!(500, ramp.count());
    }

    #[test]
    fn test_ramp_values() {
        let samples: Vec<f32> = TrackingRamp::new(500, 0.005).collect();
        assert_eq!(0.0, samples[0]);
        for (i, sample) in samples.iter().enumerate() {
            let expected = 1.0 - (-0.005 * i as f64).exp();
            assert!((expected as f32 - sample).abs() < 1.0e-6);
        }
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_drained() {
        let mut ramp = TrackingRamp::new(2, 0.5);
        assert!(!ramp.is_drained());
        ramp.next();
        ramp.next();
        assert!(ramp.is_drained());
        assert_eq!(None, ramp.next());
        assert_eq!(0, ramp.remaining());
    }

    #[test]
    fn test_empty_ramp() {
        let mut ramp = TrackingRamp::new(0, 0.005);
        assert!(ramp.is_drained());
        assert_eq!(None, ramp.next());
    }
}
