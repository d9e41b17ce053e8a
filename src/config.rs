/// Runtime configuration of a [crate::Controller].
///
/// The defaults reproduce the behaviour expected by the host software.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Config {
    /// Number of bytes discarded after power-up before frame assembly
    /// begins. The serial link delivers a few bytes of line noise on
    /// startup.
    pub noise_bytes: u8,
    /// Initial value of every variable register.
    pub initial_var: f32,
    /// Number of samples in a tracking ramp.
    pub tracking_samples: u16,
    /// Rate of the exponential tracking ramp `1 - e^(-rate * i)`.
    pub tracking_rate: f32,
    /// How tracking samples are emitted.
    pub tracking_emission: TrackingEmission,
}
impl Config {
    pub const NOISE_BYTES: u8 = 3;
    pub const INITIAL_VAR: f32 = 1.0;
    pub const TRACKING_SAMPLES: u16 = 500;
    pub const TRACKING_RATE: f32 = 0.005;
    pub const TRACKING_PER_TICK: u16 = 8;

    /// Returns the configuration with no startup noise to discard.
    ///
    /// Useful when the link is known to be clean, eg. on a host.
    pub fn without_noise(self) -> Self {
        Self {
            noise_bytes: 0,
            ..self
        }
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            noise_bytes: Self::NOISE_BYTES,
            initial_var: Self::INITIAL_VAR,
            tracking_samples: Self::TRACKING_SAMPLES,
            tracking_rate: Self::TRACKING_RATE,
            tracking_emission: TrackingEmission::Background {
                per_tick: Self::TRACKING_PER_TICK,
            },
        }
    }
}

/// Strategy used to emit the samples of a tracking ramp.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TrackingEmission {
    /// Emit the whole ramp synchronously while handling the motor-value
    /// order.
    ///
    /// NOTE: This blocks order processing for the full duration of the
    ///       ramp, which exceeds the real-time budget of the poll loop.
    Inline,
    /// Queue the ramp and emit `per_tick` samples on each poll tick.
    Background { per_tick: u16 },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(3, config.noise_bytes);
        assert_eq!(1.0, config.initial_var);
        assert_eq!(500, config.tracking_samples);
        assert_eq!(
            TrackingEmission::Background { per_tick: 8 },
            config.tracking_emission
        );
    }

    #[test]
    fn test_without_noise() {
        let config = Config::default().without_noise();
        assert_eq!(0, config.noise_bytes);
        assert_eq!(500, config.tracking_samples);
    }
}
