use thiserror::Error;

/// Why a pointer sample was dropped. The stored raw value is untouched in
/// every case.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SampleRejected {
    #[error("sample arrived {elapsed_ms:.1}ms after the last accepted one (throttle {throttle_ms}ms)")]
    Throttled { elapsed_ms: f64, throttle_ms: f64 },
    #[error("viewport {width}x{height} cannot be normalized against")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("pointer coordinates ({x}, {y}) are not finite")]
    NonFinite { x: f32, y: f32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("options are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidFactor { name: &'static str, value: f32 },
    #[error("throttleMs must be finite and >= 0, got {0}")]
    InvalidThrottle(f64),
    #[error("sensitivity must be finite, got {0}")]
    InvalidSensitivity(f32),
    #[error("{name} must be a finite point")]
    NonFiniteTarget { name: &'static str },
}
