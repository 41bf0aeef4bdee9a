//! Static, process-wide configuration.
//!
//! Every field has a default so an empty (or missing) TOML file yields the
//! reference setup: 20Hz loop, 0.6m/s & 0.6rad/s caps and the square-ish course.
//!
//! ```
//! use vel_scheduler::config::{Config, PlanEndPolicy};
//!
//! let config = Config::from_toml_str(
//!     r#"
//!     plan_end = "repeat"
//!
//!     [limits]
//!     v_max = 0.4
//!
//!     [[segments]]
//!     distance = 1.5
//!     rotation = 0.0
//!     "#,
//! )
//! .expect("valid config");
//! assert_eq!(config.plan_end, PlanEndPolicy::Repeat);
//! assert_eq!(config.limits.v_max, 0.4);
//! assert_eq!(config.segments.len(), 1);
//! ```

use serde::Deserialize;
use std::{
    f64::consts::FRAC_PI_2,
    fs::read_to_string,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::Path,
    time::Duration,
};
use thiserror::Error;

pub const DEFAULT_CONTROL_PERIOD_MS: u64 = 50;
pub const DEFAULT_LARGE_DT_THRESHOLD: f64 = 0.15;
pub const DEFAULT_DT_FALLBACK: f64 = 0.1;

const DEFAULT_INBOUND_PORT: u16 = 10500;
const DEFAULT_COMMAND_PORT: u16 = 10501;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read the config file: {0}")]
    FileLoadError(#[from] std::io::Error),

    #[error("cannot parse the config file: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// dynamic envelope of the robot, never mutated at runtime
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct KinematicLimits {
    /// m/s
    pub v_max: f64,
    /// m/s, below this the robot won't move. Carried but not applied to commands.
    pub v_min: f64,
    /// m/s²
    pub a_max: f64,
    /// rad/s
    pub omega_max: f64,
    /// rad/s²
    pub alpha_max: f64,
}

impl Default for KinematicLimits {
    fn default() -> Self {
        Self {
            v_max: 0.6,
            v_min: 0.1,
            a_max: 0.3,
            omega_max: 0.6,
            alpha_max: 0.3,
        }
    }
}

/// "translate this far, with this much relative rotation"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpec {
    /// m, never negative
    pub distance: f64,
    /// rad, signed relative turn
    #[serde(default)]
    pub rotation: f64,
}

impl SegmentSpec {
    pub fn new(distance: f64, rotation: f64) -> Self {
        Self { distance, rotation }
    }

    pub fn translation(distance: f64) -> Self {
        Self::new(distance, 0.)
    }

    pub fn rotation(rotation: f64) -> Self {
        Self::new(0., rotation)
    }
}

/// what the sequencer does once the last segment completes
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanEndPolicy {
    /// stop and hold zero commands
    #[default]
    Halt,
    /// start over from the first segment
    Repeat,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct OdometryConfig {
    /// s, gaps between samples above this are considered anomalies
    pub large_dt_threshold: f64,
    /// s, dt used instead of an anomalous gap
    pub dt_fallback: f64,
}

impl Default for OdometryConfig {
    fn default() -> Self {
        Self {
            large_dt_threshold: DEFAULT_LARGE_DT_THRESHOLD,
            dt_fallback: DEFAULT_DT_FALLBACK,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct NetConfig {
    /// where odometry and safety signals are received
    pub inbound_addr: SocketAddr,
    /// where twist commands are sent
    pub command_addr: SocketAddr,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            inbound_addr: SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_INBOUND_PORT).into(),
            command_addr: SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_COMMAND_PORT).into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub limits: KinematicLimits,
    pub control_period_ms: u64,
    pub odometry: OdometryConfig,
    pub plan_end: PlanEndPolicy,
    pub segments: Vec<SegmentSpec>,
    pub net: NetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: KinematicLimits::default(),
            control_period_ms: DEFAULT_CONTROL_PERIOD_MS,
            odometry: OdometryConfig::default(),
            plan_end: PlanEndPolicy::default(),
            segments: default_segments(),
            net: NetConfig::default(),
        }
    }
}

/// 2m, quarter turn, 1m, quarter turn, 2m, quarter turn
pub fn default_segments() -> Vec<SegmentSpec> {
    vec![
        SegmentSpec::translation(2.0),
        SegmentSpec::rotation(FRAC_PI_2),
        SegmentSpec::translation(1.0),
        SegmentSpec::rotation(FRAC_PI_2),
        SegmentSpec::translation(2.0),
        SegmentSpec::rotation(FRAC_PI_2),
    ]
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn control_period(&self) -> Duration {
        Duration::from_millis(self.control_period_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("v_max", self.limits.v_max),
            ("v_min", self.limits.v_min),
            ("a_max", self.limits.a_max),
            ("omega_max", self.limits.omega_max),
            ("alpha_max", self.limits.alpha_max),
        ];
        for (name, value) in limits {
            if !value.is_finite() || value <= 0. {
                return Err(ConfigError::Invalid(format!(
                    "limit {name} must be positive, got {value}"
                )));
            }
        }
        if self.limits.v_min > self.limits.v_max {
            return Err(ConfigError::Invalid(format!(
                "v_min ({}) is above v_max ({})",
                self.limits.v_min, self.limits.v_max
            )));
        }

        if self.control_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "control_period_ms must be non zero".to_string(),
            ));
        }

        let odometry = [self.odometry.dt_fallback, self.odometry.large_dt_threshold];
        if odometry.iter().any(|v| !v.is_finite() || *v <= 0.) {
            return Err(ConfigError::Invalid(
                "odometry dt_fallback and large_dt_threshold must be positive".to_string(),
            ));
        }

        if self.segments.is_empty() {
            return Err(ConfigError::Invalid("plan has no segments".to_string()));
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if !segment.distance.is_finite() || segment.distance < 0. {
                return Err(ConfigError::Invalid(format!(
                    "segment {i} has a negative or non finite distance ({})",
                    segment.distance
                )));
            }
            if !segment.rotation.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "segment {i} has a non finite rotation"
                )));
            }
        }

        Ok(())
    }
}
