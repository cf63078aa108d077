use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};

use ttlkv_common::{ConfigError, DEFAULT_TTL_SECS, MAX_TTL_SECS};

/// Tempo de vida de uma entrada, validado e limitado a `MAX_TTL_SECS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ttl(Duration);

impl Ttl {
    pub const ZERO: Ttl = Ttl(Duration::ZERO);

    pub const fn from_secs(secs: u32) -> Self {
        Ttl(Duration::from_secs(secs as u64))
    }

    /// Aceita segundos fracionários (ex.: `0.1`). Rejeita NaN, negativos e
    /// valores acima do máximo.
    pub fn from_secs_f64(secs: f64) -> Result<Self, ConfigError> {
        let duration = Duration::try_from_secs_f64(secs)
            .map_err(|_| ConfigError::InvalidTtl(secs.to_string()))?;
        Self::try_from(duration)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Instante de expiração para uma entrada inserida em `now`.
    pub(crate) fn expires_from(&self, now: DateTime<Local>) -> DateTime<Local> {
        // Limite de MAX_TTL_SECS mantém a soma dentro do range do chrono
        let delta = TimeDelta::seconds(self.0.as_secs() as i64)
            + TimeDelta::nanoseconds(self.0.subsec_nanos() as i64);
        now + delta
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Ttl::from_secs(DEFAULT_TTL_SECS)
    }
}

impl TryFrom<Duration> for Ttl {
    type Error = ConfigError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        if duration > Duration::from_secs(MAX_TTL_SECS) {
            return Err(ConfigError::TtlTooLarge { max: MAX_TTL_SECS });
        }
        Ok(Ttl(duration))
    }
}

impl std::str::FromStr for Ttl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secs: f64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTtl(s.to_string()))?;
        Self::from_secs_f64(secs)
    }
}
