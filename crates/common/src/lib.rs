#![forbid(unsafe_code)]

mod error;

pub use error::*;

/// TTL padrão (em segundos) aplicado por `set` sem TTL explícito.
pub const DEFAULT_TTL_SECS: u32 = 5;
/// Maior TTL aceito.
pub const MAX_TTL_SECS: u64 = u32::MAX as u64;
/// Formato do campo `expires` no JSON (hora local, precisão de segundos).
pub const EXPIRES_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
