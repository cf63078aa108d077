use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Entrada no store: valor + instante absoluto de expiração.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<V> {
    pub value: V,
    #[serde(rename = "expires", with = "expires_format")]
    pub expires_at: DateTime<Local>,
}

impl<V> Entry<V> {
    pub fn new(value: V, expires_at: DateTime<Local>) -> Self {
        Self { value, expires_at }
    }

    pub fn is_expired(&self) -> bool {
        Local::now() >= self.expires_at
    }
}

/// `expires` é gravado como `YYYY-MM-DD HH:MM:SS` em hora local.
mod expires_format {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer, de};

    use ttlkv_common::EXPIRES_FORMAT;

    pub fn serialize<S: Serializer>(at: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&at.format(EXPIRES_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(d)?;
        let naive = NaiveDateTime::parse_from_str(&raw, EXPIRES_FORMAT).map_err(de::Error::custom)?;
        // Horário inexistente (virada de horário de verão) é tratado como snapshot corrompido
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| de::Error::custom(format!("horário local inválido: {raw}")))
    }
}
