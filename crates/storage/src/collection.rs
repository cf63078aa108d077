use std::collections::HashMap;

use chrono::Local;
use serde::Serialize;

use ttlkv_common::SerializationError;

use crate::entry::Entry;
use crate::{CollectionConfig, Ttl};

/// Mapa chave → entrada. Ordem de inserção não é significativa.
pub type Snapshot<V> = HashMap<String, Entry<V>>;

/// Resultado de `get`.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, V> {
    /// Chave presente e ainda válida.
    Fresh(&'a Entry<V>),
    /// Chave presente mas expirada: resultado vazio, distinto de ausente.
    Expired,
    /// Chave ausente: devolve o default informado pelo chamador.
    Default(Option<V>),
}

impl<'a, V> Lookup<'a, V> {
    pub fn entry(&self) -> Option<&'a Entry<V>> {
        match self {
            Lookup::Fresh(entry) => Some(*entry),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(|e| &e.value)
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Lookup::Expired)
    }
}

/// Operações comuns a todas as coleções com expiração.
///
/// Implementadores só expõem o mapa e o TTL padrão; a lógica fica nos
/// métodos default. Expiração é avaliada no acesso e nunca remove a entrada.
pub trait Collection<V> {
    fn entries(&self) -> &Snapshot<V>;

    fn entries_mut(&mut self) -> &mut Snapshot<V>;

    fn default_ttl(&self) -> Ttl;

    /// Insere ou sobrescreve `key` com o TTL padrão da instância.
    fn set(&mut self, key: impl Into<String>, value: V)
    where
        Self: Sized,
    {
        let ttl = self.default_ttl();
        self.set_with_ttl(key, value, ttl);
    }

    fn set_with_ttl(&mut self, key: impl Into<String>, value: V, ttl: Ttl)
    where
        Self: Sized,
    {
        let entry = Entry::new(value, ttl.expires_from(Local::now()));
        self.entries_mut().insert(key.into(), entry);
    }

    /// Existência pura: não consulta expiração.
    fn has(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    /// `true` sse a chave existe e `now >= expires_at`. Chave vazia ou
    /// ausente nunca é considerada expirada.
    fn is_expired(&self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        self.entries()
            .get(key)
            .map(|e| e.is_expired())
            .unwrap_or(false)
    }

    fn is_fresh(&self, key: &str) -> bool {
        self.has(key) && !self.is_expired(key)
    }

    fn get(&self, key: &str, default: Option<V>) -> Lookup<'_, V> {
        match self.entries().get(key) {
            None => Lookup::Default(default),
            Some(_) if self.is_expired(key) => Lookup::Expired,
            Some(entry) => Lookup::Fresh(entry),
        }
    }

    /// Número de chaves armazenadas, expiradas ou não.
    fn count(&self) -> usize {
        self.entries().len()
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries_mut().remove(key).is_some()
    }

    fn keys<'a>(&'a self) -> impl Iterator<Item = &'a str>
    where
        V: 'a,
    {
        self.entries().keys().map(String::as_str)
    }

    fn clean(&mut self) {
        self.entries_mut().clear();
    }

    /// Serializa o mapa completo (valor + `expires`) para JSON.
    fn to_json(&self) -> Result<String, SerializationError>
    where
        V: Serialize,
    {
        Ok(serde_json::to_string(self.entries())?)
    }
}

/// Coleção em memória com expiração por entrada.
#[derive(Debug, Clone)]
pub struct ExpiringCollection<V = serde_json::Value> {
    data: Snapshot<V>,
    config: CollectionConfig,
}

impl<V> ExpiringCollection<V> {
    pub fn new() -> Self {
        Self::with_config(CollectionConfig::default())
    }

    pub fn with_config(config: CollectionConfig) -> Self {
        Self {
            data: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Substitui todo o conteúdo (usado no restore de snapshot).
    pub(crate) fn replace(&mut self, data: Snapshot<V>) {
        self.data = data;
    }
}

impl<V> Default for ExpiringCollection<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Collection<V> for ExpiringCollection<V> {
    fn entries(&self) -> &Snapshot<V> {
        &self.data
    }

    fn entries_mut(&mut self) -> &mut Snapshot<V> {
        &mut self.data
    }

    fn default_ttl(&self) -> Ttl {
        self.config.default_ttl
    }
}
