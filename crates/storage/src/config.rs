use crate::Ttl;

/// Política de fsync aplicada a cada `persist`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum FsyncPolicy {
    /// Fsync após cada snapshot.
    Always,
    /// Sem fsync explícito (flush para o OS apenas).
    #[default]
    No,
}

/// Configuração por instância de uma coleção.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CollectionConfig {
    pub default_ttl: Ttl,
    pub fsync: FsyncPolicy,
}

impl CollectionConfig {
    pub fn with_default_ttl(mut self, ttl: Ttl) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_fsync(mut self, policy: FsyncPolicy) -> Self {
        self.fsync = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CollectionConfig::default();
        assert_eq!(config.default_ttl, Ttl::from_secs(5));
        assert_eq!(config.fsync, FsyncPolicy::No);
    }

    #[test]
    fn builder() {
        let config = CollectionConfig::default()
            .with_default_ttl(Ttl::from_secs(60))
            .with_fsync(FsyncPolicy::Always);
        assert_eq!(config.default_ttl, Ttl::from_secs(60));
        assert_eq!(config.fsync, FsyncPolicy::Always);
    }
}
