use std::path::PathBuf;

/// Erros de configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TTL inválido: {0}")]
    InvalidTtl(String),
    #[error("TTL excede o máximo de {max} segundos")]
    TtlTooLarge { max: u64 },
}

/// Erros do arquivo de snapshots.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("não foi possível abrir {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("falha ao escrever snapshot: {0}")]
    Write(#[source] std::io::Error),
    #[error("nenhum byte escrito no arquivo")]
    NothingWritten,
    #[error("não foi possível ler {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Valor armazenado não representável em JSON.
#[derive(Debug, thiserror::Error)]
#[error("falha de serialização: {0}")]
pub struct SerializationError(#[from] pub serde_json::Error);

/// Erro top-level do ttlkv.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    File(#[from] FileError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// Result type alias.
pub type CacheResult<T> = Result<T, CacheError>;

// Conversão implícita de io::Error → CacheError (via FileError::Write)
impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::File(FileError::Write(e))
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(SerializationError(e))
    }
}
