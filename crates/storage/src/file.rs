use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use ttlkv_common::{CacheResult, FileError};

use crate::collection::{Collection, ExpiringCollection, Snapshot};
use crate::{CollectionConfig, FsyncPolicy, Ttl};

/// Coleção com expiração que persiste snapshots em um arquivo.
///
/// O arquivo é aberto em modo append (`a+`) na construção e o handle é
/// reusado em todo `persist`. Cada chamada acrescenta um objeto JSON; o
/// arquivo vira uma sequência de snapshots, não um documento JSON único.
#[derive(Debug)]
pub struct FileCollection<V = serde_json::Value> {
    collection: ExpiringCollection<V>,
    path: PathBuf,
    file: File,
}

impl<V> FileCollection<V> {
    pub fn open(path: impl Into<PathBuf>) -> CacheResult<Self> {
        Self::open_with_config(path, CollectionConfig::default())
    }

    pub fn open_with_config(path: impl Into<PathBuf>, config: CollectionConfig) -> CacheResult<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| FileError::Open {
                path: path.clone(),
                source,
            })?;

        info!("arquivo de snapshots aberto: {:?}", path);

        Ok(Self {
            collection: ExpiringCollection::with_config(config),
            path,
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &CollectionConfig {
        self.collection.config()
    }

    /// Remove o arquivo. `false` se ele não existe; falhas do OS na remoção
    /// são só logadas e a chamada ainda retorna `true`.
    pub fn delete_file(&self) -> bool {
        if !self.path.exists() {
            return false;
        }

        match fs::remove_file(&self.path) {
            Ok(()) => info!("arquivo de snapshots removido: {:?}", self.path),
            Err(e) => warn!("falha ao remover {:?} (ignorada): {e}", self.path),
        }
        true
    }

    /// Fecha o arquivo e devolve a coleção em memória.
    pub fn into_inner(self) -> ExpiringCollection<V> {
        self.collection
    }
}

impl<V: Serialize> FileCollection<V> {
    /// Acrescenta o snapshot atual ao arquivo. Retorna os bytes escritos.
    pub fn persist(&mut self) -> CacheResult<usize> {
        let json = self.collection.to_json()?;

        // Escrita direta no handle: nada fica pendente em buffer se falhar
        self.file.write_all(json.as_bytes()).map_err(write_error)?;

        if self.config().fsync == FsyncPolicy::Always {
            self.file.sync_data().map_err(write_error)?;
        }

        if !self.path.exists() {
            // Handle ainda aponta para o arquivo removido por delete_file
            warn!("snapshot escrito em arquivo já removido: {:?}", self.path);
        }

        debug!("snapshot persistido: {} bytes, {} chaves", json.len(), self.count());
        Ok(json.len())
    }
}

impl<V: DeserializeOwned> FileCollection<V> {
    /// Substitui o conteúdo em memória pelo último snapshot válido do arquivo.
    /// Retorna o número de entradas restauradas.
    pub fn restore(&mut self) -> CacheResult<usize> {
        let Some(latest) = read_snapshots(&self.path)?.pop() else {
            return Ok(0);
        };

        let count = latest.len();
        self.collection.replace(latest);
        info!("{count} entradas restauradas de {:?}", self.path);
        Ok(count)
    }
}

impl<V> Collection<V> for FileCollection<V> {
    fn entries(&self) -> &Snapshot<V> {
        self.collection.entries()
    }

    fn entries_mut(&mut self) -> &mut Snapshot<V> {
        self.collection.entries_mut()
    }

    fn default_ttl(&self) -> Ttl {
        self.collection.default_ttl()
    }
}

fn write_error(e: std::io::Error) -> FileError {
    if e.kind() == ErrorKind::WriteZero {
        FileError::NothingWritten
    } else {
        FileError::Write(e)
    }
}

/// Lê todos os snapshots concatenados no arquivo, em ordem de escrita.
///
/// Arquivo inexistente resulta em lista vazia. Um snapshot corrompido ou
/// truncado encerra a leitura, mantendo os anteriores.
pub fn read_snapshots<V: DeserializeOwned>(path: &Path) -> CacheResult<Vec<Snapshot<V>>> {
    if !path.exists() {
        info!("arquivo de snapshots não encontrado: {:?}", path);
        return Ok(Vec::new());
    }

    let data = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut snapshots = Vec::new();
    for snapshot in serde_json::Deserializer::from_slice(&data).into_iter::<Snapshot<V>>() {
        match snapshot {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) if e.is_eof() => {
                warn!("snapshot incompleto no final do arquivo, parando leitura");
                break;
            }
            Err(e) => {
                warn!("snapshot corrompido, parando leitura: {e}");
                break;
            }
        }
    }

    debug!("{} snapshots lidos de {:?}", snapshots.len(), path);
    Ok(snapshots)
}
