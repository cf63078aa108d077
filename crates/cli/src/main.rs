use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use ttlkv_common::EXPIRES_FORMAT;
use ttlkv_storage::{Collection, FileCollection, Snapshot, Ttl, read_snapshots};

#[derive(Parser, Debug)]
#[command(name = "ttlkv-cli", about = "ttlkv — inspeção de arquivos de snapshots")]
struct Args {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Lista os snapshots do arquivo e quantas entradas cada um tem
    Snapshots { file: PathBuf },
    /// Mostra as entradas do último snapshot (ou do N-ésimo)
    Show {
        file: PathBuf,
        #[arg(long)]
        index: Option<usize>,
    },
    /// Restaura o último snapshot, seta a chave e persiste um novo snapshot
    Put {
        file: PathBuf,
        key: String,
        /// Valor em JSON (texto não-JSON é gravado como string)
        value: String,
        /// TTL em segundos (aceita fração)
        #[arg(long, value_parser = parse_ttl)]
        ttl: Option<Ttl>,
    },
    /// Remove o arquivo de snapshots
    Delete { file: PathBuf },
}

fn parse_ttl(s: &str) -> Result<Ttl, String> {
    s.parse::<Ttl>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttlkv_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Cmd::Snapshots { file } => {
            let snapshots = read_snapshots::<Value>(&file)?;
            println!("{} snapshot(s)", snapshots.len());
            for (i, snapshot) in snapshots.iter().enumerate() {
                println!("{i}) {} entrada(s)", snapshot.len());
            }
        }
        Cmd::Show { file, index } => {
            let mut snapshots = read_snapshots::<Value>(&file)?;
            let snapshot = match index {
                Some(i) if i < snapshots.len() => snapshots.swap_remove(i),
                Some(i) => bail!("snapshot {i} não existe ({} no arquivo)", snapshots.len()),
                None => snapshots.pop().context("arquivo sem snapshots")?,
            };
            for line in render(&snapshot) {
                println!("{line}");
            }
        }
        Cmd::Put {
            file,
            key,
            value,
            ttl,
        } => {
            let mut coll = FileCollection::open(&file)?;
            let restored = coll.restore()?;
            info!("{restored} entradas restauradas");

            let value = parse_value(&value);
            match ttl {
                Some(ttl) => coll.set_with_ttl(key, value, ttl),
                None => coll.set(key, value),
            }
            let written = coll.persist()?;
            println!("OK ({written} bytes)");
        }
        Cmd::Delete { file } => {
            let coll = FileCollection::<Value>::open(&file)?;
            if coll.delete_file() {
                println!("removido");
            } else {
                println!("(nada a remover)");
            }
        }
    }

    Ok(())
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Uma linha por entrada, ordenadas por chave.
fn render(snapshot: &Snapshot<Value>) -> Vec<String> {
    let mut keys: Vec<_> = snapshot.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| {
            let entry = &snapshot[key];
            let state = if entry.is_expired() { "expired" } else { "fresh" };
            format!(
                "{key} = {} (expires {}, {state})",
                entry.value,
                entry.expires_at.format(EXPIRES_FORMAT)
            )
        })
        .collect()
}
