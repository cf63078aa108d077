#![forbid(unsafe_code)]

mod collection;
mod config;
mod entry;
pub mod file;
mod ttl;

pub use collection::{Collection, ExpiringCollection, Lookup, Snapshot};
pub use config::{CollectionConfig, FsyncPolicy};
pub use entry::Entry;
pub use file::{FileCollection, read_snapshots};
pub use ttl::Ttl;
