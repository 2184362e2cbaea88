pub mod collections;
pub mod db;
pub mod io;

pub use collections::{CollectionKind, CollectionStore};
pub use db::DexDb;
pub use io::{ensure_runtime_dir, get_runtime_path};
