//! # IO Utilities
//!
//! File system helpers for the `.pokedex` runtime directory, which holds
//! `config.json` and `pokedex.db`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const RUNTIME_DIR: &str = ".pokedex";
pub const RUNTIME_PATH_ENV: &str = "POKEDEX_RUNTIME_PATH";

/// Get the runtime directory path (.pokedex)
pub fn get_runtime_path() -> PathBuf {
    if let Ok(path) = std::env::var(RUNTIME_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(RUNTIME_DIR)
}

/// Ensure the runtime directory exists
pub async fn ensure_runtime_dir() -> Result<PathBuf> {
    let path = get_runtime_path();
    fs::create_dir_all(&path)
        .await
        .with_context(|| format!("Failed to create runtime directory: {:?}", path))?;
    Ok(path)
}

/// Read a file, `None` when it does not exist
pub async fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read file: {:?}", path)),
    }
}

/// Write a file, creating parent directories as needed
pub async fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_runtime_path() {
        if std::env::var(RUNTIME_PATH_ENV).is_err() {
            assert!(get_runtime_path().ends_with(RUNTIME_DIR));
        }
    }

    #[tokio::test]
    async fn test_file_operations() {
        let dir = std::env::temp_dir().join(format!("pokedex-io-{}", std::process::id()));
        let path = dir.join("nested").join("note.txt");

        assert!(read_optional(&path).await.unwrap().is_none());

        write_file(&path, "¡Hola, Pokédex!").await.unwrap();
        assert_eq!(
            read_optional(&path).await.unwrap().as_deref(),
            Some("¡Hola, Pokédex!")
        );

        let _ = fs::remove_dir_all(&dir).await;
    }
}
