// Resolved server settings
// Built once at startup and handed to the server instead of changing the process working directory

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ServeError;

/// Everything the request handler needs to map requests onto the filesystem
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Canonical, absolute root directory
    pub root: PathBuf,
    pub addr: SocketAddr,
    pub index_files: Vec<String>,
    pub server_name: String,
    pub directory_listing: bool,
}

impl ServeConfig {
    /// Serve `root` on `addr` with default HTTP settings
    pub fn new(root: impl AsRef<Path>, addr: SocketAddr) -> Result<Self, ServeError> {
        let defaults = super::HttpConfig::default();
        Ok(Self {
            root: canonical_root(root.as_ref())?,
            addr,
            index_files: defaults.index_files,
            server_name: defaults.server_name,
            directory_listing: defaults.directory_listing,
        })
    }

    /// Resolve the loaded configuration, falling back to the executable's directory as root
    pub fn from_config(config: &Config) -> Result<Self, ServeError> {
        let root = match &config.server.root {
            Some(root) => root.clone(),
            None => executable_dir()?,
        };

        Ok(Self {
            root: canonical_root(&root)?,
            addr: config.get_socket_addr()?,
            index_files: config.http.index_files.clone(),
            server_name: config.http.server_name.clone(),
            directory_listing: config.http.directory_listing,
        })
    }
}

/// Directory containing the running executable
fn executable_dir() -> Result<PathBuf, ServeError> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| ServeError::RootDir {
        path: exe.clone(),
        source: std::io::Error::other("executable has no parent directory"),
    })
}

fn canonical_root(path: &Path) -> Result<PathBuf, ServeError> {
    let canonical = path.canonicalize().map_err(|source| ServeError::RootDir {
        path: path.to_path_buf(),
        source,
    })?;
    if !canonical.is_dir() {
        return Err(ServeError::RootDir {
            path: canonical,
            source: std::io::Error::other("not a directory"),
        });
    }
    Ok(canonical)
}
