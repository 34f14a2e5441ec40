//! Env file loading

use crate::error::{Error, Result};
use crate::options::ClassConfig;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Raw key/value pairs read from an env file
pub type EnvMap = BTreeMap<String, String>;

/// Absolute location of the class's env file under `root`
pub fn env_file_path(root: &Path, class: &ClassConfig) -> PathBuf {
    root.join(class.path())
}

/// Load the env file configured on `class`, relative to `root`.
///
/// A missing file is an error only when the class requires it; otherwise
/// the mapping is empty. When a key appears more than once the last
/// occurrence wins.
pub fn load_env_file(root: &Path, class: &ClassConfig) -> Result<EnvMap> {
    let path = env_file_path(root, class);

    let iter = match dotenvy::from_path_iter(&path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            if class.require_env_file() {
                return Err(Error::MissingFile { path });
            }
            debug!(path = %path.display(), "env file not found, using empty mapping");
            return Ok(EnvMap::new());
        }
        Err(source) => return Err(Error::EnvFile { path, source }),
    };

    let map = collect(iter, &path)?;
    debug!(path = %path.display(), entries = map.len(), "loaded env file");
    Ok(map)
}

/// Parse env file contents held in memory
pub fn parse_env_str(contents: &str) -> Result<EnvMap> {
    collect(dotenvy::from_read_iter(contents.as_bytes()), Path::new("<memory>"))
}

fn collect<R: Read>(iter: dotenvy::Iter<R>, path: &Path) -> Result<EnvMap> {
    let mut map = EnvMap::new();
    for item in iter {
        let (key, value) = item.map_err(|source| Error::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(key = %key, "read env entry");
        map.insert(key, value);
    }
    Ok(map)
}
