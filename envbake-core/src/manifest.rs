//! JSON manifests describing several classes at once

use crate::decl::ClassDecl;
use crate::error::{Error, Result};
use crate::generate::generate;
use crate::loader::env_file_path;
use proc_macro2::TokenStream;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A set of independent classes to generate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub classes: Vec<ClassDecl>,
}

impl Manifest {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Generate every class; the first failing class aborts the run
    pub fn generate(&self, root: &Path) -> Result<TokenStream> {
        self.classes.iter().map(|class| generate(root, class)).collect()
    }

    /// Env files the classes read, deduplicated, in declaration order
    pub fn env_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();
        for class in &self.classes {
            let path = env_file_path(root, &class.config);
            if !files.contains(&path) {
                files.push(path);
            }
        }
        files
    }
}
