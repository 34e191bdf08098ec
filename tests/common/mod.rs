//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

/// A file in the system temp directory, removed on drop.
pub struct TempCsv {
    path: PathBuf,
}

impl TempCsv {
    /// `name` must be unique across the test binaries.
    pub fn new(name: &str, content: &str) -> Self {
        Self::with_extension(name, "csv", content)
    }

    pub fn with_extension(name: &str, extension: &str, content: &str) -> Self {
        let path = std::env::temp_dir().join(format!("vecalc-{}-{name}.{extension}", process::id()));
        fs::write(&path, content).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempCsv {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

pub const VOLUME_HEADER: &str = "x1,y1,z1,x2,y2,z2,x3,y3,z3,expected";
pub const CROSS_HEADER: &str = "x1,y1,z1,x2,y2,z2,ex,ey,ez";
pub const SCALAR_HEADER: &str = "x1,y1,z1,x2,y2,z2,expected";
