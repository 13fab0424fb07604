//! Media and archive fixtures
//!
//! Provides a temporary directory populated with fake audio files and a
//! real PNG, plus helpers to read a written archive back.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use storypack::StoryManifest;
use tempfile::TempDir;

/// A temporary directory holding pack media
///
/// Cleaned up when dropped.
pub struct MediaDir {
    _dir: TempDir,
    pub path: PathBuf,
}

impl MediaDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().to_path_buf();
        Self { _dir: dir, path }
    }

    /// Write a fake audio file whose bytes are its own name
    pub fn audio(&self, name: &str) -> PathBuf {
        let path = self.path.join(name);
        std::fs::write(&path, name.as_bytes()).expect("Failed to write audio fixture");
        path
    }

    /// Write a solid-colour PNG of the given size
    pub fn image(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path.join(name);
        RgbaImage::from_pixel(width, height, Rgba([30, 60, 90, 255]))
            .save(&path)
            .expect("Failed to write image fixture");
        path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// An archive opened for inspection
pub struct OpenedPack {
    archive: zip::ZipArchive<File>,
}

impl OpenedPack {
    pub fn open(path: &Path) -> Self {
        let file = File::open(path).expect("Failed to open archive");
        let archive = zip::ZipArchive::new(file).expect("Not a zip archive");
        Self { archive }
    }

    pub fn entry_names(&self) -> BTreeSet<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Entry names in the order they were written
    pub fn entry_order(&mut self) -> Vec<String> {
        (0..self.archive.len())
            .map(|i| {
                self.archive
                    .by_index(i)
                    .expect("Failed to read entry")
                    .name()
                    .to_string()
            })
            .collect()
    }

    pub fn read(&mut self, name: &str) -> Vec<u8> {
        let mut entry = self
            .archive
            .by_name(name)
            .unwrap_or_else(|_| panic!("missing archive entry {name}"));
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).expect("Failed to read entry");
        buf
    }

    pub fn manifest(&mut self) -> StoryManifest {
        serde_json::from_slice(&self.read("story.json")).expect("Invalid story.json")
    }
}
