//! Packaging a finished story graph into a zip archive.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use zip::write::FileOptions;

use crate::pack::error::{PackError, Result};
use crate::pack::graph::{CoverKey, NodeKey, StoryGraph};
use crate::pack::ids::NodeId;
use crate::pack::node::{Asset, NodeKind};
use crate::pack::schema::StoryManifest;
use crate::pack::thumbnail::{self, THUMBNAIL_NAME};
use crate::pack::traverse::Traversal;

pub const ASSETS_DIR: &str = "assets";
pub const MANIFEST_NAME: &str = "story.json";
pub const DEFAULT_FORMAT: &str = "v1";
pub const DEFAULT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

impl From<Compression> for zip::CompressionMethod {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Archive entry name for a node's media: `assets/<nodeId>.<ext>`.
pub fn asset_name(id: NodeId, source: &Path) -> String {
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{ASSETS_DIR}/{id}.{ext}"),
        _ => format!("{ASSETS_DIR}/{id}"),
    }
}

/// What ended up in a written archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    pub nodes: usize,
    pub actions: usize,
    pub assets: usize,
    pub thumbnail: bool,
}

/// Root aggregate: pack metadata plus the graph hanging off its cover.
#[derive(Debug, Clone)]
pub struct Pack {
    title: String,
    description: Option<String>,
    image: Option<PathBuf>,
    format: String,
    version: u32,
    compression: Compression,
    scratch_dir: Option<PathBuf>,
    cover: Option<CoverKey>,
    graph: StoryGraph,
}

impl Pack {
    pub fn new(title: impl Into<String>, graph: StoryGraph) -> Self {
        Self {
            title: title.into(),
            description: None,
            image: None,
            format: DEFAULT_FORMAT.to_string(),
            version: DEFAULT_VERSION,
            compression: Compression::default(),
            scratch_dir: None,
            cover: None,
            graph,
        }
    }

    pub fn with_cover(mut self, cover: CoverKey) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Source image for the pack thumbnail.
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>, version: u32) -> Self {
        self.format = format.into();
        self.version = version;
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Directory under which the thumbnail working area is created.
    /// Defaults to the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Traverse from the cover and check the graph is packageable.
    fn plan(&self) -> Result<Traversal> {
        let cover = self.cover.ok_or(PackError::MissingCover)?;
        let traversal = self.graph.traverse_from_node(cover)?;

        for &key in &traversal.nodes {
            let node = self.graph.node(key);
            match node.kind() {
                NodeKind::Question => {
                    let empty = node
                        .ok_action()
                        .map_or(true, |a| self.graph.action(a).options().is_empty());
                    if empty {
                        return Err(PackError::EmptyMenu(node.name().to_string()));
                    }
                }
                NodeKind::Option if node.ok_action().is_none() => {
                    tracing::warn!(option = %node.name(), "Option leads to no story");
                }
                _ => {}
            }
        }
        Ok(traversal)
    }

    fn build_manifest(&self, traversal: &Traversal) -> StoryManifest {
        StoryManifest {
            format: self.format.clone(),
            title: self.title.clone(),
            version: self.version,
            description: self.description.clone().unwrap_or_default(),
            stage_nodes: traversal
                .nodes
                .iter()
                .map(|k| self.graph.node_schema(*k))
                .collect(),
            action_nodes: traversal
                .actions
                .iter()
                .map(|k| self.graph.action_schema(*k))
                .collect(),
        }
    }

    /// The `story.json` record as it stands, without touching asset paths.
    pub fn manifest(&self) -> Result<StoryManifest> {
        let traversal = self.plan()?;
        Ok(self.build_manifest(&traversal))
    }

    /// Write the archive to `output`.
    ///
    /// The archive is staged next to `output` and only moved into place once
    /// complete; on any error `output` is left untouched.
    pub fn write_to(mut self, output: &Path) -> Result<PackSummary> {
        let traversal = self.plan()?;

        let parent = match output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut staging = tempfile::Builder::new()
            .prefix(".storypack-")
            .suffix(".zip.part")
            .tempfile_in(&parent)?;

        let summary = self.write_entries(&traversal, staging.as_file_mut())?;

        staging.as_file().sync_all()?;
        staging
            .persist(output)
            .map_err(|e| PackError::Io(e.error))?;

        tracing::info!(
            output = %output.display(),
            nodes = summary.nodes,
            actions = summary.actions,
            assets = summary.assets,
            "Wrote story pack"
        );
        Ok(summary)
    }

    fn write_entries(&mut self, traversal: &Traversal, file: &mut File) -> Result<PackSummary> {
        let mut zip = zip::ZipWriter::new(file);
        let options = FileOptions::default().compression_method(self.compression.into());

        zip.add_directory(ASSETS_DIR, options)?;

        let thumbnail = match &self.image {
            Some(source) => {
                // Dropped on every exit path, which removes the crop.
                let mut builder = tempfile::Builder::new();
                builder.prefix("storypack");
                let workdir = match &self.scratch_dir {
                    Some(root) => builder.tempdir_in(root)?,
                    None => builder.tempdir()?,
                };
                let cropped = thumbnail::write_thumbnail(source, workdir.path())?;
                zip.start_file(THUMBNAIL_NAME, options)?;
                io::copy(&mut File::open(&cropped)?, &mut zip)?;
                true
            }
            None => false,
        };

        let mut written = HashSet::new();
        for &key in &traversal.nodes {
            self.pack_node_assets(key, &mut zip, options, &mut written)?;
        }

        let manifest = self.build_manifest(traversal);
        zip.start_file(MANIFEST_NAME, options)?;
        zip.write_all(&serde_json::to_vec(&manifest)?)?;
        zip.finish()?;

        Ok(PackSummary {
            nodes: traversal.nodes.len(),
            actions: traversal.actions.len(),
            assets: written.len(),
            thumbnail,
        })
    }

    /// Copy a node's image and audio into the archive and point the node at
    /// the new entries.
    fn pack_node_assets<W: Write + io::Seek>(
        &mut self,
        key: NodeKey,
        zip: &mut zip::ZipWriter<W>,
        options: FileOptions,
        written: &mut HashSet<String>,
    ) -> Result<()> {
        let node = self.graph.node_mut(key);
        let id = node.id();

        for slot in [&mut node.image, &mut node.audio] {
            let Some(source) = slot.as_ref().and_then(Asset::source_path) else {
                continue;
            };
            let name = asset_name(id, source);
            if written.contains(&name) {
                return Err(PackError::AssetNameClash(name));
            }
            let mut file = File::open(source).map_err(|e| PackError::AssetUnreadable {
                path: source.to_path_buf(),
                source: e,
            })?;
            zip.start_file(name.as_str(), options)?;
            io::copy(&mut file, zip)?;
            tracing::debug!(node = %id, source = %source.display(), entry = %name, "Packed asset");
            written.insert(name.clone());
            *slot = Some(Asset::Archived(name));
        }
        Ok(())
    }
}
