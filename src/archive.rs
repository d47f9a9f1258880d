//! Archive job planning and zip assembly.
//!
//! Entry names are fixed when a job is planned, before any bytes move:
//! `image_<n>.<ext>` within one collection, `<collection>_image_<n>.<ext>`
//! when aggregating across collections, `n` 1-based in listing order. The
//! numeric suffix guarantees uniqueness even when collections share file
//! names, and the name -> content mapping is independent of fetch
//! completion order.

use std::io::{Cursor, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{GalleryError, Result};

/// Extension used when a source path carries none.
const FALLBACK_EXT: &str = "jpg";

/// One planned archive entry: a fixed name paired with its source URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name inside the archive, unique within the job.
    pub name: String,
    /// Server-relative source path (`/images/<collection>/<file>`).
    pub source: String,
}

/// Extension of a listed source path, `jpg` when absent.
pub fn source_extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or(FALLBACK_EXT)
}

/// Plan entries for a single collection: `image_<n>.<ext>`.
pub fn plan_collection(paths: &[String]) -> Vec<ArchiveEntry> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| ArchiveEntry {
            name: format!("image_{}.{}", i + 1, source_extension(path)),
            source: path.clone(),
        })
        .collect()
}

/// Plan entries across collections: `<collection>_image_<n>.<ext>`,
/// the index restarting for each collection.
pub fn plan_aggregate(listings: &[(String, Vec<String>)]) -> Vec<ArchiveEntry> {
    listings
        .iter()
        .flat_map(|(collection, paths)| {
            paths.iter().enumerate().map(move |(i, path)| ArchiveEntry {
                name: format!("{collection}_image_{}.{}", i + 1, source_extension(path)),
                source: path.clone(),
            })
        })
        .collect()
}

/// Serialize named payloads into a single in-memory zip blob.
pub fn build_zip(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, bytes) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| GalleryError::Archive(format!("cannot add '{name}': {e}")))?;
        writer
            .write_all(bytes)
            .map_err(|e| GalleryError::Archive(format!("cannot write '{name}': {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| GalleryError::Archive(format!("cannot finalize archive: {e}")))?;
    let blob = cursor.into_inner();
    debug!(entries = entries.len(), size = blob.len(), "archive assembled");
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::io::Read;
    use zip::ZipArchive;

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn read_entries(blob: &[u8]) -> HashMap<String, Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(blob.to_vec())).unwrap();
        let mut out = HashMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes).unwrap();
            out.insert(file.name().to_string(), bytes);
        }
        out
    }

    #[test]
    fn test_collection_plan_names() {
        let plan = plan_collection(&paths(&["/images/Ichika/a.jpg", "/images/Ichika/b.png"]));
        assert_eq!(plan[0].name, "image_1.jpg");
        assert_eq!(plan[0].source, "/images/Ichika/a.jpg");
        assert_eq!(plan[1].name, "image_2.png");
    }

    #[test]
    fn test_aggregate_plan_restarts_index_per_collection() {
        let listings = vec![
            ("A".to_string(), paths(&["/images/A/x.jpg"])),
            ("B".to_string(), paths(&["/images/B/y.jpg", "/images/B/z.jpg"])),
        ];
        let plan = plan_aggregate(&listings);
        let names: Vec<_> = plan.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A_image_1.jpg", "B_image_1.jpg", "B_image_2.jpg"]);
    }

    #[test]
    fn test_names_unique_with_identical_file_names() {
        // Two collections holding identically named files must not collide.
        let listings = vec![
            ("A".to_string(), paths(&["/images/A/cover.jpg", "/images/A/cover.jpg"])),
            ("B".to_string(), paths(&["/images/B/cover.jpg"])),
        ];
        let plan = plan_aggregate(&listings);
        let unique: HashSet<_> = plan.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(unique.len(), plan.len());
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(source_extension("/images/A/photo.png"), "png");
        assert_eq!(source_extension("/images/A/noext"), "jpg");
    }

    #[test]
    fn test_zip_round_trip() {
        let entries = vec![
            ("image_1.jpg".to_string(), b"first".to_vec()),
            ("image_2.jpg".to_string(), b"second".to_vec()),
        ];
        let blob = build_zip(&entries).unwrap();

        let read = read_entries(&blob);
        assert_eq!(read.len(), 2);
        assert_eq!(read["image_1.jpg"], b"first");
        assert_eq!(read["image_2.jpg"], b"second");
    }

    #[test]
    fn test_mapping_survives_insertion_order() {
        // Assembly order is irrelevant: the same name/payload pairs produce
        // the same mapping whichever order they are written in.
        let forward = vec![
            ("image_1.jpg".to_string(), b"aa".to_vec()),
            ("image_2.jpg".to_string(), b"bb".to_vec()),
        ];
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        assert_eq!(
            read_entries(&build_zip(&forward).unwrap()),
            read_entries(&build_zip(&reversed).unwrap())
        );
    }
}
