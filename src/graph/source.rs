use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};

use crate::graph::error::GraphError;

// ============================================================================
// Graph data on disk
// ============================================================================
//
// Layout:
//
//   <data_dir>/<App_Name>/<capture>/<anything>graph.txt
//
// App folders replace spaces with underscores. When several captures or graph
// files exist, the first in sorted name order wins.

const GRAPH_FILE_SUFFIX: &str = "graph.txt";

/// Folder name for an app as shown to users ("Wikimedia Commons" -> "Wikimedia_Commons").
pub fn app_folder_name(app_name: &str) -> String {
    app_name.replace(' ', "_")
}

/// Find the graph file recorded for `app_name` under `data_dir`.
pub fn locate_graph_file(data_dir: &Path, app_name: &str) -> Result<PathBuf, GraphError> {
    let app_dir = data_dir.join(app_folder_name(app_name));
    if !app_dir.is_dir() {
        return Err(GraphError::AppNotFound {
            app: app_name.to_string(),
            dir: data_dir.to_path_buf(),
        });
    }

    let capture_dir = sorted_entries(&app_dir)?
        .into_iter()
        .find(|p| p.is_dir())
        .ok_or_else(|| GraphError::NoCaptureFolder(app_dir.clone()))?;

    sorted_entries(&capture_dir)?
        .into_iter()
        .find(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(GRAPH_FILE_SUFFIX))
        })
        .ok_or(GraphError::NoGraphFile(capture_dir))
}

pub fn read_graph(path: &Path) -> Result<String, GraphError> {
    std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// SHA-1 of the graph text, hex encoded. Ties a report back to the exact
/// graph it was grounded on.
pub fn fingerprint(raw: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, GraphError> {
    let io_err = |source| GraphError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        paths.push(entry.map_err(io_err)?.path());
    }
    paths.sort();
    Ok(paths)
}
