use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Graph file or data directory could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No folder for the selected app under the data directory
    #[error("no graph data for app '{app}' under {}", .dir.display())]
    AppNotFound { app: String, dir: PathBuf },

    /// App folder exists but holds no capture subdirectory
    #[error("no capture folder inside {}", .0.display())]
    NoCaptureFolder(PathBuf),

    /// Capture folder holds no `*graph.txt` file
    #[error("no *graph.txt file inside {}", .0.display())]
    NoGraphFile(PathBuf),
}
