use std::path::PathBuf;

use taudem::Resources;

/// Returns the help and icon resources, assuming that the process is running as part of a
/// distribution with the resources next to the executable.
pub fn resources() -> Resources {
    match exec_dir() {
        Some(dir) => Resources::under(&dir),
        None => {
            log::warn!("Could not locate the executable, looking for resources in \".\".");
            Resources::under(&PathBuf::from("."))
        }
    }
}

fn exec_dir() -> Option<PathBuf> {
    let exec_path = std::env::current_exe().ok()?;
    exec_path.parent().map(PathBuf::from)
}
