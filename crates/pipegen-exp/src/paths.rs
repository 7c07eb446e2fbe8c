use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Flag marking a component trained from scratch.
pub const SCRATCH_INIT_KEY: &str = "scratch_init";
/// Component keys whose paths are redirected per experiment.
pub const PATH_KEYS: [&str; 2] = ["save_path", "load_path"];

/// Directory name reserved for experiment `index`.
pub fn artifact_dir_name(index: usize) -> String {
    format!("pipe_{index}")
}

/// Artifact directory of experiment `index` under `base`.
pub fn artifact_dir(base: &Path, index: usize) -> PathBuf {
    base.join(artifact_dir_name(index))
}

/// Redirects the artifact paths of from-scratch components into
/// `<base>/pipe_<index>/`, keeping only the original file name.
///
/// Components without `scratch_init: true` and non-string paths are left
/// untouched.
pub fn rewrite_paths(components: &mut [Map<String, Value>], base: &Path, index: usize) {
    let dir = artifact_dir(base, index);
    for component in components.iter_mut() {
        if component.get(SCRATCH_INIT_KEY) != Some(&Value::Bool(true)) {
            continue;
        }
        for key in PATH_KEYS {
            if let Some(Value::String(path)) = component.get_mut(key) {
                let file_name = path.rsplit('/').next().unwrap_or_default();
                *path = dir.join(file_name).to_string_lossy().into_owned();
            }
        }
    }
}
