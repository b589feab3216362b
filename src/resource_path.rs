use std::path::{Path, PathBuf};

/// Cube map face file stems in upload order (+X, -X, +Y, -Y, +Z, -Z).
pub const SKYBOX_FACES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

pub fn find_resource(relative_path: &str) -> Option<PathBuf> {
    let search_paths = [
        "",
        "../",
        "../../",
    ];

    for base in &search_paths {
        let full_path = Path::new(base).join(relative_path);
        if full_path.exists() {
            return Some(full_path);
        }
    }

    None
}

pub fn find_asset(asset_dir: &str, file_name: &str) -> Option<PathBuf> {
    let relative_path = format!("{}/{}", asset_dir.trim_end_matches('/'), file_name);
    find_resource(&relative_path)
}

pub fn find_skybox_face(skybox_dir: &str, face: &str) -> Option<PathBuf> {
    find_asset(skybox_dir, &format!("{}.jpg", face))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_resource_is_none() {
        assert!(find_resource("definitely/not/here.glb").is_none());
        assert!(find_skybox_face("no-such-dir", "px").is_none());
    }

    #[test]
    fn finds_manifest_from_crate_root() {
        assert!(find_asset(".", "Cargo.toml").is_some());
    }
}
