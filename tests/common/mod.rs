#![allow(dead_code)]

use agent_chorus::config::Paths;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn temp_home() -> (TempDir, Paths) {
    let dir = TempDir::new().unwrap();
    let paths = Paths::at(dir.path());
    (dir, paths)
}

/// Writes a current-schema pack with one empty audio file per listed sound.
pub fn write_current_pack(packs_dir: &Path, name: &str, categories: &[(&str, &[&str])]) {
    let root = packs_dir.join(name);
    let mut cats = serde_json::Map::new();
    for (category, files) in categories {
        let sounds: Vec<_> = files
            .iter()
            .map(|file| {
                touch(&root.join(file));
                serde_json::json!({ "file": file, "label": format!("line for {file}") })
            })
            .collect();
        cats.insert(category.to_string(), serde_json::json!({ "sounds": sounds }));
    }
    let manifest = serde_json::json!({ "name": name, "categories": cats });
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("pack.json"), manifest.to_string()).unwrap();
}

/// Writes a legacy-schema pack; files live under `sounds/`.
pub fn write_legacy_pack(packs_dir: &Path, name: &str, categories: &[(&str, &[&str])]) {
    let root = packs_dir.join(name);
    let mut cats = serde_json::Map::new();
    for (category, files) in categories {
        let sounds: Vec<_> = files
            .iter()
            .map(|file| {
                touch(&root.join("sounds").join(file));
                serde_json::json!({ "file": file, "line": format!("line for sounds/{file}") })
            })
            .collect();
        cats.insert(category.to_string(), serde_json::json!({ "sounds": sounds }));
    }
    let manifest = serde_json::json!({ "name": name, "categories": cats });
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("manifest.json"), manifest.to_string()).unwrap();
}

pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"RIFF").unwrap();
}
