use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Load a header from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("Failed to load fixture {}: {}", name, err))
}

/// Split a fixture into its `#pragma mark - Title` sections
pub fn sections(source: &str) -> Vec<(String, String)> {
    let mut sections: Vec<(String, String)> = Vec::new();
    for line in source.lines() {
        if let Some(title) = line.strip_prefix("#pragma mark - ") {
            sections.push((title.trim().to_string(), String::new()));
        } else if let Some((_, text)) = sections.last_mut() {
            text.push_str(line);
            text.push('\n');
        }
    }
    sections
}

/// One section of a fixture by title
pub fn section(name: &str, title: &str) -> String {
    sections(&load_fixture(name))
        .into_iter()
        .find(|(t, _)| t == title)
        .map(|(_, text)| text)
        .unwrap_or_else(|| panic!("No section {:?} in {}", title, name))
}

/// Every header of tests/fixtures/project, keyed by file name
pub fn load_project() -> Vec<(String, String)> {
    let dir = fixtures_dir().join("project");
    let mut files: Vec<(String, String)> = fs::read_dir(&dir)
        .expect("Failed to read project fixtures")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("h"))
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let source = fs::read_to_string(&path).expect("Failed to read header");
            (name, source)
        })
        .collect();
    files.sort();
    files
}
