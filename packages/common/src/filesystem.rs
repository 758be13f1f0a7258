use crate::result::CommonResult;
use pagebuilder_document::Document;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File system abstraction for page files and testing
pub trait FileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error>;

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), std::io::Error>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }
}

/// In-memory file system for testing
pub struct MockFileSystem {
    pub files: HashMap<PathBuf, String>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn add_file(&mut self, path: PathBuf, contents: impl Into<String>) {
        self.files.insert(path, contents.into());
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string())
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Read a page file (the JSON form of a [`Document`])
pub fn load_document(fs: &dyn FileSystem, path: &Path) -> CommonResult<Document> {
    let source = fs.read_to_string(path)?;
    Ok(Document::from_json(&source)?)
}

pub fn save_document(fs: &mut dyn FileSystem, path: &Path, doc: &Document) -> CommonResult<()> {
    let json = doc.to_json_pretty()?;
    fs.write(path, &json)?;
    Ok(())
}
