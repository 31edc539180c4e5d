use crate::domain::ports::SourceReader;
use async_trait::async_trait;
use std::path::Path;

/// File system source reader implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSourceReader;

impl FileSourceReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceReader for FileSourceReader {
    async fn read(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_file_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("A.java");
        std::fs::write(&path, "class A {}").unwrap();

        let text = FileSourceReader::new().read(&path).await.unwrap();
        assert_eq!(text, "class A {}");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = FileSourceReader::new()
            .read(&tmp.path().join("missing.java"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
