use std::path::{Path, PathBuf};

use copygen_core::GeneratedFile;

/// The deep-copy source file of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepCopyGo {
    /// Import path of the package, used as the directory below the output root
    pub package: String,
    /// File name without the `.go` extension
    pub file_base: String,
    pub content: String,
}

impl DeepCopyGo {
    pub fn new(
        package: impl Into<String>,
        file_base: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            file_base: file_base.into(),
            content: content.into(),
        }
    }

    /// Path relative to the output root (`<package>/<file_base>.go`).
    pub fn relative_path(&self) -> String {
        format!("{}/{}.go", self.package, self.file_base)
    }
}

impl GeneratedFile for DeepCopyGo {
    fn path(&self, base: &Path) -> PathBuf {
        self.package
            .split('/')
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
            .join(format!("{}.go", self.file_base))
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}
