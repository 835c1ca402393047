use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::FsizeError;

/// 命令行上显式指定的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplicitKind {
    None,
    File,
    Directory,
}

impl fmt::Display for ExplicitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplicitKind::None => write!(f, "file or directory"),
            ExplicitKind::File => write!(f, "file"),
            ExplicitKind::Directory => write!(f, "directory"),
        }
    }
}

/// 校验后实际的条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// socket、设备、FIFO 等，按 0 字节报告。
    /// 报告中的标签是 `Other: "<path>"`，而不是 `Directory`
    Other,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
            EntryKind::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub path: PathBuf,
    pub explicit_kind: ExplicitKind,
}

impl TargetSpec {
    pub fn new(path: impl Into<PathBuf>, explicit_kind: ExplicitKind) -> Self {
        Self {
            path: path.into(),
            explicit_kind,
        }
    }

    /// 检查路径是否存在，并确认实际类型与显式指定的类型一致。
    ///
    /// 没有显式类型时根据文件系统推断。符号链接会被跟随。
    pub fn validate(&self) -> Result<EntryKind, FsizeError> {
        let actual = match probe(&self.path) {
            Some(kind) => kind,
            None => {
                return Err(FsizeError::PathNotFound {
                    path: self.path.clone(),
                })
            }
        };
        debug!("{} 的实际类型: {:?}", self.path.display(), actual);

        let matches = match self.explicit_kind {
            ExplicitKind::None => true,
            ExplicitKind::File => actual == EntryKind::File,
            ExplicitKind::Directory => actual == EntryKind::Directory,
        };

        if matches {
            Ok(actual)
        } else {
            Err(FsizeError::KindMismatch {
                path: self.path.clone(),
                expected: self.explicit_kind,
            })
        }
    }
}

fn probe(path: &Path) -> Option<EntryKind> {
    // 空路径视为不存在
    if path.as_os_str().is_empty() {
        return None;
    }

    let metadata = fs::metadata(path).ok()?;
    let file_type = metadata.file_type();
    if file_type.is_file() {
        Some(EntryKind::File)
    } else if file_type.is_dir() {
        Some(EntryKind::Directory)
    } else {
        Some(EntryKind::Other)
    }
}
