use std::path::PathBuf;
use thiserror::Error;

use crate::target::ExplicitKind;

/// fsize 的所有错误类型，均为终止性错误（退出码 1）
#[derive(Debug, Error)]
pub enum FsizeError {
    #[error("at least one argument is required")]
    NoArguments,

    #[error("expected a value after {flag}")]
    MissingArgument { flag: String },

    #[error("the path \"{}\" does not exist", path.display())]
    PathNotFound { path: PathBuf },

    #[error("the path \"{}\" is not a {expected}", path.display())]
    KindMismatch {
        path: PathBuf,
        expected: ExplicitKind,
    },

    #[error("failed to read \"{}\"", path.display())]
    TraversalFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 其他命令行错误，直接使用 clap 的提示信息
    #[error(transparent)]
    Usage(clap::Error),
}

impl FsizeError {
    pub fn traversal(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsizeError::TraversalFailure {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = FsizeError::PathNotFound {
            path: PathBuf::from("/no/such/thing"),
        };
        assert_eq!(err.to_string(), "the path \"/no/such/thing\" does not exist");

        let err = FsizeError::KindMismatch {
            path: PathBuf::from("/tmp"),
            expected: ExplicitKind::File,
        };
        assert_eq!(err.to_string(), "the path \"/tmp\" is not a file");
    }

    #[test]
    fn traversal_failure_keeps_io_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = FsizeError::traversal("/root/secret", io);
        assert_eq!(err.source().map(|s| s.to_string()), Some("denied".to_string()));
    }
}
