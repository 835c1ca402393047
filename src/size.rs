use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::FsizeError;
use crate::target::EntryKind;

const UNIT: f64 = 1024.0;

/// 一次调用计算出的大小，派生单位均由 total_bytes 逐级除以 1024 得到
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeInfo {
    pub total_bytes: u64,
    pub kilobytes: f64,
    pub megabytes: f64,
    pub gigabytes: f64,
    pub terabytes: f64,
}

impl SizeInfo {
    pub fn from_bytes(total_bytes: u64) -> Self {
        let kilobytes = total_bytes as f64 / UNIT;
        let megabytes = kilobytes / UNIT;
        let gigabytes = megabytes / UNIT;
        let terabytes = gigabytes / UNIT;

        Self {
            total_bytes,
            kilobytes,
            megabytes,
            gigabytes,
            terabytes,
        }
    }
}

/// 计算已校验路径的大小
pub fn calculate(path: &Path, kind: EntryKind) -> Result<SizeInfo, FsizeError> {
    calculate_with(path, kind, |_| {})
}

/// 同 [`calculate`]，每统计一个普通文件就把它的字节数交给 `on_file`
pub fn calculate_with<F>(path: &Path, kind: EntryKind, on_file: F) -> Result<SizeInfo, FsizeError>
where
    F: FnMut(u64),
{
    let total = match kind {
        EntryKind::File => {
            let metadata = fs::metadata(path).map_err(|e| FsizeError::traversal(path, e))?;
            metadata.len()
        }
        EntryKind::Directory => calculate_directory_size(path, on_file)?,
        EntryKind::Other => 0,
    };

    Ok(SizeInfo::from_bytes(total))
}

fn calculate_directory_size<F>(dir_path: &Path, mut on_file: F) -> Result<u64, FsizeError>
where
    F: FnMut(u64),
{
    let mut total_size: u64 = 0;
    let mut file_count: u64 = 0;

    for entry in WalkDir::new(dir_path) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir_path).to_path_buf();
            FsizeError::traversal(path, e.into())
        })?;

        // 不跟随符号链接，只统计普通文件
        if !entry.file_type().is_file() {
            continue;
        }

        let len = entry
            .metadata()
            .map_err(|e| {
                let path = entry.path().to_path_buf();
                FsizeError::traversal(path, e.into())
            })?
            .len();

        total_size += len;
        file_count += 1;
        on_file(len);
    }

    debug!(
        "{}: {} 个文件, 共 {} 字节",
        dir_path.display(),
        file_count,
        total_size
    );
    Ok(total_size)
}
