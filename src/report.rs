use std::io::{self, Write};
use std::path::Path;

use crate::size::SizeInfo;
use crate::target::EntryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Unit {
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
}

impl Unit {
    /// 按顺序检查各阈值，第一个满足的单位胜出。
    ///
    /// 小于 1024 字节时仍以 KB 显示（数值小于 1.00）。
    pub fn select(info: &SizeInfo) -> Unit {
        if info.total_bytes < 1024 {
            Unit::Kilobytes
        } else if info.kilobytes < 1024.0 {
            Unit::Kilobytes
        } else if info.megabytes < 1024.0 {
            Unit::Megabytes
        } else if info.gigabytes < 1024.0 {
            Unit::Gigabytes
        } else {
            Unit::Terabytes
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Kilobytes => "Kilobytes",
            Unit::Megabytes => "Megabytes",
            Unit::Gigabytes => "Gigabytes",
            Unit::Terabytes => "Terabytes",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Kilobytes => "KB",
            Unit::Megabytes => "MB",
            Unit::Gigabytes => "GB",
            Unit::Terabytes => "TB",
        }
    }

    pub fn value(&self, info: &SizeInfo) -> f64 {
        match self {
            Unit::Kilobytes => info.kilobytes,
            Unit::Megabytes => info.megabytes,
            Unit::Gigabytes => info.gigabytes,
            Unit::Terabytes => info.terabytes,
        }
    }
}

/// 例如 "2.00 KB"
pub fn format_size(info: &SizeInfo) -> String {
    let unit = Unit::select(info);
    format!("{:.2} {}", unit.value(info), unit.suffix())
}

pub fn write_report<W: Write>(
    out: &mut W,
    path: &Path,
    kind: EntryKind,
    info: &SizeInfo,
) -> io::Result<()> {
    let unit = Unit::select(info);
    writeln!(out, "{}: \"{}\"", kind.label(), path.display())?;
    writeln!(out, "Size: {}: {}", unit.name(), format_size(info))?;
    writeln!(out)?;
    Ok(())
}

pub fn print_report(path: &Path, kind: EntryKind, info: &SizeInfo) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, path, kind, info)?;
    handle.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(path: &str, kind: EntryKind, bytes: u64) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, Path::new(path), kind, &SizeInfo::from_bytes(bytes)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn two_kilobyte_file() {
        assert_eq!(format_size(&SizeInfo::from_bytes(2048)), "2.00 KB");
        assert_eq!(
            render("/tmp/a.bin", EntryKind::File, 2048),
            "File: \"/tmp/a.bin\"\nSize: Kilobytes: 2.00 KB\n\n"
        );
    }

    #[test]
    fn directory_total_in_kilobytes() {
        assert_eq!(
            render("/data", EntryKind::Directory, 102_000),
            "Directory: \"/data\"\nSize: Kilobytes: 99.61 KB\n\n"
        );
    }

    #[test]
    fn sub_kilobyte_still_shows_kilobytes() {
        assert_eq!(format_size(&SizeInfo::from_bytes(0)), "0.00 KB");
        assert_eq!(format_size(&SizeInfo::from_bytes(512)), "0.50 KB");
        assert_eq!(format_size(&SizeInfo::from_bytes(1023)), "1.00 KB");
    }

    #[test]
    fn larger_units() {
        assert_eq!(format_size(&SizeInfo::from_bytes(1024 * 1024)), "1.00 MB");
        assert_eq!(format_size(&SizeInfo::from_bytes(1536 * 1024 * 1024)), "1.50 GB");
        assert_eq!(format_size(&SizeInfo::from_bytes(1024u64.pow(4))), "1.00 TB");
        assert_eq!(format_size(&SizeInfo::from_bytes(3 * 1024u64.pow(5))), "3072.00 TB");
    }

    #[test]
    fn thresholds() {
        let cases = [
            (1023, Unit::Kilobytes),
            (1024, Unit::Kilobytes),
            (1024 * 1024 - 1, Unit::Kilobytes),
            (1024 * 1024, Unit::Megabytes),
            (1024u64.pow(3) - 1, Unit::Megabytes),
            (1024u64.pow(3), Unit::Gigabytes),
            (1024u64.pow(4), Unit::Terabytes),
        ];
        for (bytes, unit) in cases {
            assert_eq!(Unit::select(&SizeInfo::from_bytes(bytes)), unit, "bytes = {}", bytes);
        }
    }

    #[test]
    fn selection_never_moves_backwards() {
        let mut previous = Unit::Kilobytes;
        let mut bytes = 1u64;
        while bytes < u64::MAX / 3 {
            let unit = Unit::select(&SizeInfo::from_bytes(bytes));
            assert!(unit >= previous, "{:?} after {:?} at {} bytes", unit, previous, bytes);
            previous = unit;
            bytes = bytes * 3 + 1;
        }
        assert_eq!(previous, Unit::Terabytes);
    }

    #[test]
    fn other_entries_are_labelled() {
        assert_eq!(
            render("/dev/null", EntryKind::Other, 0),
            "Other: \"/dev/null\"\nSize: Kilobytes: 0.00 KB\n\n"
        );
    }
}
