use anyhow::Result;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};

/// 遍历目录时在 stderr 上显示已统计的文件数和字节数
pub struct ScanProgress {
    pb: ProgressBar,
    files: u64,
    bytes: u64,
}

impl ScanProgress {
    pub fn new() -> Result<Self> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .map_err(|e| anyhow::anyhow!("invalid progress template: {}", e))?,
        );
        pb.set_message("scanning...");
        Ok(Self::with_bar(pb))
    }

    #[cfg(test)]
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(pb: ProgressBar) -> Self {
        Self { pb, files: 0, bytes: 0 }
    }

    pub fn record(&mut self, len: u64) {
        self.files += 1;
        self.bytes += len;
        // 每 64 个文件刷新一次
        if self.files % 64 == 1 {
            self.pb
                .set_message(format!("{} files, {}", self.files, HumanBytes(self.bytes)));
            self.pb.tick();
        }
    }

    pub fn files(&self) -> u64 {
        self.files
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates() {
        let mut progress = ScanProgress::hidden();
        for len in [1, 2, 3, 4] {
            progress.record(len);
        }
        assert_eq!(progress.files(), 4);
        assert_eq!(progress.bytes(), 10);
        progress.finish();
    }
}
