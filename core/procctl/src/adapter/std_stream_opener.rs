//! 標準ファイルオープン実装（std::fs::OpenOptions を委譲）

use crate::ports::outbound::StreamOpener;
use procutil::error::Error;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// 標準ライブラリの OpenOptions を使う StreamOpener 実装
#[derive(Debug, Clone, Default)]
pub struct StdStreamOpener;

impl StreamOpener for StdStreamOpener {
    fn open_input(&self, path: &Path) -> Result<File, Error> {
        File::open(path).map_err(|e| {
            Error::io_msg(format!("Failed to open '{}' for reading: {}", path.display(), e))
        })
    }

    fn open_output(&self, path: &Path, append: bool) -> Result<File, Error> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.open(path).map_err(|e| {
            Error::io_msg(format!("Failed to open '{}' for writing: {}", path.display(), e))
        })
    }
}
