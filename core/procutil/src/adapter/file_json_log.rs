//! ファイルへ JSONL で追記する Log 実装
//!
//! ログの出力先はファイルのみ。エラー時のコンソール表示（stderr）とは別。

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io_msg(format!("Failed to create '{}': {}", parent.display(), e))
                })?;
            }
        }
        let mut w = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                Error::io_msg(format!("Failed to open '{}': {}", self.path.display(), e))
            })?;
        let mut line = serde_json::to_string(record).map_err(|e| Error::Json(e.to_string()))?;
        line.push('\n');
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// 何も出力しない Log 実装（ログファイル未指定時・テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}
