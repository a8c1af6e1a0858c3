//! 環境変数解決 Outbound ポート
//!
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use procutil::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `crate::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// JSONL ログの出力先（PROCCTL_LOG_FILE）。未設定・空なら None
    fn log_file_path(&self) -> Result<Option<PathBuf>, Error>;

    /// run で使うシェル（PROCCTL_SHELL）。未設定・空なら None
    fn shell(&self) -> Result<Option<PathBuf>, Error>;
}
