//! 子プロセスに渡すファイルを開く Outbound ポート

use procutil::error::Error;
use std::fs::File;
use std::path::Path;

/// --stdin / --stdout / --stderr のパスを開く
///
/// 開いた File は execute が戻るまで呼び出し側が保持する。
pub trait StreamOpener: Send + Sync {
    /// 読み込み専用で開く
    fn open_input(&self, path: &Path) -> Result<File, Error>;
    /// 書き込みで開く（無ければ作成。append=false なら切り詰める）
    fn open_output(&self, path: &Path, append: bool) -> Result<File, Error>;
}
