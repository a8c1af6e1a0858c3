//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use procutil::error::Error;

/// procctl を実行する Inbound ポート
///
/// main はこの trait を実装した型（Runner）の run を呼び出す。戻り値はプロセスの終了コード。
pub trait UseCaseRunner {
    fn run(&self, config: Config) -> Result<i32, Error>;
}
