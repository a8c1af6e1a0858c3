//! 配線: 標準アダプタで UseCase を組み立てる（Unix 専用）

use std::sync::Arc;

use procutil::adapter::{FileJsonLog, NoopLog, UnixExecutor, UnixHostname};
use procutil::error::Error;
use procutil::exec::Executor;
use procutil::ports::outbound::{HostnameSetter, Log, ProcessExecutor};

use crate::adapter::{StdEnvResolver, StdStreamOpener};
use crate::ports::outbound::{EnvResolver, StreamOpener};

/// 配線で組み立てたポート群（main の Command ディスパッチで利用）
pub struct App {
    pub executor: Arc<dyn ProcessExecutor>,
    pub opener: Arc<dyn StreamOpener>,
    pub hostname: Arc<dyn HostnameSetter>,
    /// 構造化ログ（ファイルへ JSONL）。エラー時のコンソール表示とは別。
    pub logger: Arc<dyn Log>,
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_procctl() -> Result<App, Error> {
    wire_with_env(&StdEnvResolver)
}

/// 環境変数の解決を差し替えて App を組み立てる
pub fn wire_with_env(env_resolver: &dyn EnvResolver) -> Result<App, Error> {
    let logger: Arc<dyn Log> = env_resolver
        .log_file_path()?
        .map(|path| Arc::new(FileJsonLog::new(path)) as Arc<dyn Log>)
        .unwrap_or_else(|| Arc::new(NoopLog));
    let executor = env_resolver
        .shell()?
        .map(|shell| Executor::with_shell(shell))
        .unwrap_or_default();
    Ok(App {
        executor: Arc::new(UnixExecutor::new(executor)),
        opener: Arc::new(StdStreamOpener),
        hostname: Arc::new(UnixHostname),
        logger,
    })
}
