//! ホスト名 Outbound ポート

use crate::error::Error;

/// ホスト名の取得・変更の抽象
///
/// 実装は `procutil::adapter::UnixHostname`（sethostname / gethostname）など。
pub trait HostnameSetter: Send + Sync {
    fn set_hostname(&self, name: &str) -> Result<(), Error>;
    fn hostname(&self) -> Result<String, Error>;
}
