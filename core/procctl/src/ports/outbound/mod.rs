//! Outbound ポート: アプリが外界（ファイル・環境変数）を使うための trait

pub mod env_resolver;
pub mod stream_opener;

pub use env_resolver::EnvResolver;
pub use stream_opener::StreamOpener;
