//! procctl 用アダプター実装（StreamOpener / EnvResolver の標準実装）

pub(crate) mod std_env_resolver;
pub(crate) mod std_stream_opener;

pub(crate) use std_env_resolver::{StdEnvResolver, LOG_FILE_ENV};
pub(crate) use std_stream_opener::StdStreamOpener;
