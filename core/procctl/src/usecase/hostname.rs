//! Hostname コマンドのユースケース

use crate::wiring::App;
use procutil::error::Error;
use procutil::ports::outbound::{HostnameSetter, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// Hostname コマンドのユースケース
pub struct HostnameUseCase {
    setter: Arc<dyn HostnameSetter>,
    logger: Arc<dyn Log>,
}

impl HostnameUseCase {
    pub fn new(setter: Arc<dyn HostnameSetter>, logger: Arc<dyn Log>) -> Self {
        Self { setter, logger }
    }

    /// App から HostnameUseCase を作成する
    pub fn from_app(app: &App) -> Self {
        Self::new(Arc::clone(&app.hostname), Arc::clone(&app.logger))
    }

    /// name があれば変更し、変更後（なければ現在）のホスト名を返す
    pub fn run(&self, name: Option<&str>) -> Result<String, Error> {
        let Some(name) = name else {
            return self.setter.hostname();
        };

        if let Err(e) = self.setter.set_hostname(name) {
            let _ = self.logger.log(
                &LogRecord::new(LogLevel::Error, "hostname change failed")
                    .layer("usecase")
                    .kind("hostname")
                    .field("hostname", name)
                    .field("error", e.to_string()),
            );
            return Err(e);
        }

        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "hostname changed")
                .layer("usecase")
                .kind("hostname")
                .field("hostname", name),
        );
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procutil::adapter::NoopLog;
    use std::io;
    use std::sync::Mutex;

    /// メモリ上でホスト名を保持するモック。deny=true なら EPERM を返す
    struct MemoryHostname {
        name: Mutex<String>,
        deny: bool,
    }

    impl MemoryHostname {
        fn new(name: &str, deny: bool) -> Self {
            Self {
                name: Mutex::new(name.to_string()),
                deny,
            }
        }
    }

    impl HostnameSetter for MemoryHostname {
        fn set_hostname(&self, name: &str) -> Result<(), Error> {
            if self.deny {
                return Err(Error::PermissionDenied {
                    call: "sethostname",
                    source: io::Error::from_raw_os_error(libc::EPERM),
                });
            }
            *self.name.lock().unwrap() = name.to_string();
            Ok(())
        }

        fn hostname(&self) -> Result<String, Error> {
            Ok(self.name.lock().unwrap().clone())
        }
    }

    #[test]
    fn test_without_name_prints_current() {
        let setter = Arc::new(MemoryHostname::new("box", false));
        let usecase = HostnameUseCase::new(setter, Arc::new(NoopLog));
        assert_eq!(usecase.run(None).unwrap(), "box");
    }

    #[test]
    fn test_set_hostname() {
        let setter = Arc::new(MemoryHostname::new("box", false));
        let usecase = HostnameUseCase::new(
            Arc::clone(&setter) as Arc<dyn HostnameSetter>,
            Arc::new(NoopLog),
        );
        assert_eq!(usecase.run(Some("foo.jp")).unwrap(), "foo.jp");
        assert_eq!(setter.hostname().unwrap(), "foo.jp");
    }

    #[test]
    fn test_permission_error_is_propagated() {
        let setter = Arc::new(MemoryHostname::new("box", true));
        let usecase = HostnameUseCase::new(
            Arc::clone(&setter) as Arc<dyn HostnameSetter>,
            Arc::new(NoopLog),
        );
        let err = usecase.run(Some("foo.jp")).unwrap_err();
        assert!(err.is_permission_denied());
        assert_eq!(err.exit_code(), 77);
        assert_eq!(setter.hostname().unwrap(), "box");
    }
}
