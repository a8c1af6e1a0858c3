//! ホスト名の変更
//!
//! sethostname(2) をそのまま呼ぶ。長さや DNS 的な妥当性は検査しない。
//! 失敗（多くは権限不足）は必ずエラーとして返す。

use std::io;

use crate::error::{Error, Result};

/// ホスト名を変更する
///
/// EPERM / EACCES は [`Error::PermissionDenied`]、それ以外の失敗は [`Error::Os`]。
pub fn set_hostname(name: &str) -> Result<()> {
    let bytes = name.as_bytes();
    let ret = unsafe { libc::sethostname(bytes.as_ptr() as *const libc::c_char, bytes.len() as _) };
    if ret < 0 {
        return Err(classify(io::Error::last_os_error()));
    }
    Ok(())
}

/// 現在のホスト名を返す
pub fn hostname() -> Result<String> {
    // HOST_NAME_MAX は Linux で 64。余裕を持たせて 256 バイト確保する
    let mut buf = [0u8; 256];
    let ret = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if ret < 0 {
        return Err(Error::last_os_error("gethostname"));
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    Ok(String::from_utf8_lossy(&buf[..len]).into_owned())
}

fn classify(err: io::Error) -> Error {
    match err.raw_os_error() {
        Some(libc::EPERM) | Some(libc::EACCES) => Error::PermissionDenied {
            call: "sethostname",
            source: err,
        },
        _ => Error::os("sethostname", err),
    }
}
