//! Unix SIGHUP handler installation.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static INSTALLED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sighup(_signum: libc::c_int) {
    super::notify_hangup();
}

/// Installs the SIGHUP handler for the whole process.
///
/// Idempotent; later calls return `Ok` without reinstalling. Once
/// installed the handler stays for the life of the process, replacing the
/// default action of terminating it.
///
/// # Errors
///
/// Returns the OS error if `sigaction` fails.
pub fn install_hangup_handler() -> io::Result<()> {
    if INSTALLED.swap(true, Ordering::AcqRel) {
        return Ok(());
    }

    // SAFETY: the action struct is fully initialised before use and the
    // handler only performs an atomic increment.
    let result = unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handle_sighup as extern "C" fn(libc::c_int) as libc::sighandler_t;
        action.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut action.sa_mask);
        libc::sigaction(libc::SIGHUP, &raw const action, std::ptr::null_mut())
    };

    if result != 0 {
        INSTALLED.store(false, Ordering::Release);
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
