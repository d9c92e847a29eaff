//! SIGHUP stand-in for platforms without Unix signals.

use std::io;

/// Does nothing; there is no SIGHUP to handle.
///
/// # Errors
///
/// Never fails.
pub fn install_hangup_handler() -> io::Result<()> {
    Ok(())
}
