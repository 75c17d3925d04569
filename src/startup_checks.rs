//! Runtime requirement validation for procfind.
//!
//! Path and cwd filters fail closed on processes whose links cannot be read,
//! so running without enough privilege shows up as security aborts. These
//! checks surface that up front.

use nix::unistd::geteuid;
use procfind::{HostProcFs, ProcFs, ProcLink};
use std::io::ErrorKind;
use tracing::{info, warn};

/// Validate all runtime requirements
pub fn validate_requirements(procfs: &HostProcFs) -> Result<(), ValidationError> {
    info!("Validating runtime requirements...");

    check_platform(procfs)?;
    check_user_privileges();
    check_link_access(procfs)?;

    info!("All runtime requirements validated");
    Ok(())
}

/// Check that the host follows the procfs convention
pub fn check_platform(procfs: &HostProcFs) -> Result<(), ValidationError> {
    if !procfs.os_supported() {
        return Err(ValidationError::UnsupportedPlatform);
    }
    if !procfs.root_exists() {
        return Err(ValidationError::ProcfsMissing(
            procfs.root().display().to_string(),
        ));
    }
    Ok(())
}

/// Check if running with sufficient privileges
fn check_user_privileges() {
    if !geteuid().is_root() {
        warn!("Not running as root - exe/cwd links of other users' processes are unreadable");
        warn!("   Path and cwd filters will abort when they reach such a process");
    } else {
        info!("Running as root (uid=0)");
    }
}

/// Check that exe links of foreign processes can be read
fn check_link_access(procfs: &HostProcFs) -> Result<(), ValidationError> {
    // pid 1 is owned by root on every normal host
    match procfs.read_link(1, ProcLink::Exe) {
        Ok(target) => {
            info!("Can read exe link of pid 1 ({})", target.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(ValidationError::InsufficientPermissions(e.to_string()))
        }
        Err(e) => {
            warn!("Could not test link access: {}", e);
            Ok(())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("OS not supported")]
    UnsupportedPlatform,

    #[error("procfs not found at {0}")]
    ProcfsMissing(String),

    #[error("Insufficient permissions to read process links: {0}")]
    InsufficientPermissions(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_fails_platform_check() {
        let dir = tempfile::tempdir().unwrap();
        let procfs = HostProcFs::new(dir.path().join("missing"));
        let err = check_platform(&procfs).unwrap_err();
        if cfg!(target_os = "linux") {
            assert!(matches!(err, ValidationError::ProcfsMissing(_)));
        } else {
            assert!(matches!(err, ValidationError::UnsupportedPlatform));
        }
    }

    #[test]
    fn test_missing_pid_one_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let procfs = HostProcFs::new(dir.path());
        assert!(check_link_access(&procfs).is_ok());
    }
}
