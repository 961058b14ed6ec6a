/*!
 * Core Types
 * Common types used across the shell
 */

/// OS process ID type
pub type Pid = u32;

/// Convert a tracked pid into the form `nix` expects
#[inline]
pub fn to_nix_pid(pid: Pid) -> nix::unistd::Pid {
    nix::unistd::Pid::from_raw(pid as i32)
}
