//! Process-level facts about the user running tasks.

/// True when running with root privileges.
///
/// On unix this checks the effective uid and gid; everywhere it also treats
/// `USER=root` as root, which catches `sudo -E` style environments.
pub fn is_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid/getegid have no preconditions and cannot fail.
        let (uid, gid) = unsafe { (libc::geteuid(), libc::getegid()) };
        if uid == 0 || gid == 0 {
            return true;
        }
    }

    std::env::var("USER").is_ok_and(|user| user == "root")
}
