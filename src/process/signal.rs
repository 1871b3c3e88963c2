use libc::{signal, sighandler_t, SIGINT};

pub extern "C" fn handle_sigint(_: i32) {
    // Do nothing, let the child process handle the signal
}

/// Keeps an interactive interrupt from killing the shell while it waits on
/// a foreground child.
pub fn ignore_sigint_while_waiting() {
    unsafe {
        signal(SIGINT, handle_sigint as sighandler_t);
    }
}
