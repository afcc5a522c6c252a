//! Process identity, the input to the sentinel check.

/// Source of the process identifier consulted after every barrier.
///
/// [`CurrentProcess`] is the real one. Tests substitute a fixed value to
/// drive the sentinel branch without being PID 1.
pub trait ProcessIdentity {
    /// The process identifier.
    fn pid(&self) -> u32;
}

impl<P: ProcessIdentity + ?Sized> ProcessIdentity for &P {
    #[inline]
    fn pid(&self) -> u32 {
        (**self).pid()
    }
}

/// The calling process, as reported by the operating system.
///
/// `std::process::id` is `getpid` on POSIX targets and
/// `GetCurrentProcessId` on Windows.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentProcess;

impl ProcessIdentity for CurrentProcess {
    #[inline]
    fn pid(&self) -> u32 {
        std::process::id()
    }
}
