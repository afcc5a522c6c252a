//! The PID-1 echo that follows every barrier.
//!
//! When the calling process reports id 1 the first byte of the value is
//! written to the output. No real benchmark runs as PID 1, so the branch is
//! dead in practice, but the optimizer cannot prove that and must keep the
//! byte readable.

use std::io::Write;

use crate::pid::ProcessIdentity;

/// The process id that triggers the echo.
pub const SENTINEL_PID: u32 = 1;

/// Whether `identity` reports [`SENTINEL_PID`].
#[inline]
pub fn is_sentinel<P: ProcessIdentity + ?Sized>(identity: &P) -> bool {
    identity.pid() == SENTINEL_PID
}

/// Write `byte` to `out`. Write errors are dropped.
#[cold]
pub(crate) fn echo<W: Write>(byte: u8, mut out: W) {
    let _ = out.write_all(&[byte]);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl ProcessIdentity for Fixed {
        fn pid(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn only_pid_one_is_sentinel() {
        assert!(is_sentinel(&Fixed(1)));
        assert!(!is_sentinel(&Fixed(0)));
        assert!(!is_sentinel(&Fixed(2)));
        assert!(!is_sentinel(&Fixed(u32::MAX)));
    }

    #[test]
    fn echo_writes_one_byte() {
        let mut out = Vec::new();
        echo(b'A', &mut out);
        assert_eq!(out, [0x41]);
    }

    #[test]
    fn echo_ignores_write_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
        }
        echo(b'A', Broken);
    }
}
