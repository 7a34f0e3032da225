use std::io::{self, Read};
use std::thread;
use std::time::Duration;

/// Length of one polling slice.
pub const SLICE: Duration = Duration::from_secs(2);

/// Number of polling slices that make up one minute.
pub const SLICES_PER_MINUTE: u32 = 30;

/// Something that blocks the current thread for a while.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps on the real clock.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// A non-blocking check for a user's request to stop.
pub trait ExitSignal {
    fn exit_requested(&mut self) -> io::Result<bool>;
}

/// Watches a non-blocking reader for the Enter key.
///
/// Any other bytes are discarded.
pub struct EnterKey<R> {
    input: R,
    buf: [u8; 64],
}

impl<R: Read> EnterKey<R> {
    pub fn new(input: R) -> EnterKey<R> {
        EnterKey { input, buf: [0; 64] }
    }
}

impl<R: Read> ExitSignal for EnterKey<R> {
    fn exit_requested(&mut self) -> io::Result<bool> {
        loop {
            let read = match self.input.read(&mut self.buf) {
                Ok(0) => return Ok(false),
                Ok(n) => n,
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(false),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if self.buf[..read].iter().any(|&b| b == b'\r' || b == b'\n') {
                return Ok(true);
            }
        }
    }
}

/// Outcome of a cancellable wait.
#[derive(Debug, PartialEq, Eq)]
pub enum Wait {
    Elapsed,
    /// Exit was requested after `slices` slices had been slept.
    Cancelled { slices: u32 },
}

/// Sleeps for `slices * slice`, checking for an exit request after every
/// slice so cancellation is seen within one slice.
pub struct CancellableTimer<S> {
    sleeper: S,
    slice: Duration,
    slices: u32,
}

impl<S: Sleeper> CancellableTimer<S> {
    pub fn new(sleeper: S, slice: Duration, slices: u32) -> CancellableTimer<S> {
        CancellableTimer {
            sleeper,
            slice,
            slices,
        }
    }

    /// A timer that waits one minute in `SLICE` steps.
    pub fn minute(sleeper: S) -> CancellableTimer<S> {
        CancellableTimer::new(sleeper, SLICE, SLICES_PER_MINUTE)
    }

    pub fn wait<E: ExitSignal>(&mut self, exit: &mut E) -> io::Result<Wait> {
        for done in 1..=self.slices {
            self.sleeper.sleep(self.slice);
            if exit.exit_requested()? {
                return Ok(Wait::Cancelled { slices: done });
            }
        }
        Ok(Wait::Elapsed)
    }
}
