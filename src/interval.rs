use std::io::Write;

use termion::clear;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::notifier::Notifier;
use crate::timer::{CancellableTimer, ExitSignal, Sleeper, Wait};

pub const DEFAULT_WORK_MESSAGE: &str = "It's work time!";
pub const DEFAULT_BREAK_MESSAGE: &str = "It's break time!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Working,
    Break,
}

impl Phase {
    /// Name shown on the status line.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Working => "Working",
            Phase::Break => "Break",
        }
    }

    /// Title of the notification announcing this phase.
    pub fn title(self) -> &'static str {
        match self {
            Phase::Working => "Work time",
            Phase::Break => "Break time",
        }
    }

    fn next(self) -> Phase {
        match self {
            Phase::Working => Phase::Break,
            Phase::Break => Phase::Working,
        }
    }
}

/// Configured length of each phase, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub work: u32,
    pub rest: u32,
}

impl Intervals {
    pub fn minutes(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Working => self.work,
            Phase::Break => self.rest,
        }
    }
}

/// Notification bodies for each phase.
#[derive(Debug, Clone)]
pub struct Messages {
    pub work: String,
    pub rest: String,
}

impl Default for Messages {
    fn default() -> Messages {
        Messages {
            work: DEFAULT_WORK_MESSAGE.to_string(),
            rest: DEFAULT_BREAK_MESSAGE.to_string(),
        }
    }
}

impl Messages {
    pub fn body(&self, phase: Phase, minutes: u32) -> String {
        let message = match phase {
            Phase::Working => &self.work,
            Phase::Break => &self.rest,
        };
        format!("{} ({} min)", message, minutes)
    }
}

/// The active phase and the minutes left in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopState {
    phase: Phase,
    remaining: u32,
}

impl LoopState {
    pub fn new(intervals: &Intervals) -> LoopState {
        LoopState {
            phase: Phase::Working,
            remaining: intervals.work,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Counts one elapsed minute. Returns the phase just entered when the
    /// current one runs out.
    pub fn tick(&mut self, intervals: &Intervals) -> Option<Phase> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        self.phase = self.phase.next();
        self.remaining = intervals.minutes(self.phase);
        Some(self.phase)
    }
}

/// Alternates work and break phases until the exit signal fires.
pub struct IntervalLoop<N, S, E, W> {
    intervals: Intervals,
    messages: Messages,
    notifier: N,
    timer: CancellableTimer<S>,
    exit: E,
    stdout: W,
}

impl<N: Notifier, S: Sleeper, E: ExitSignal, W: Write> IntervalLoop<N, S, E, W> {
    pub fn new(
        intervals: Intervals,
        messages: Messages,
        notifier: N,
        timer: CancellableTimer<S>,
        exit: E,
        stdout: W,
    ) -> IntervalLoop<N, S, E, W> {
        IntervalLoop {
            intervals,
            messages,
            notifier,
            timer,
            exit,
            stdout,
        }
    }

    /// Runs until exit is requested and returns the state at that point.
    pub fn run(mut self) -> Result<LoopState> {
        let mut state = LoopState::new(&self.intervals);

        loop {
            self.draw_status(&state)?;

            if let Wait::Cancelled { slices } = self.timer.wait(&mut self.exit)? {
                debug!(slices, "exit requested");
                write!(
                    self.stdout,
                    "\r{}Exiting break reminder.\r\n",
                    clear::CurrentLine
                )?;
                self.stdout.flush()?;
                return Ok(state);
            }

            if let Some(phase) = state.tick(&self.intervals) {
                self.announce(phase);
            }
        }
    }

    fn draw_status(&mut self, state: &LoopState) -> Result<()> {
        let remaining = state.remaining();
        write!(
            self.stdout,
            "\r{}{}... ({} minute{} left)",
            clear::CurrentLine,
            state.phase().name(),
            remaining,
            if remaining == 1 { "" } else { "s" },
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    fn announce(&mut self, phase: Phase) {
        let minutes = self.intervals.minutes(phase);
        info!(phase = phase.name(), minutes, "phase finished, switching");

        let body = self.messages.body(phase, minutes);
        if let Err(e) = self.notifier.show(phase.title(), &body) {
            warn!(error = %e, "could not show notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::timer::tests::{CountingSleeper, ScriptedExit};
    use crate::timer::{SLICE, SLICES_PER_MINUTE};
    use std::io;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingNotifier {
        shown: Vec<(String, String)>,
    }

    impl Notifier for RecordingNotifier {
        fn show(&mut self, title: &str, body: &str) -> Result<()> {
            self.shown.push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn show(&mut self, _title: &str, _body: &str) -> Result<()> {
            Err(Error::Io(io::Error::new(io::ErrorKind::Other, "no daemon")))
        }
    }

    /// Runs a loop with one zero-length slice per minute, exiting on `exit_at`.
    fn run_ticks<N: Notifier>(
        intervals: Intervals,
        notifier: N,
        exit_at: u32,
    ) -> (LoopState, String) {
        let mut sleeper = CountingSleeper::default();
        let mut stdout = Vec::new();
        let state = IntervalLoop::new(
            intervals,
            Messages::default(),
            notifier,
            CancellableTimer::new(&mut sleeper, Duration::from_millis(0), 1),
            ScriptedExit::at(exit_at),
            &mut stdout,
        )
        .run()
        .unwrap();
        (state, String::from_utf8(stdout).unwrap())
    }

    #[test]
    fn test_starts_working() {
        let intervals = Intervals { work: 45, rest: 15 };
        let state = LoopState::new(&intervals);
        assert_eq!(state.phase(), Phase::Working);
        assert_eq!(state.remaining(), 45);
    }

    #[test]
    fn test_transition_after_exact_ticks() {
        for &(work, rest) in &[(1, 1), (1, 1440), (3, 7), (1440, 1), (45, 15)] {
            let intervals = Intervals { work, rest };
            let mut state = LoopState::new(&intervals);

            for _ in 1..work {
                assert_eq!(state.tick(&intervals), None);
            }
            assert_eq!(state.tick(&intervals), Some(Phase::Break));
            assert_eq!(state.remaining(), rest);

            for _ in 1..rest {
                assert_eq!(state.tick(&intervals), None);
            }
            assert_eq!(state.tick(&intervals), Some(Phase::Working));
            assert_eq!(state.remaining(), work);
        }
    }

    #[test]
    fn test_message_body() {
        let messages = Messages::default();
        assert_eq!(messages.body(Phase::Break, 2), "It's break time! (2 min)");
        assert_eq!(messages.body(Phase::Working, 5), "It's work time! (5 min)");
    }

    #[test]
    fn test_defaults_reach_break() {
        let mut notifier = RecordingNotifier::default();
        let (state, _) = run_ticks(Intervals { work: 45, rest: 15 }, &mut notifier, 46);

        assert_eq!(state.phase(), Phase::Break);
        assert_eq!(state.remaining(), 15);
        assert_eq!(notifier.shown.len(), 1);
        assert_eq!(notifier.shown[0].0, "Break time");
        assert!(notifier.shown[0].1.contains("15"));
    }

    #[test]
    fn test_cycles_back_to_work() {
        let mut notifier = RecordingNotifier::default();
        let (state, _) = run_ticks(Intervals { work: 5, rest: 2 }, &mut notifier, 8);

        assert_eq!(state.phase(), Phase::Working);
        assert_eq!(state.remaining(), 5);
        assert_eq!(
            notifier.shown,
            vec![
                ("Break time".to_string(), "It's break time! (2 min)".to_string()),
                ("Work time".to_string(), "It's work time! (5 min)".to_string()),
            ]
        );
    }

    #[test]
    fn test_status_line_and_farewell() {
        let intervals = Intervals { work: 2, rest: 1 };
        let (_, output) = run_ticks(intervals, RecordingNotifier::default(), 3);

        assert!(output.contains("Working... (2 minutes left)"));
        assert!(output.contains("Working... (1 minute left)"));
        assert!(output.contains("Break... (1 minute left)"));
        assert!(output.ends_with("Exiting break reminder.\r\n"));
        assert_eq!(output.matches('\n').count(), 1);
    }

    #[test]
    fn test_exit_mid_minute_skips_decrement() {
        let mut sleeper = CountingSleeper::default();
        let mut notifier = RecordingNotifier::default();
        let state = IntervalLoop::new(
            Intervals { work: 1, rest: 1 },
            Messages::default(),
            &mut notifier,
            CancellableTimer::new(&mut sleeper, SLICE, SLICES_PER_MINUTE),
            ScriptedExit::at(10),
            io::sink(),
        )
        .run()
        .unwrap();

        assert_eq!(sleeper.slept.len(), 10);
        assert_eq!(state.phase(), Phase::Working);
        assert_eq!(state.remaining(), 1);
        assert!(notifier.shown.is_empty());
    }

    #[test]
    fn test_notification_failure_keeps_cycling() {
        let (state, _) = run_ticks(Intervals { work: 1, rest: 1 }, FailingNotifier, 2);
        assert_eq!(state.phase(), Phase::Break);
        assert_eq!(state.remaining(), 1);
    }
}
