#[macro_use]
extern crate structopt;

use std::io;
use std::io::Write;

pub mod error;
pub mod interval;
pub mod notifier;
pub mod prompt;
pub mod timer;

use crate::error::Result;
use crate::interval::{IntervalLoop, Intervals, Messages};
use crate::notifier::DesktopNotifier;
use crate::prompt::{prompt_bounded_int, MAX_MINUTES, MIN_MINUTES};
use crate::timer::{CancellableTimer, EnterKey, ThreadSleeper};

/// Default work interval in minutes.
pub const DEFAULT_WORK_MINUTES: u32 = 45;

/// Default break interval in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 15;

/// Welcome banner shown at startup.
const BANNER: &'static str = "
===============================
 - WELCOME TO BREAK REMINDER -
===============================
";

/**
 * Terminal flag settings
 */
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "break-reminder", about = "a terminal work/break interval reminder")]
/// Alternates work and break intervals and notifies you when each one ends.
/// Interval lengths are asked for interactively at startup.
pub struct BreakReminderConfig {
    #[structopt(
        short = "w",
        long = "work-message",
        raw(default_value = "interval::DEFAULT_WORK_MESSAGE")
    )]
    /// Notification text shown when a work interval starts
    work_message: String,

    #[structopt(
        short = "b",
        long = "break-message",
        raw(default_value = "interval::DEFAULT_BREAK_MESSAGE")
    )]
    /// Notification text shown when a break starts
    break_message: String,

    #[structopt(short = "n", long = "no-wait")]
    /// Don't wait for notifications to be dismissed before counting on
    no_wait: bool,
}

/// Prints the banner and asks for both interval lengths.
pub fn configure<R: io::BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Intervals> {
    write!(output, "{}\n", BANNER)?;

    write!(
        output,
        "Please set prefered length of WORK interval (in minutes) [{}]: ",
        DEFAULT_WORK_MINUTES
    )?;
    let work = prompt_bounded_int(input, output, DEFAULT_WORK_MINUTES, MIN_MINUTES, MAX_MINUTES)?;

    write!(
        output,
        "\nPlease set prefered length of BREAK interval (in minutes) [{}]: ",
        DEFAULT_BREAK_MINUTES
    )?;
    let rest = prompt_bounded_int(input, output, DEFAULT_BREAK_MINUTES, MIN_MINUTES, MAX_MINUTES)?;

    writeln!(output, "\nWork time is set to:  {} min.", work)?;
    writeln!(output, "Break time is set to: {} min.\n", rest)?;
    writeln!(output, "The break reminder is working in the background.")?;
    writeln!(output, "You will be notified when the current interval is finished.")?;
    writeln!(
        output,
        "To exit the program, press ENTER. Ensure this window is selected (active) before pressing.\n"
    )?;
    output.flush()?;

    Ok(Intervals { work, rest })
}

pub fn run(config: BreakReminderConfig) -> Result<()> {
    let intervals = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        configure(&mut stdin.lock(), &mut stdout.lock())?
    };
    tracing::info!(work = intervals.work, rest = intervals.rest, "intervals configured");

    let messages = Messages {
        work: config.work_message,
        rest: config.break_message,
    };

    let stdout = io::stdout();
    IntervalLoop::new(
        intervals,
        messages,
        DesktopNotifier::new(!config.no_wait),
        CancellableTimer::minute(ThreadSleeper),
        EnterKey::new(termion::async_stdin()),
        stdout.lock(),
    )
    .run()?;

    Ok(())
}
