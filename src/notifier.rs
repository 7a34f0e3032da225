use notify_rust::{Notification, Timeout};

use crate::error::Result;

/// Sound played with every notification.
#[cfg(target_os = "macos")]
static SOUND: &'static str = "Ping";

#[cfg(all(unix, not(target_os = "macos")))]
static SOUND: &'static str = "alarm-clock-elapsed";

/// Shows an alert to the user at a phase boundary.
pub trait Notifier {
    fn show(&mut self, title: &str, body: &str) -> Result<()>;
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn show(&mut self, title: &str, body: &str) -> Result<()> {
        (**self).show(title, body)
    }
}

/// Native desktop notifications.
///
/// With `wait` set, `show` blocks until the notification is closed, so the
/// timer pauses while the alert is up. Only freedesktop systems report the
/// close; on macOS and Windows `show` always returns at once and `wait` has
/// no effect.
pub struct DesktopNotifier {
    #[cfg(all(unix, not(target_os = "macos")))]
    wait: bool,
}

impl DesktopNotifier {
    #[cfg(all(unix, not(target_os = "macos")))]
    pub fn new(wait: bool) -> DesktopNotifier {
        DesktopNotifier { wait }
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    pub fn new(_wait: bool) -> DesktopNotifier {
        DesktopNotifier {}
    }
}

impl Notifier for DesktopNotifier {
    fn show(&mut self, title: &str, body: &str) -> Result<()> {
        let mut notification = Notification::new();
        notification
            .summary(title)
            .body(body)
            .appname("Break Reminder")
            .icon("appointment-soon")
            .timeout(Timeout::Never);

        #[cfg(unix)]
        notification.sound_name(SOUND);

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let handle = notification.show()?;
            if self.wait {
                handle.wait_for_action(|_| ());
            }
        }

        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            notification.show()?;
        }

        Ok(())
    }
}
