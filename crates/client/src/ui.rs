//! Signals the controllers send to the front end.
//!
//! Controllers do not own navigation state or render anything. They emit
//! fire-and-forget [`Navigator`] and [`Notifier`] calls, and each front end
//! (mobile shell, terminal, test recorder) decides what those mean.

use core::fmt;

/// Screens the account flows can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Login,
    /// Verification screen, pre-filled with the code from signup.
    Verify {
        code: String,
    },
    Home,
    EditProfile,
}

impl Screen {
    /// Route name of the screen.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Splash => "Splash",
            Self::Login => "Login",
            Self::Verify { .. } => "Verify",
            Self::Home => "Home",
            Self::EditProfile => "EditProfile",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How long a notification should stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastDuration {
    #[default]
    Short,
    Long,
}

/// Navigation requests.
pub trait Navigator: Send + Sync {
    /// Push `screen` on top of the current one.
    fn go_to(&self, screen: Screen);

    /// Return to the previous screen.
    fn go_back(&self);

    /// Replace the current screen with `screen`.
    fn replace(&self, screen: Screen);
}

/// Best-effort user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, duration: ToastDuration);
}
