//! Terminal implementations of the navigation and notification signals.

use std::sync::{Mutex, PoisonError};

use ecom_account_client::{Navigator, Notifier, Screen, ToastDuration};

/// Tracks the screen stack a mobile shell would show and logs every move.
#[derive(Debug)]
pub struct TerminalNavigator {
    stack: Mutex<Vec<Screen>>,
}

impl TerminalNavigator {
    /// Navigator starting on the splash screen.
    pub fn new() -> Self {
        Self {
            stack: Mutex::new(vec![Screen::Splash]),
        }
    }

    /// Screen currently on top.
    pub fn current(&self) -> Screen {
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or(Screen::Splash)
    }
}

impl Default for TerminalNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for TerminalNavigator {
    fn go_to(&self, screen: Screen) {
        tracing::debug!(screen = %screen, "Navigate");
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(screen);
    }

    fn go_back(&self) {
        let mut stack = self.stack.lock().unwrap_or_else(PoisonError::into_inner);
        if stack.len() > 1 {
            stack.pop();
        }
        tracing::debug!(screen = ?stack.last(), "Back");
    }

    fn replace(&self, screen: Screen) {
        tracing::debug!(screen = %screen, "Replace");
        let mut stack = self.stack.lock().unwrap_or_else(PoisonError::into_inner);
        stack.pop();
        stack.push(screen);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, duration: ToastDuration) {
        match duration {
            ToastDuration::Short => tracing::info!("{message}"),
            ToastDuration::Long => tracing::info!(important = true, "{message}"),
        }
    }
}
