use std::fmt;

/// One-shot completion notifier.
///
/// The callback is an `FnOnce`, and [`CompletionTrigger::fire`] takes it out
/// of the trigger, so it can run at most once no matter how often `fire` is
/// reached.
pub struct CompletionTrigger {
    callback: Option<Box<dyn FnOnce()>>,
}

impl CompletionTrigger {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        CompletionTrigger {
            callback: Some(Box::new(callback)),
        }
    }

    /// Trigger for hosts that poll `all_ready` instead of listening.
    pub fn noop() -> Self {
        CompletionTrigger { callback: None }
    }

    /// `false` once the callback has run, and always for [`CompletionTrigger::noop`].
    pub fn is_armed(&self) -> bool {
        self.callback.is_some()
    }

    /// Runs the callback if it is still armed. Returns whether it ran.
    pub(crate) fn fire(&mut self) -> bool {
        match self.callback.take() {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for CompletionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionTrigger")
            .field("armed", &self.callback.is_some())
            .finish()
    }
}
