use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct Inner {
    cancelled: Cell<bool>,
    callbacks: RefCell<Vec<Callback>>,
}

/// Single-threaded cancellation token.
///
/// Cancelling is best-effort: transports hook [`CancelToken::on_cancel`] to abort
/// the underlying request, but correctness of the list controller never depends
/// on it.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Rc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Повторный вызов ничего не делает
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let callbacks: Vec<Callback> = self.inner.callbacks.borrow_mut().drain(..).collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Runs `f` once on cancellation, or right away if already cancelled.
    pub fn on_cancel(&self, f: impl FnOnce() + 'static) {
        if self.is_cancelled() {
            f();
        } else {
            self.inner.callbacks.borrow_mut().push(Box::new(f));
        }
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
