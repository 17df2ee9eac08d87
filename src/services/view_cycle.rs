use parking_lot::Mutex;

use crate::models::ViewState;

/// Holds one view's visible state across fetch cycles.
///
/// `retry()` on a screen starts a new cycle without cancelling the old one;
/// in-flight reads settle naturally. The cycle id recorded at `begin` lets a
/// stale cycle's result be discarded instead of overwriting the state a newer
/// cycle owns.
#[derive(Debug)]
pub struct ViewCycle<T> {
    inner: Mutex<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
    state: ViewState<T>,
    cycle: u64,
}

impl<T: Clone> ViewCycle<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: ViewState::Loading,
                cycle: 0,
            }),
        }
    }

    pub fn state(&self) -> ViewState<T> {
        self.inner.lock().state.clone()
    }

    /// Starts a new fetch cycle: visible state resets to `Loading` and the
    /// returned id must accompany the eventual `commit`.
    pub fn begin(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.cycle += 1;
        inner.state = ViewState::Loading;
        inner.cycle
    }

    /// Publishes a settled state. Returns false (and changes nothing) when a
    /// newer cycle has started since `begin`.
    pub fn commit(&self, cycle: u64, state: ViewState<T>) -> bool {
        let mut inner = self.inner.lock();
        if inner.cycle != cycle {
            return false;
        }
        inner.state = state;
        true
    }
}

impl<T: Clone> Default for ViewCycle<T> {
    fn default() -> Self {
        Self::new()
    }
}
