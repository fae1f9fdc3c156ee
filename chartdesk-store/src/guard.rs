//! Scope guards that reset store flags when an action ends
//!
//! Both guards restore their flag in `Drop`, so the reset happens on
//! success, on error, and when the action future is dropped mid-flight.

use tokio::sync::watch;

use crate::state::MarketState;

/// Holds `loading = true` for the lifetime of a chart fetch
pub struct LoadingGuard<'a> {
    state: &'a watch::Sender<MarketState>,
}

impl<'a> LoadingGuard<'a> {
    pub fn acquire(state: &'a watch::Sender<MarketState>) -> Self {
        state.send_modify(|s| s.loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

/// Zeroes upload progress on entry and on exit
pub struct UploadGuard<'a> {
    state: &'a watch::Sender<MarketState>,
}

impl<'a> UploadGuard<'a> {
    pub fn acquire(state: &'a watch::Sender<MarketState>) -> Self {
        state.send_modify(|s| s.upload_progress = 0);
        Self { state }
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.upload_progress = 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_guard_resets_on_drop() {
        let state = watch::Sender::new(MarketState::default());
        {
            let _guard = LoadingGuard::acquire(&state);
            assert!(state.borrow().loading);
        }
        assert!(!state.borrow().loading);
    }

    #[test]
    fn test_upload_guard_zeroes_progress() {
        let state = watch::Sender::new(MarketState::default());
        state.send_modify(|s| s.upload_progress = 40);
        {
            let _guard = UploadGuard::acquire(&state);
            assert_eq!(state.borrow().upload_progress, 0);
            state.send_modify(|s| s.upload_progress = 75);
        }
        assert_eq!(state.borrow().upload_progress, 0);
    }
}
