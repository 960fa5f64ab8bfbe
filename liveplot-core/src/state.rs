use crate::error::AppletError;

/// X/Y length reconciliation.
///
/// Producers update X and Y in separate notifications, so one transient
/// mismatch is expected. The first mismatch skips the redraw and arms the
/// pending state; a second consecutive mismatch is an error, a match clears
/// the pending state. `Synced` never errors directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Synced,
    PendingSizeCheck,
}

impl SyncState {
    /// Returns `Ok(true)` when the cycle may redraw, `Ok(false)` when it
    /// should skip silently. The state is left at `PendingSizeCheck` on
    /// error so continued inconsistency keeps erroring and a later match
    /// still recovers.
    pub fn reconcile(&mut self, x_len: usize, y_len: usize) -> Result<bool, AppletError> {
        if x_len == y_len {
            *self = SyncState::Synced;
            return Ok(true);
        }
        match *self {
            SyncState::Synced => {
                *self = SyncState::PendingSizeCheck;
                Ok(false)
            }
            SyncState::PendingSizeCheck => Err(AppletError::SizeMismatch { x_len, y_len }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_lengths_stay_synced() {
        let mut state = SyncState::default();
        assert!(state.reconcile(3, 3).unwrap());
        assert_eq!(state, SyncState::Synced);
    }

    #[test]
    fn first_mismatch_goes_pending_second_errors() {
        let mut state = SyncState::default();
        assert!(!state.reconcile(3, 4).unwrap());
        assert_eq!(state, SyncState::PendingSizeCheck);

        let err = state.reconcile(3, 4).unwrap_err();
        match err {
            AppletError::SizeMismatch { x_len, y_len } => {
                assert_eq!((x_len, y_len), (3, 4));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Still recoverable afterwards.
        assert!(state.reconcile(4, 4).unwrap());
        assert_eq!(state, SyncState::Synced);
    }

    #[test]
    fn mismatch_then_match_recovers() {
        let mut state = SyncState::default();
        assert!(!state.reconcile(2, 5).unwrap());
        assert!(state.reconcile(5, 5).unwrap());
        assert_eq!(state, SyncState::Synced);
    }
}
