use crate::error::{DecodeError, DecodeResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

//===========================================================================//

/// A shared flag for aborting a decode in progress.
///
/// Clone the token, hand one copy to the decode call and keep the other; call
/// [`cancel`](CancelToken::cancel) from anywhere (including another thread)
/// to make the decode fail with [`DecodeError::Cancelled`] at its next entry
/// boundary.  Cancellation never yields a partial image, unlike a truncated
/// stream.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a new token in the not-cancelled state.
    pub fn new() -> CancelToken {
        CancelToken { flag: Arc::new(AtomicBool::new(false)) }
    }

    /// Raises the flag.  All clones of this token observe it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns true if [`cancel`](CancelToken::cancel) has been called on any
    /// clone of this token.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> DecodeResult<()> {
        if self.is_cancelled() {
            Err(DecodeError::Cancelled)
        } else {
            Ok(())
        }
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::CancelToken;
    use crate::error::DecodeError;

    #[test]
    fn token_starts_clear() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_cancelled());
        match clone.check() {
            Err(DecodeError::Cancelled) => {}
            result => panic!("unexpected result: {:?}", result),
        }
    }
}

//===========================================================================//
