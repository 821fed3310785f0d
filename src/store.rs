//! The secret store: a single in-memory HOTP key slot.
//!
//! The [`HotpKey`] aggregate owns the provisioned secret and its moving
//! counter. It is mutated through exactly two operations, `provision` and
//! `advance_counter`; nothing else in the crate holds a mutable reference to
//! it, so in the single-threaded controller no locking is needed.
//!
//! There is no persistence: the key lives for the process lifetime and
//! starts out empty.

use log::debug;

use crate::error::{Error, Result};

/// Capacity of the key slot, in bytes.
pub const MAX_SECRET_BYTES: usize = 64;

/// The one HOTP key slot: secret bytes, their valid length, and the counter
/// used as the moving factor.
///
/// A length of zero means "unconfigured".
pub struct HotpKey {
    secret: [u8; MAX_SECRET_BYTES],
    len: usize,
    counter: u64,
}

impl HotpKey {
    /// An empty, unconfigured slot.
    pub const fn new() -> Self {
        Self {
            secret: [0; MAX_SECRET_BYTES],
            len: 0,
            counter: 0,
        }
    }

    /// Stores already-decoded secret bytes and resets the counter to zero.
    ///
    /// Rejects secrets longer than [`MAX_SECRET_BYTES`] with
    /// [`Error::SecretTooLong`], in which case the previous secret and
    /// counter are left untouched. On success the previous secret and
    /// counter are discarded irrecoverably.
    ///
    /// A zero-length secret is accepted and leaves the slot unconfigured.
    pub fn provision(&mut self, raw: &[u8]) -> Result<()> {
        if raw.len() > MAX_SECRET_BYTES {
            return Err(Error::SecretTooLong(raw.len()));
        }
        self.secret = [0; MAX_SECRET_BYTES];
        self.secret[..raw.len()].copy_from_slice(raw);
        self.len = raw.len();
        self.counter = 0;
        debug!("programmed {} byte secret, counter reset", self.len);
        Ok(())
    }

    /// True iff a secret has been provisioned.
    pub fn is_configured(&self) -> bool {
        self.len > 0
    }

    /// Borrowed view of the valid secret bytes.
    pub fn secret(&self) -> &[u8] {
        &self.secret[..self.len]
    }

    /// The counter value the next code will be derived from.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Increments the counter. Called exactly once per successfully emitted
    /// code.
    ///
    /// Known limitation: behavior on wrap of the 64-bit counter is
    /// unspecified. Exhausting a `u64` one button press at a time is not a
    /// practical concern, so no wrap handling is attempted.
    pub fn advance_counter(&mut self) {
        self.counter += 1;
    }
}

impl Default for HotpKey {
    fn default() -> Self {
        Self::new()
    }
}

// Keep the raw secret out of debug output; it is only ever logged
// explicitly, at debug level, during provisioning.
impl core::fmt::Debug for HotpKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HotpKey")
            .field("len", &self.len)
            .field("counter", &self.counter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unconfigured() {
        let key = HotpKey::new();
        assert!(!key.is_configured());
        assert_eq!(key.secret(), &[] as &[u8]);
        assert_eq!(key.counter(), 0);
    }

    #[test]
    fn provision_stores_bytes_and_resets_counter() {
        let mut key = HotpKey::new();
        key.provision(b"old secret").unwrap();
        key.advance_counter();
        key.advance_counter();
        assert_eq!(key.counter(), 2);

        key.provision(b"new secret").unwrap();
        assert!(key.is_configured());
        assert_eq!(key.secret(), b"new secret");
        assert_eq!(key.counter(), 0);
    }

    #[test]
    fn provision_accepts_full_slot() {
        let mut key = HotpKey::new();
        let secret = [0xab; MAX_SECRET_BYTES];
        key.provision(&secret).unwrap();
        assert_eq!(key.secret(), &secret[..]);
    }

    #[test]
    fn oversized_secret_rejected_and_state_preserved() {
        let mut key = HotpKey::new();
        key.provision(b"keep me").unwrap();
        key.advance_counter();

        let too_long = [0u8; MAX_SECRET_BYTES + 1];
        match key.provision(&too_long) {
            Err(Error::SecretTooLong(len)) => assert_eq!(len, 65),
            other => panic!("expected SecretTooLong, got {:?}", other),
        }
        assert_eq!(key.secret(), b"keep me");
        assert_eq!(key.counter(), 1);
    }

    #[test]
    fn zero_length_secret_leaves_slot_unconfigured() {
        let mut key = HotpKey::new();
        key.provision(b"").unwrap();
        assert!(!key.is_configured());
    }

    #[test]
    fn counter_advances_by_one() {
        let mut key = HotpKey::new();
        key.provision(b"test").unwrap();
        for expected in 1..=5 {
            key.advance_counter();
            assert_eq!(key.counter(), expected);
        }
    }
}
