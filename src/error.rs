//! Error taxonomy of the HOTP core.
//!
//! Everything here is recoverable at the session-controller boundary: the
//! controller reports the failure and returns to waiting for the next
//! trigger. The one exception is [`Error::DigitConfigInvalid`], which is
//! raised while parsing configuration and aborts startup.

/// Convenience alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied secret does not fit the single 64-byte key slot.
    /// Provisioning is rejected and the previously stored key is untouched.
    #[error("secret of {0} bytes exceeds the 64 byte key slot")]
    SecretTooLong(usize),

    /// Code generation was requested before any secret was provisioned.
    #[error("HOTP key not yet configured")]
    Unconfigured,

    /// The keyed-hash service failed, timed out, or returned a malformed
    /// digest. The counter must not advance on this path.
    #[error("keyed-hash service failure: {0}")]
    HashFailure(String),

    /// The configured digit count is outside [1, 9]. Beyond 9 digits the
    /// decimal reduction overflows its 31-bit input domain.
    #[error("invalid digit count {0}, must be within [1, 9]")]
    DigitConfigInvalid(u32),
}
