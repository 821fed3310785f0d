//! HOTP code derivation (RFC 4226, fixed to a 256-bit keyed hash).
//!
//! The generator turns a (secret, counter) pair into a short decimal code:
//! the counter is encoded big-endian as the 8-byte "moving factor", handed
//! to the keyed-hash service, and the resulting digest is dynamically
//! truncated and reduced modulo `10^digits`.

use core::convert::TryInto;

use log::debug;

use crate::error::{Error, Result};
use crate::platform::HmacSha256;

/// Digest size the 256-bit keyed-hash service must produce.
pub const DIGEST_BYTES: usize = 32;

/// Validated count of decimal digits per code.
///
/// The valid range is [1, 9]: dynamic truncation yields a 31-bit integer,
/// and `10^10` no longer fits that domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits(u32);

impl Digits {
    /// Validates the digit count, failing with [`Error::DigitConfigInvalid`]
    /// outside [1, 9]. Meant to run once, at configuration time.
    pub fn new(digits: u32) -> Result<Self> {
        if !(1..=9).contains(&digits) {
            return Err(Error::DigitConfigInvalid(digits));
        }
        Ok(Self(digits))
    }

    /// Number of digits per code.
    pub fn count(self) -> u32 {
        self.0
    }

    fn modulus(self) -> u32 {
        // cannot overflow: new() capped the exponent at 9
        10u32.pow(self.0)
    }
}

/// The customary six digits.
impl Default for Digits {
    fn default() -> Self {
        Self(6)
    }
}

/// A generated one-time code.
///
/// Ephemeral by design: it is handed to the output channel and dropped, not
/// retained. Codes are presented as left-zero-padded decimal strings of
/// exactly the configured width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Code {
    value: u32,
    digits: Digits,
}

impl Code {
    /// Width of the formatted code.
    pub fn digits(&self) -> u32 {
        self.digits.count()
    }
}

impl core::fmt::Display for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.digits.count() as usize)
    }
}

/// Derives codes from (secret, counter) pairs via a keyed-hash service.
pub struct CodeGenerator<H: HmacSha256> {
    hmac: H,
    digits: Digits,
}

impl<H: HmacSha256> CodeGenerator<H> {
    /// Constructor, consumes the keyed-hash service.
    pub fn new(hmac: H, digits: Digits) -> Self {
        Self { hmac, digits }
    }

    /// Computes the code for one (secret, counter) pair.
    ///
    /// Deterministic: identical inputs always yield the identical code. Any
    /// failure of the hash service surfaces as [`Error::HashFailure`];
    /// advancing the counter on that path is the caller's bug to avoid.
    pub fn generate(&mut self, secret: &[u8], counter: u64) -> Result<Code> {
        let moving_factor = counter.to_be_bytes();
        let digest = self.hmac.compute(secret, &moving_factor)?;
        let value = truncate(&digest)? % self.digits.modulus();
        debug!("derived code for counter {}", counter);
        Ok(Code {
            value,
            digits: self.digits,
        })
    }
}

// "Dynamic truncation" (https://tools.ietf.org/html/rfc4226#section-5.3):
// the low nibble of the final digest byte selects a 4-byte window, which is
// read big-endian and masked to 31 bits.
fn truncate(digest: &[u8]) -> Result<u32> {
    if digest.len() != DIGEST_BYTES {
        return Err(Error::HashFailure(format!(
            "expected {} byte digest, got {}",
            DIGEST_BYTES,
            digest.len()
        )));
    }
    let offset = (digest[DIGEST_BYTES - 1] & 0x0f) as usize;
    // a nibble keeps offset + 4 within a 32-byte digest, but check instead
    // of assuming
    let window: [u8; 4] = digest
        .get(offset..offset + 4)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| Error::HashFailure("truncation offset out of range".to_string()))?;
    Ok(u32::from_be_bytes(window) & 0x7fff_ffff)
}
