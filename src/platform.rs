//! The collaborator boundary, and its PC realizations.
//!
//! The HOTP core talks to three external collaborators, each behind a
//! trait: the 256-bit keyed-hash service, the button (trigger source), and
//! the output channel that would type the code on a real key's USB HID
//! keyboard. On hardware these are interrupt- and callback-driven services;
//! on a PC we substitute a software HMAC, line-buffered stdin, and the
//! console.

use std::io;

use hmac::{Hmac, Mac};
use log::warn;
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::hotp::Code;

/// The keyed-hash service consumed by the code generator:
/// `HMAC-SHA256(key, message)`, one invocation per code.
///
/// Synchronous from the core's point of view, even where the underlying
/// mechanism is callback-driven: implementations block until the digest is
/// ready, are expected to bound that wait themselves, and surface expiry or
/// any other failure as [`Error::HashFailure`].
pub trait HmacSha256 {
    /// Computes the 32-byte digest over `message` under `key`.
    fn compute(&mut self, key: &[u8], message: &[u8]) -> Result<Vec<u8>>;
}

/// A discrete button event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    Short,
    /// Reserved for re-provisioning; the controller does not act on it.
    Long,
}

/// Source of button events. Blocks the (single) thread of control until the
/// next press arrives.
pub trait TriggerSource {
    /// The next press, or `None` once the source is closed for good.
    fn wait_for_press(&mut self) -> Option<Press>;
}

/// Sink for generated codes and user-facing diagnostics. Fire-and-forget:
/// the core makes no assumption about whether delivery succeeds.
pub trait OutputChannel {
    /// Hands over a freshly generated code for display/typing, along with
    /// the counter value it was derived from (needed to verify the code
    /// against a synchronized checker).
    fn emit_code(&mut self, code: &Code, counter: u64);
    /// Reports a recoverable failure to the user.
    fn report_error(&mut self, message: &str);
}

/// In-process HMAC-SHA256, standing in for the hardware hash engine.
pub struct SoftwareHmac;

impl HmacSha256 for SoftwareHmac {
    fn compute(&mut self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let mut mac = Hmac::<Sha256>::new_from_slice(key)
            .map_err(|err| Error::HashFailure(err.to_string()))?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// The "button": one line of stdin per press. A plain Enter is a short
/// press, a line starting with `l` a long one, and EOF closes the source.
pub struct StdinButton;

impl TriggerSource for StdinButton {
    fn wait_for_press(&mut self) -> Option<Press> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.trim().to_ascii_lowercase().starts_with('l') {
                    Some(Press::Long)
                } else {
                    Some(Press::Short)
                }
            }
            Err(err) => {
                warn!("button read failed: {}", err);
                None
            }
        }
    }
}

/// Console stand-in for the USB HID keyboard the real key types codes on.
pub struct ConsoleOutput;

impl OutputChannel for ConsoleOutput {
    fn emit_code(&mut self, code: &Code, counter: u64) {
        println!(
            "Counter: {}. Typed the {} digit code \"{}\" on the keyboard",
            counter,
            code.digits(),
            code
        );
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("ERROR: {}", message);
    }
}
