//! # HOTP security-key engine, demoed on PC.
//!
//! This is the code-generation engine of a one-button USB security key,
//! lifted out of its embedded harness so it can be run and tested on a PC.
//! Each press of the button derives a fresh HOTP code ([RFC 4226][4226],
//! with HMAC-SHA256 as the keyed hash) from a provisioned secret and a
//! monotonically advancing counter, and "types" it on the output channel.
//!
//! The crate is split along the boundaries the hardware imposes:
//!
//! - [`store`] owns the single key slot: up to 64 secret bytes plus the
//!   counter, mutable only through provisioning and post-emission counter
//!   advancement.
//! - [`hotp`] derives codes: moving-factor encoding, dynamic truncation,
//!   decimal reduction to a configurable digit count.
//! - [`platform`] declares the external collaborators (the keyed-hash
//!   service, the button, the output channel) as traits and provides the
//!   PC stand-ins: software HMAC, stdin, console. On hardware these map to
//!   an HMAC engine, GPIO interrupts, and a USB HID keyboard.
//! - [`authenticator`] is the session controller: a single-threaded loop
//!   that blocks on the button, gates generation on whether a secret is
//!   configured, and advances the counter only after a code was actually
//!   emitted, so that a verifier sharing the secret stays synchronized
//!   across truly issued codes.
//! - [`cli`] and `main` are the PC shell: argument parsing, base32 secret
//!   decoding, logger bring-up.
//!
//! Deliberately out of scope: transporting codes to a host, persisting the
//! key across runs, and multi-slot secret management (the device has
//! exactly one slot).
//!
//! [4226]: https://tools.ietf.org/html/rfc4226

pub mod authenticator;
pub mod cli;
pub mod error;
pub mod hotp;
pub mod platform;
pub mod store;

pub use error::{Error, Result};
