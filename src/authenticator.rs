//! The HOTP security-key "app" of this demo: the session controller.
//!
//! A single-threaded event loop gates the two things the key can do:
//! program a secret, and emit the next code. The controller owns the
//! [`HotpKey`] aggregate outright and threads `&mut` access through its own
//! methods, so exclusivity is structural and no locking is involved: while
//! a code is being generated, nothing else can touch the key.
//!
//! The one ordering rule that matters for counter synchronization with a
//! verifier: the counter advances only after a code for it was actually
//! handed to the output channel. A failed generation leaves the counter
//! where it was, and the next press retries the same moving factor.

use delog::hex_str;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::hotp::{Code, CodeGenerator, Digits};
use crate::platform::{HmacSha256, OutputChannel, Press, TriggerSource};
use crate::store::HotpKey;

/// Controller states.
///
/// `ReportingError` and `Generating` are transient within one press; the
/// controller always returns to `AwaitingTrigger` before blocking again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Before startup provisioning has run.
    Idle,
    /// Blocked on the trigger source.
    AwaitingTrigger,
    /// A code derivation is in flight; the controller is not reentrant here.
    Generating,
    /// A recoverable failure is being reported.
    ReportingError,
}

/// The core app: secret slot, code generator, and the event loop tying them
/// to the trigger source and output channel.
pub struct Authenticator<H, T, O>
where
    H: HmacSha256,
    T: TriggerSource,
    O: OutputChannel,
{
    generator: CodeGenerator<H>,
    key: HotpKey,
    trigger: T,
    output: O,
    state: State,
}

impl<H, T, O> Authenticator<H, T, O>
where
    H: HmacSha256,
    T: TriggerSource,
    O: OutputChannel,
{
    /// Constructor, consumes the platform collaborators. The key slot
    /// starts out empty.
    pub fn new(hmac: H, trigger: T, output: O, digits: Digits) -> Self {
        Self {
            generator: CodeGenerator::new(hmac, digits),
            key: HotpKey::new(),
            trigger,
            output,
            state: State::Idle,
        }
    }

    /// Programs already-decoded secret bytes into the key slot, resetting
    /// the counter. The previous secret, if any, is gone for good.
    pub fn provision(&mut self, raw_secret: &[u8]) -> Result<()> {
        self.key.provision(raw_secret)?;
        debug!("raw key: {}", hex_str!(raw_secret, 4));
        info!("programmed {} byte secret", raw_secret.len());
        Ok(())
    }

    /// Current controller state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Counter value the next code will use.
    pub fn counter(&self) -> u64 {
        self.key.counter()
    }

    /// Runs the press loop until the trigger source closes. Never returns
    /// early: every failure is reported and the loop keeps waiting.
    pub fn run(&mut self) {
        self.state = State::AwaitingTrigger;
        info!("awaiting trigger");
        while let Some(press) = self.trigger.wait_for_press() {
            self.handle_press(press);
        }
        info!("trigger source closed, shutting down");
    }

    /// Processes a single button event.
    pub fn handle_press(&mut self, press: Press) {
        match press {
            Press::Short => self.next_code(),
            // Advertised as "hold to enter a new secret", but re-provisioning
            // was never wired to this event; see the project docs.
            Press::Long => debug!("long press ignored"),
        }
    }

    fn next_code(&mut self) {
        let counter = self.key.counter();
        match self.try_generate() {
            Ok(code) => {
                self.output.emit_code(&code, counter);
                // only now is this moving factor spent
                self.key.advance_counter();
                info!("counter {}: code emitted", counter);
            }
            Err(err) => {
                self.state = State::ReportingError;
                self.output.report_error(&err.to_string());
            }
        }
        self.state = State::AwaitingTrigger;
    }

    fn try_generate(&mut self) -> Result<Code> {
        if !self.key.is_configured() {
            return Err(Error::Unconfigured);
        }
        self.state = State::Generating;
        self.generator.generate(self.key.secret(), self.key.counter())
    }
}
