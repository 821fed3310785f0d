use core::convert::TryFrom;

use anyhow::{Context as _, Error, Result};
use clap::{crate_authors, crate_version, App, Arg};
use data_encoding::Specification;

use crate::hotp::Digits;

const ABOUT: &str = "
A PC demo of a USB security key's HOTP engine.

* Press <Enter> to get the next HOTP code.
* Type 'l' then <Enter> to hold the button (enter a new secret; reserved, not yet wired up).

Verify codes against any HOTP reference checker; the algorithm MUST be sha256.
";

pub fn app() -> clap::App<'static, 'static> {
    let app = App::new("hotp-pc-tutorial")
        .author(crate_authors!())
        .version(crate_version!())
        .about(ABOUT)
        .arg(
            Arg::with_name("SECRET")
                .short("s")
                .long("secret")
                .default_value("test")
                .help("base32-encoded HOTP secret to program at startup, e.g. JBSWY3DPEHPK3PXP")
                .required(false),
        )
        .arg(
            Arg::with_name("DIGITS")
                .short("d")
                .long("digits")
                .default_value("6")
                .help("decimal digits per code, within [1, 9]")
                .required(false),
        );

    app
}

/// Startup configuration, decoded and validated from the argument surface.
///
/// Base32 decoding happens here, outside the core: the key slot only ever
/// sees raw secret bytes.
pub struct Config {
    pub raw_secret: Vec<u8>,
    pub digits: Digits,
}

/// Base32 decoder for human-entered enrollment strings.
///
/// The stock `BASE32` encodings are canonical-strict; enrollment strings
/// are friendlier than that. This one is case-insensitive, treats padding
/// as optional, and does not insist on zeroed trailing bits, so seeds like
/// `"test"` (which leaves 4 dangling bits) decode the same way the device's
/// own decoder handles them.
fn base32_decoder() -> Result<data_encoding::Encoding> {
    let mut spec = Specification::new();
    spec.symbols.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ234567");
    spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
    spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    spec.check_trailing_bits = false;
    spec.ignore.push('=');
    spec.encoding().context("invalid base32 specification")
}

impl TryFrom<&'_ clap::ArgMatches<'static>> for Config {
    type Error = Error;
    fn try_from(args: &clap::ArgMatches<'static>) -> Result<Self> {
        let base32_secret = args.value_of("SECRET").unwrap();
        let raw_secret = base32_decoder()?
            .decode(base32_secret.as_bytes())
            .context("cannot base32 decode secret")?;

        let digits: u32 = args
            .value_of("DIGITS")
            .unwrap()
            .parse()
            .context("digit count is not a number")?;
        let digits = Digits::new(digits)?;

        Ok(Config { raw_secret, digits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&'static str]) -> Result<Config> {
        let matches = app().get_matches_from_safe(argv.iter().cloned())?;
        Config::try_from(&matches)
    }

    #[test]
    fn defaults_decode_the_tutorial_secret() {
        let config = config(&["hotp-pc-tutorial"]).unwrap();
        // base32 "test" -> two raw bytes
        assert_eq!(config.raw_secret, [0x99, 0x25]);
        assert_eq!(config.digits.count(), 6);
    }

    #[test]
    fn non_canonical_trailing_bits_are_tolerated() {
        // 4 symbols carry 20 bits; the 4 dangling bits are dropped rather
        // than rejected, as the device-side decoder does
        let config = config(&["hotp-pc-tutorial", "--secret", "test"]).unwrap();
        assert_eq!(config.raw_secret, [0x99, 0x25]);
    }

    #[test]
    fn secret_decoding_is_case_insensitive_and_padding_tolerant() {
        let lower = config(&["hotp-pc-tutorial", "--secret", "jbswy3dpehpk3pxp"]).unwrap();
        let padded = config(&["hotp-pc-tutorial", "--secret", "JBSWY3DPEHPK3PXP===="]).unwrap();
        assert_eq!(lower.raw_secret, padded.raw_secret);
        assert_eq!(lower.raw_secret.len(), 10);
    }

    #[test]
    fn garbage_secret_is_rejected() {
        assert!(config(&["hotp-pc-tutorial", "--secret", "0189!"]).is_err());
    }

    #[test]
    fn digit_count_is_validated_at_startup() {
        assert!(config(&["hotp-pc-tutorial", "--digits", "9"]).is_ok());
        assert!(config(&["hotp-pc-tutorial", "--digits", "10"]).is_err());
        assert!(config(&["hotp-pc-tutorial", "--digits", "0"]).is_err());
        assert!(config(&["hotp-pc-tutorial", "--digits", "six"]).is_err());
    }
}
