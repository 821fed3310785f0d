use core::convert::TryFrom;

use anyhow::Result;
use log::info;

use hotp_pc_tutorial::{
    authenticator::Authenticator,
    cli,
    cli::Config,
    platform::{ConsoleOutput, SoftwareHmac, StdinButton},
};

fn main() -> Result<()> {
    init_logger()?;
    info!("HOTP security key demo started.");

    let args = init_app();
    let config = Config::try_from(&args)?;

    let mut authenticator = Authenticator::new(
        SoftwareHmac,
        StdinButton,
        ConsoleOutput,
        config.digits,
    );
    authenticator.provision(&config.raw_secret)?;

    println!("HOTP demo running. Usage:");
    println!("* Press <Enter> to get the next HOTP code.");
    println!("* Type 'l' then <Enter> to hold the button (enter a new secret; not yet implemented).");

    authenticator.run();

    Ok(())
}

pub fn init_app() -> clap::ArgMatches<'static> {
    let app = cli::app();
    let matches = app.get_matches();
    matches
}

pub fn init_logger() -> Result<()> {
    simple_logger::SimpleLogger::new().init()?;
    Ok(())
}
