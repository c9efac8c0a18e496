//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use termpick::session::Session;
use termpick::sixel::{query_device_attributes, supports_sixel};
use termpick::{Error, Options, PROJECT_NAME};

/// sixel-probe - report whether the terminal can display sixel images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Set an input option: name, noname, name=value or name?
    #[arg(short = 'o', long = "option", value_name = "OPT")]
    options: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    setlocale(LocaleCategory::LcAll, "");
    textdomain(PROJECT_NAME)?;
    bind_textdomain_codeset(PROJECT_NAME, "UTF-8")?;

    let mut options = Options::from_env()?;
    for answer in options.apply_all(&args.options)? {
        eprintln!("{}", answer);
    }

    let mut session = Session::acquire(options.keys)?;
    let reply = query_device_attributes(&mut session);
    session.release()?;

    match reply {
        Ok(reply) if supports_sixel(&reply) => println!("{}", gettext("supported")),
        Ok(_) | Err(Error::QueryReply(_)) => {
            println!("{}", gettext("terminal does not support sixel"))
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
