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
use std::io;
use std::path::PathBuf;
use termpick::source::{open_all, InputLines};
use termpick::view::{page_lines, EndMarker};
use termpick::{style, width, Error, Options, PROJECT_NAME};

const TABSTOP: usize = 8;

/// page - scroll through files one screen at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Show an (END) line after the last input line.
    #[arg(short = 'e', long = "end-marker")]
    end_marker: bool,

    /// Set a display option: name, noname, name=value or name?
    #[arg(short = 'o', long = "option", value_name = "OPT")]
    options: Vec<String>,

    /// Files to read as input; standard input when none are given.
    files: Vec<PathBuf>,
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

    let mut exit_code = 0;

    let (readers, failures) = open_all(&args.files);
    for (path, e) in failures {
        exit_code = 1;
        eprintln!("{}: {}", path.display(), e);
    }
    let lines = InputLines::new(readers).map(|line| width::expand_tabs(&line, TABSTOP));

    let marker: Option<EndMarker> = if args.end_marker {
        let color = options.color;
        Some(Box::new(move |_: usize| {
            vec![style::paint(&gettext("(END)"), &[style::DIM], color)]
        }))
    } else {
        None
    };

    match page_lines(lines, marker, &options) {
        Ok(()) => {}
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => return Err(e.into()),
    }

    std::process::exit(exit_code)
}
