//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, setlocale, textdomain, LocaleCategory};
use std::io::{self, Write};
use std::path::PathBuf;
use termpick::select::{page_capacity, select_pages, ChunkPager, Defaults, Outcome};
use termpick::source::{open_all, InputLines};
use termpick::ui::TerminalSize;
use termpick::{width, Options, EXIT_ABORTED, PROJECT_NAME};

const TABSTOP: usize = 8;

/// pick - choose lines interactively and print the chosen ones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Lines per page; 0 fits the terminal.
    #[arg(short = 'n', long = "page-size")]
    page_size: Option<usize>,

    /// Start with every line selected.
    #[arg(short = 'a', long)]
    all: bool,

    /// Set a display option: name, noname, name=value or name?
    #[arg(short = 'o', long = "option", value_name = "OPT")]
    options: Vec<String>,

    /// Files to read as input; standard input when none are given.
    files: Vec<PathBuf>,
}

fn page_size(options: &Options) -> usize {
    if options.pagesize > 0 {
        options.pagesize
    } else {
        page_capacity(TerminalSize::query(), options)
    }
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
    if let Some(n) = args.page_size {
        options.pagesize = n;
    }

    let mut exit_code = 0;

    let (readers, failures) = open_all(&args.files);
    for (path, e) in failures {
        exit_code = 1;
        eprintln!("{}: {}", path.display(), e);
    }
    let lines: Vec<String> = InputLines::new(readers).collect();

    let per_page = page_size(&options);
    let mut defaults = Defaults::new();
    if args.all {
        for (i, chunk) in lines.chunks(per_page).enumerate() {
            defaults.insert(i + 1, vec![true; chunk.len()]);
        }
    }

    let pager = ChunkPager::new(lines, per_page);
    let label = |line: &String| width::expand_tabs(line, TABSTOP);

    match select_pages(pager, label, defaults, &options)? {
        Outcome::Committed(selection) => {
            let mut out = io::stdout().lock();
            for line in selection.into_selected() {
                writeln!(out, "{}", line)?;
            }
            out.flush()?;
        }
        Outcome::Aborted => exit_code = EXIT_ABORTED,
    }

    std::process::exit(exit_code)
}
