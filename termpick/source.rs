//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Line input from files and standard input.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Open `pathname`, or standard input for an empty path or `-`.
pub fn input_reader(pathname: &Path) -> io::Result<Box<dyn BufRead>> {
    let path_str = pathname.as_os_str();
    let reader: Box<dyn BufRead> = if path_str.is_empty() || path_str == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(fs::File::open(pathname)?))
    };
    Ok(reader)
}

/// Open every file in `files`, or standard input when there are none.
/// Files that cannot be opened are returned with their error.
pub fn open_all(files: &[PathBuf]) -> (Vec<Box<dyn BufRead>>, Vec<(PathBuf, io::Error)>) {
    if files.is_empty() {
        return match input_reader(Path::new("")) {
            Ok(reader) => (vec![reader], Vec::new()),
            Err(e) => (Vec::new(), vec![(PathBuf::new(), e)]),
        };
    }

    let mut readers = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for path in files {
        match input_reader(path) {
            Ok(reader) => readers.push(reader),
            Err(e) => failures.push((path.clone(), e)),
        }
    }
    (readers, failures)
}

/// Lines of several readers in sequence, read one at a time.
///
/// Line terminators (`\n` or `\r\n`) are removed and invalid UTF-8 is
/// replaced. A read error ends the affected reader.
pub struct InputLines {
    readers: VecDeque<Box<dyn BufRead>>,
    buf: Vec<u8>,
}

impl InputLines {
    pub fn new(readers: Vec<Box<dyn BufRead>>) -> Self {
        Self {
            readers: readers.into(),
            buf: Vec::new(),
        }
    }
}

impl Iterator for InputLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let reader = self.readers.front_mut()?;
            self.buf.clear();
            match reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.readers.pop_front();
                }
                Ok(_) => {
                    if self.buf.last() == Some(&b'\n') {
                        self.buf.pop();
                        if self.buf.last() == Some(&b'\r') {
                            self.buf.pop();
                        }
                    }
                    return Some(String::from_utf8_lossy(&self.buf).into_owned());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    log::warn!("read failed, skipping rest of input: {}", e);
                    self.readers.pop_front();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &'static [u8]) -> Box<dyn BufRead> {
        Box::new(Cursor::new(text))
    }

    #[test]
    fn test_lines_across_readers() {
        let lines = InputLines::new(vec![reader(b"a\nb\r\n"), reader(b""), reader(b"c")]);
        assert_eq!(lines.collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_blank_lines_kept() {
        let lines = InputLines::new(vec![reader(b"\n\nx\n")]);
        assert_eq!(lines.collect::<Vec<_>>(), vec!["", "", "x"]);
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let lines = InputLines::new(vec![reader(b"ok\xff\n")]);
        assert_eq!(lines.collect::<Vec<_>>(), vec!["ok\u{fffd}"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(input_reader(Path::new("/nonexistent/termpick/input")).is_err());

        let missing = PathBuf::from("/nonexistent/termpick/input");
        let (readers, failures) = open_all(&[missing.clone()]);
        assert!(readers.is_empty());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, missing);
    }
}
