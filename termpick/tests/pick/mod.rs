//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use crate::{run_test, run_test_with_checker, to_args, TestPlan};
use std::fs;

const PICK: &str = env!("CARGO_BIN_EXE_pick");

fn pick_test(args: &[&str], stdin_data: &str, expected_out: &str) {
    run_test(TestPlan {
        bin: PICK,
        args: to_args(args),
        stdin_data: String::from(stdin_data),
        expected_out: String::from(expected_out),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_pick_selects_everything_when_piped() {
    pick_test(&[], "a\nb\nc\n", "a\nb\nc\n");
}

#[test]
fn test_pick_across_pages() {
    pick_test(&["-n", "1"], "one\ntwo\nthree\n", "one\ntwo\nthree\n");
    pick_test(&["-o", "pagesize=2", "-a"], "x\ny\nz", "x\ny\nz\n");
}

#[test]
fn test_pick_empty_input() {
    pick_test(&[], "", "");
}

#[test]
fn test_pick_keeps_raw_lines() {
    pick_test(&[], "a\tb\r\n\x1b[31mred\x1b[m\n", "a\tb\n\x1b[31mred\x1b[m\n");
}

#[test]
fn test_pick_from_files() {
    let dir = std::env::temp_dir().join(format!("termpick-pick-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let first = dir.join("first");
    let second = dir.join("second");
    fs::write(&first, "1\n2\n").unwrap();
    fs::write(&second, "3\n").unwrap();

    pick_test(
        &[first.to_str().unwrap(), second.to_str().unwrap()],
        "ignored\n",
        "1\n2\n3\n",
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_pick_missing_file() {
    let missing = "/nonexistent/termpick/pick-input";
    run_test_with_checker(
        TestPlan {
            bin: PICK,
            args: to_args(&[missing]),
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: format!("{}: ", missing),
            expected_exit_code: 1,
        },
        &[],
        |plan, output| {
            assert_eq!(String::from_utf8_lossy(&output.stdout), plan.expected_out);
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.starts_with(&plan.expected_err));
            assert_eq!(output.status.code(), Some(plan.expected_exit_code));
        },
    );
}

#[test]
fn test_pick_option_query() {
    run_test(TestPlan {
        bin: PICK,
        args: to_args(&["-o", "ps=4", "-o", "ps?", "-o", "help?"]),
        stdin_data: String::from("a\n"),
        expected_out: String::from("a\n"),
        expected_err: String::from("pagesize=4\nhelp\n"),
        expected_exit_code: 0,
    });
}

#[test]
fn test_pick_invalid_option() {
    run_test_with_checker(
        TestPlan {
            bin: PICK,
            args: to_args(&["-o", "bogus"]),
            stdin_data: String::from("a\n"),
            expected_out: String::new(),
            expected_err: String::from("bogus"),
            expected_exit_code: 1,
        },
        &[],
        |plan, output| {
            assert!(output.stdout.is_empty());
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains(&plan.expected_err));
            assert_eq!(output.status.code(), Some(plan.expected_exit_code));
        },
    );
}

#[test]
fn test_pick_options_from_environment() {
    run_test_with_checker(
        TestPlan {
            bin: PICK,
            args: Vec::new(),
            stdin_data: String::from("a\n"),
            expected_out: String::new(),
            expected_err: String::from("nosuch"),
            expected_exit_code: 1,
        },
        &[("TERMPICK_OPTS", "nohelp nosuch")],
        |plan, output| {
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains(&plan.expected_err));
            assert_eq!(output.status.code(), Some(plan.expected_exit_code));
        },
    );
}
