//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use crate::{run_test, run_test_with_env, to_args, TestPlan};

const PAGE: &str = env!("CARGO_BIN_EXE_page");

fn page_plan(args: &[&str], stdin_data: &str, expected_out: &str) -> TestPlan {
    TestPlan {
        bin: PAGE,
        args: to_args(args),
        stdin_data: String::from(stdin_data),
        expected_out: String::from(expected_out),
        expected_err: String::new(),
        expected_exit_code: 0,
    }
}

#[test]
fn test_page_writes_all_lines_when_piped() {
    run_test(page_plan(&[], "first\nsecond\nthird\n", "first\nsecond\nthird\n"));
}

#[test]
fn test_page_last_line_without_newline() {
    run_test(page_plan(&[], "a\nb", "a\nb\n"));
}

#[test]
fn test_page_does_not_clip_long_lines() {
    let long = "x".repeat(500);
    let input = format!("{}\n", long);
    run_test(page_plan(&[], &input, &input));
}

#[test]
fn test_page_expands_tabs() {
    run_test(page_plan(&[], "a\tb\n", "a       b\n"));
}

#[test]
fn test_page_end_marker() {
    run_test_with_env(
        page_plan(&["-e"], "a\nb\n", "a\nb\n(END)\n"),
        &[("NO_COLOR", "1")],
    );
    run_test(page_plan(&["-e", "-o", "nocolor"], "", "(END)\n"));
}

#[test]
fn test_page_piped_output_is_plain() {
    run_test(page_plan(&["-e"], "a\n", "a\n(END)\n"));
    run_test(page_plan(&["-e", "-o", "color"], "a\n", "a\n\x1b[2m(END)\x1b[m\n"));
}
