//! Reads lines from standard input and echoes them back with tabs and
//! spaces highlighted in a background color so a whitespace-alphabet
//! program is readable on a terminal. Direct port of original_source's
//! `color/main.c`; no dependencies, same as the original's plain `stdio.h`
//! use.

use std::io::{self, BufRead, Write};

const TAB_COLOR: &str = "\x1b[43m";
const SPACE_COLOR: &str = "\x1b[46m";
const DEFAULT_COLOR: &str = "\x1b[0m";

#[derive(PartialEq, Eq)]
enum Previous {
    Tab,
    Space,
    Default,
}

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    let mut previous = Previous::Default;

    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        for ch in line.chars() {
            previous = write_colored(&mut out, ch, previous);
        }
    }

    let _ = out.write_all(DEFAULT_COLOR.as_bytes());
}

fn write_colored<W: Write>(out: &mut W, ch: char, previous: Previous) -> Previous {
    let (next, rendered) = match ch {
        '\t' => (Previous::Tab, 'T'),
        ' ' => (Previous::Space, 'S'),
        other => (Previous::Default, other),
    };
    if next != previous {
        let escape = match next {
            Previous::Tab => TAB_COLOR,
            Previous::Space => SPACE_COLOR,
            Previous::Default => DEFAULT_COLOR,
        };
        let _ = out.write_all(escape.as_bytes());
    }
    let mut buf = [0u8; 4];
    let _ = out.write_all(rendered.encode_utf8(&mut buf).as_bytes());
    next
}
