//! Terminal rendering for markdown output
//!
//! Uses termimad for inline markdown styling, with a plain-text fallback
//! for `--no-color` and piped output.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// How a single line of markdown is printed in rich mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// Printed whole in blue, hash marks included
    Header,
    /// Operation failure, printed in red
    Failure,
    /// Styled inline by termimad
    Body,
}

fn line_kind(line: &str) -> LineKind {
    if line.starts_with('#') {
        LineKind::Header
    } else if line.starts_with("Error:") {
        LineKind::Failure
    } else {
        LineKind::Body
    }
}

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.strikeout.set_fg(Color::DarkGrey);
        skin.inline_code.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::AnsiValue(236));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            if !markdown.ends_with('\n') {
                println!();
            }
            return Ok(());
        }
        for line in markdown.lines() {
            match line_kind(line) {
                LineKind::Header => println!("{BLUE}{line}{RESET}"),
                LineKind::Failure => println!("{RED}{line}{RESET}"),
                LineKind::Body => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
