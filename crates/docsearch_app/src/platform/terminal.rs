//! Terminal stand-ins for the form and detail views.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

pub const QUERY_PLACEHOLDER: &str = "How do I configure OpenID Connect in GitHub?";

pub struct TerminalView {
    interactive: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
        }
    }

    /// Replaces the current document with `markdown`.
    ///
    /// When stdout is not a terminal each document is appended instead, so a
    /// redirected log still shows every state the view went through.
    pub fn show_document(&self, markdown: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        if self.interactive {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        } else {
            writeln!(stdout)?;
        }
        writeln!(stdout, "{markdown}")?;
        stdout.flush()
    }

    /// Search form. `None` once stdin is closed.
    pub fn prompt_query(&self) -> io::Result<Option<String>> {
        if self.interactive {
            println!("Enter your question about GitHub");
            println!("  e.g. {QUERY_PLACEHOLDER}");
        }
        self.prompt("Search Query: ")
    }

    /// Asks for one action key; `None` once stdin is closed.
    pub fn prompt_action(&self, has_source: bool) -> io::Result<Option<char>> {
        let mut menu = String::from("\n[c] Copy Answer  ");
        if has_source {
            menu.push_str("[o] Open First Source  ");
        }
        menu.push_str("[n] New Search  [q] Quit\n> ");
        let line = self.prompt(&menu)?;
        Ok(line.map(|line| {
            line.trim()
                .chars()
                .next()
                .map(|c| c.to_ascii_lowercase())
                .unwrap_or('\n')
        }))
    }

    fn prompt(&self, label: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{label}")?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}
