use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, IsTerminal, Write};

/// Interactive input used during login. Prompts and notices go to stderr.
pub trait Prompt {
    fn ask(&self, label: &str) -> io::Result<String>;

    /// Like [`Prompt::ask`] without echoing the input
    fn ask_secret(&self, label: &str) -> io::Result<String>;

    fn notice(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, label: &str) -> io::Result<String> {
        eprint!("{}", label);
        io::stderr().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask_secret(&self, label: &str) -> io::Result<String> {
        // Piped input cannot be hidden
        if !io::stdin().is_terminal() {
            return self.ask(label);
        }

        eprint!("{}", label);
        io::stderr().flush()?;

        terminal::enable_raw_mode()?;
        let secret = read_hidden_line();
        terminal::disable_raw_mode()?;
        eprintln!();
        secret
    }

    fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn read_hidden_line() -> io::Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }
        match code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "cancelled"));
            }
            KeyCode::Esc => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "cancelled"));
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}
