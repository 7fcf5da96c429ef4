//! Interactive menu shown when no subcommand is given.
//!
//! Reads one line per prompt from stdin until the user exits or input ends.
//! A failed lookup is reported and the menu continues.

use crate::cli::{HistoryCommand, Session};
use crate::error::{CliError, CliResult};
use crate::output;
use crate::types::Mode;
use console::style;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

/// A parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Lookup(Mode),
    History,
    Exit,
}

impl MenuChoice {
    /// Parse the option typed at the menu prompt: a number or a mode name.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Exit),
            "7" => Some(Self::History),
            other => match other.parse::<usize>() {
                Ok(index) => {
                    let mode = Mode::ALL.get(index.checked_sub(1)?)?;
                    Some(Self::Lookup(*mode))
                }
                Err(_) => other.parse::<Mode>().ok().map(Self::Lookup),
            },
        }
    }
}

/// Run the menu on stdin.
pub async fn run(session: &Session) -> CliResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_menu();

        let Some(input) = prompt(&mut lines, "Select option").await? else {
            break;
        };

        match MenuChoice::parse(&input) {
            Some(MenuChoice::Exit) => break,
            Some(MenuChoice::History) => {
                if let Err(e) = HistoryCommand::default().execute(session.reporter().store()) {
                    output::print_error(&e.to_string());
                }
            }
            Some(MenuChoice::Lookup(mode)) => {
                let Some(target) = prompt(&mut lines, mode.prompt()).await? else {
                    break;
                };

                match session.lookup(mode, &target).await {
                    Ok(_) => {}
                    Err(CliError::Validation(e)) => output::print_error(&e.to_string()),
                    Err(e) => {
                        tracing::warn!(mode = %mode, error = %e, "lookup failed");
                        output::print_error(&e.to_string());
                    }
                }
            }
            None => output::print_warning("Invalid option"),
        }
    }

    output::print_info("Goodbye");
    Ok(())
}

fn print_menu() {
    println!();
    println!("{}", style("lookout - OSINT reconnaissance").cyan().bold());
    for (index, mode) in Mode::ALL.iter().enumerate() {
        println!("  {} {} lookup", style(format!("[{}]", index + 1)).yellow(), mode);
    }
    println!("  {} History", style("[7]").yellow());
    println!("  {} Exit", style("[0]").yellow());
}

/// Print a prompt and read one line. `None` at end of input.
async fn prompt<R>(lines: &mut Lines<R>, label: &str) -> CliResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}: ", style(label).bold());
    std::io::stdout().flush()?;

    Ok(lines.next_line().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Lookup(Mode::Username)));
        assert_eq!(MenuChoice::parse(" 6 \n"), Some(MenuChoice::Lookup(Mode::Photo)));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::History));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("-1"), None);
        assert_eq!(MenuChoice::parse("email"), Some(MenuChoice::Lookup(Mode::Email)));
        assert_eq!(MenuChoice::parse("ph"), Some(MenuChoice::Lookup(Mode::Photo)));
        assert_eq!(MenuChoice::parse("fax"), None);
    }

    #[tokio::test]
    async fn test_prompt_reads_until_eof() {
        let input: &[u8] = b"3\nexample.com\n";
        let mut lines = BufReader::new(input).lines();

        assert_eq!(prompt(&mut lines, "Select option").await.unwrap().as_deref(), Some("3"));
        assert_eq!(
            prompt(&mut lines, "Enter domain").await.unwrap().as_deref(),
            Some("example.com")
        );
        assert_eq!(prompt(&mut lines, "Select option").await.unwrap(), None);
    }
}
