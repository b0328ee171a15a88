//! Interactive numbered menu
//!
//! Reads one choice per line and dispatches to the same handlers the
//! subcommands use. Bad input and failed operations are reported and the
//! loop continues; option 9 or end of input leaves the menu.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::error::BookstoreResult;
use crate::models::{parse_price, BookId};

use super::{book, confirm, handle_backup_command, Context};

const MENU: &str = "
1. Add a new book
2. List all books
3. Update a book's price
4. Remove a book
5. Search books by author
6. Export data to CSV
7. Import data from CSV
8. Back up the database
9. Exit
10. Clear all data
11. Generate PDF report
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Add,
    List,
    UpdatePrice,
    Delete,
    Search,
    Export,
    Import,
    Backup,
    Exit,
    Clear,
    Report,
}

impl MenuAction {
    fn from_choice(choice: &str) -> Option<Self> {
        let action = match choice.trim() {
            "1" => Self::Add,
            "2" => Self::List,
            "3" => Self::UpdatePrice,
            "4" => Self::Delete,
            "5" => Self::Search,
            "6" => Self::Export,
            "7" => Self::Import,
            "8" => Self::Backup,
            "9" => Self::Exit,
            "10" => Self::Clear,
            "11" => Self::Report,
            _ => return None,
        };
        Some(action)
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(ctx: &Context, input: &mut R, out: &mut W) -> io::Result<()> {
    loop {
        write!(out, "{}", MENU)?;
        let Some(choice) = prompt(input, out, "Choose: ")? else {
            break;
        };

        let Some(action) = MenuAction::from_choice(&choice) else {
            writeln!(out, "Invalid option.")?;
            continue;
        };

        match run_action(ctx, action, input, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => {
                tracing::error!(?action, error = %e, "menu action failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    Ok(())
}

fn run_action<R: BufRead, W: Write>(
    ctx: &Context,
    action: MenuAction,
    input: &mut R,
    out: &mut W,
) -> BookstoreResult<Flow> {
    match action {
        MenuAction::Add => {
            let Some(title) = prompt(input, out, "Title: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(author) = prompt(input, out, "Author: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(year) = prompt(input, out, "Publication year (optional): ")? else {
                return Ok(Flow::Exit);
            };
            let Some(price) = prompt(input, out, "Price: ")? else {
                return Ok(Flow::Exit);
            };

            match parse_price(&price) {
                Some(price) => book::handle_add(ctx, out, &title, &author, Some(&year), price)?,
                None => writeln!(out, "Invalid price.")?,
            }
        }

        MenuAction::List => book::handle_list(ctx, out)?,

        MenuAction::UpdatePrice => {
            let Some(id) = prompt(input, out, "Book ID: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(price) = prompt(input, out, "New price: ")? else {
                return Ok(Flow::Exit);
            };

            match (id.parse::<BookId>(), parse_price(&price)) {
                (Ok(id), Some(price)) => book::handle_update_price(ctx, out, id, price)?,
                _ => writeln!(out, "Invalid input.")?,
            }
        }

        MenuAction::Delete => {
            let Some(id) = prompt(input, out, "Book ID: ")? else {
                return Ok(Flow::Exit);
            };

            match id.parse::<BookId>() {
                Ok(id) => book::handle_delete(ctx, out, id)?,
                Err(_) => writeln!(out, "Invalid ID.")?,
            }
        }

        MenuAction::Search => {
            let Some(author) = prompt(input, out, "Author (or part of the name): ")? else {
                return Ok(Flow::Exit);
            };
            book::handle_search(ctx, out, &author)?;
        }

        MenuAction::Export => book::handle_export(ctx, out, None)?,

        MenuAction::Import => {
            let Some(path) = prompt(input, out, "CSV path: ")? else {
                return Ok(Flow::Exit);
            };
            book::handle_import(ctx, out, Path::new(&path))?;
        }

        MenuAction::Backup => handle_backup_command(ctx, out, None)?,

        MenuAction::Exit => return Ok(Flow::Exit),

        MenuAction::Clear => {
            let confirmed = confirm(input, out, "Are you sure you want to delete all data?")?;
            book::handle_clear(ctx, out, confirmed)?;
        }

        MenuAction::Report => book::handle_report(ctx, out, None)?,
    }

    Ok(Flow::Continue)
}

/// Print a label and read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
