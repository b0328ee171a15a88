//! Book CLI commands
//!
//! One handler per inventory operation. Soft outcomes (not found, nothing to
//! report) are printed; hard errors are returned to the caller.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::display::{format_book_line, format_book_table};
use crate::error::BookstoreResult;
use crate::models::{parse_year, BookId, NewBook};

use super::Context;

/// Add a book. An unparseable year is stored as unknown.
pub fn handle_add<W: Write>(
    ctx: &Context,
    out: &mut W,
    title: &str,
    author: &str,
    year: Option<&str>,
    price: f64,
) -> BookstoreResult<()> {
    let book = NewBook::new(title, author, year.and_then(parse_year), price);
    let id = ctx.inventory().add(&book)?;
    writeln!(out, "Book added with id {}", id)?;
    Ok(())
}

/// List all books
pub fn handle_list<W: Write>(ctx: &Context, out: &mut W) -> BookstoreResult<()> {
    let books = ctx.inventory().list()?;
    if books.is_empty() {
        writeln!(out, "No books registered.")?;
    } else {
        writeln!(out, "{}", format_book_table(&books))?;
    }
    Ok(())
}

/// Change a book's price
pub fn handle_update_price<W: Write>(
    ctx: &Context,
    out: &mut W,
    id: BookId,
    price: f64,
) -> BookstoreResult<()> {
    let inventory = ctx.inventory();
    if inventory.update_price(id, price)? {
        writeln!(out, "Price updated.")?;
        if let Some(book) = inventory.get(id)? {
            writeln!(out, "  {}", format_book_line(&book))?;
        }
    } else {
        writeln!(out, "Book not found: {}", id)?;
    }
    Ok(())
}

/// Delete a book
pub fn handle_delete<W: Write>(ctx: &Context, out: &mut W, id: BookId) -> BookstoreResult<()> {
    if ctx.inventory().delete(id)? {
        writeln!(out, "Book removed.")?;
    } else {
        writeln!(out, "Book not found: {}", id)?;
    }
    Ok(())
}

/// Search books by author substring
pub fn handle_search<W: Write>(ctx: &Context, out: &mut W, author: &str) -> BookstoreResult<()> {
    let books = ctx.inventory().search_by_author(author)?;
    if books.is_empty() {
        writeln!(out, "No books found for that author.")?;
    } else {
        writeln!(out, "{}", format_book_table(&books))?;
    }
    Ok(())
}

/// Export to CSV
pub fn handle_export<W: Write>(
    ctx: &Context,
    out: &mut W,
    output: Option<PathBuf>,
) -> BookstoreResult<()> {
    let target = ctx.export_target(output, &ctx.settings.export_file);
    let path = ctx.inventory().export_csv(&target)?;
    writeln!(out, "Exported to {}", path.display())?;
    Ok(())
}

/// Import from CSV
pub fn handle_import<W: Write>(ctx: &Context, out: &mut W, file: &Path) -> BookstoreResult<()> {
    let summary = ctx.inventory().import_csv(file)?;
    writeln!(out, "{} rows imported.", summary.imported)?;
    if summary.degraded > 0 {
        writeln!(
            out,
            "{} row(s) had unparseable fields replaced by defaults.",
            summary.degraded
        )?;
    }
    Ok(())
}

/// Generate the PDF report
pub fn handle_report<W: Write>(
    ctx: &Context,
    out: &mut W,
    output: Option<PathBuf>,
) -> BookstoreResult<()> {
    let target = ctx.export_target(output, &ctx.settings.report_file);
    match ctx.inventory().render_report(&target)? {
        Some(path) => writeln!(out, "Report generated at {}", path.display())?,
        None => writeln!(out, "There are no books to report on.")?,
    }
    Ok(())
}

/// Remove every book, once the caller has confirmed
pub fn handle_clear<W: Write>(ctx: &Context, out: &mut W, confirmed: bool) -> BookstoreResult<()> {
    if !confirmed {
        writeln!(out, "Operation cancelled.")?;
        return Ok(());
    }

    let removed = ctx.inventory().clear_all()?;
    writeln!(out, "All books were removed from the database ({} deleted).", removed)?;
    Ok(())
}
