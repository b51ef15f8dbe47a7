//! Line-oriented front end: turns typed commands into form actions and draws
//! the [`FormView`] as a text table.
//!
//! Rows are numbered from 1 on screen and from 0 inside the form.

use std::fmt::Write as _;

use thiserror::Error;

use crate::form::SalesForm;
use crate::types::{Column, FormView, InputField};

pub const HELP: &str = "\
commands:
  name <text> | qty <text> | price <text>   fill an input field
  add [<name>; <qty>; <price>]              click Add Item (optionally filling the fields first)
  select <row> [<row> ...]                  select grid rows
  delete                                    click Delete Selected
  edit <row> <item|qty|price> <text>        edit a cell in place
  list                                      redraw the form
  help                                      show this text
  quit                                      close the form";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetInput(InputField, String),
    Add(Option<[String; 3]>),
    Select(Vec<usize>),
    Delete,
    Edit { row: usize, column: Column, text: String },
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command {0:?} (type `help`)")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0:?} is not a row number")]
    BadRow(String),

    #[error("unknown column {0:?} (expected item, qty or price)")]
    BadColumn(String),
}

/// Parse one input line.
pub fn parse_action(line: &str) -> Result<Action, ConsoleError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "name" => Ok(Action::SetInput(InputField::ItemName, rest.to_string())),
        "qty" | "quantity" => Ok(Action::SetInput(InputField::Quantity, rest.to_string())),
        "price" => Ok(Action::SetInput(InputField::Price, rest.to_string())),
        "add" if rest.is_empty() => Ok(Action::Add(None)),
        "add" => {
            let parts: Vec<&str> = rest.split(';').collect();
            match parts.as_slice() {
                [name, qty, price] => Ok(Action::Add(Some([
                    name.to_string(),
                    qty.to_string(),
                    price.to_string(),
                ]))),
                _ => Err(ConsoleError::Usage("add [<name>; <qty>; <price>]")),
            }
        }
        "select" => {
            let rows = rest
                .split_whitespace()
                .map(parse_row)
                .collect::<Result<Vec<_>, _>>()?;
            if rows.is_empty() {
                return Err(ConsoleError::Usage("select <row> [<row> ...]"));
            }
            Ok(Action::Select(rows))
        }
        "delete" | "del" => Ok(Action::Delete),
        "edit" => {
            let usage = ConsoleError::Usage("edit <row> <item|qty|price> <text>");
            let (row, rest) = rest.split_once(char::is_whitespace).ok_or(usage.clone())?;
            let (column, text) = match rest.trim().split_once(char::is_whitespace) {
                Some((column, text)) => (column, text.trim()),
                None => (rest.trim(), ""),
            };
            if column.is_empty() {
                return Err(usage);
            }
            Ok(Action::Edit {
                row: parse_row(row)?,
                column: parse_column(column)?,
                text: text.to_string(),
            })
        }
        "list" | "" => Ok(Action::List),
        "help" | "?" => Ok(Action::Help),
        "quit" | "exit" => Ok(Action::Quit),
        _ => Err(ConsoleError::UnknownCommand(command.to_string())),
    }
}

fn parse_row(text: &str) -> Result<usize, ConsoleError> {
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ConsoleError::BadRow(text.to_string())),
    }
}

fn parse_column(text: &str) -> Result<Column, ConsoleError> {
    match text.to_ascii_lowercase().as_str() {
        "item" | "name" => Ok(Column::Item),
        "qty" | "quantity" => Ok(Column::Quantity),
        "price" => Ok(Column::Price),
        "amount" => Ok(Column::Amount),
        _ => Err(ConsoleError::BadColumn(text.to_string())),
    }
}

/// Apply an action to the form. Returns the text to print, if any.
///
/// `Quit` is left to the caller.
pub fn dispatch(form: &mut SalesForm, action: Action) -> Option<String> {
    // A pending notification is modal; the next action acknowledges it.
    form.dismiss_notification();

    match action {
        Action::SetInput(field, text) => {
            form.set_input(field, text);
            None
        }
        Action::Add(fields) => {
            if let Some([name, qty, price]) = fields {
                form.set_input(InputField::ItemName, name);
                form.set_input(InputField::Quantity, qty);
                form.set_input(InputField::Price, price);
            }
            let _ = form.click_add();
            Some(render(&form.view()))
        }
        Action::Select(rows) => {
            form.select_rows(rows);
            Some(render(&form.view()))
        }
        Action::Delete => {
            form.click_delete_selected();
            Some(render(&form.view()))
        }
        Action::Edit { row, column, text } => match form.edit_cell(row, column, &text) {
            Ok(()) => Some(render(&form.view())),
            Err(crate::form::FormError::Validation(_)) => Some(render(&form.view())),
            Err(err) => Some(err.to_string()),
        },
        Action::List => Some(render(&form.view())),
        Action::Help => Some(HELP.to_string()),
        Action::Quit => None,
    }
}

/// Draw the form as a fixed-width text table.
pub fn render(view: &FormView) -> String {
    let headers = [
        Column::Item.header(),
        Column::Quantity.header(),
        Column::Price.header(),
        Column::Amount.header(),
    ];
    let cells: Vec<[&str; 4]> = view
        .rows
        .iter()
        .map(|row| [row.item.as_str(), row.quantity.as_str(), row.price.as_str(), row.amount.as_str()])
        .collect();

    let mut widths = headers.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "     {:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    for (i, (row, cell)) in view.rows.iter().zip(&cells).enumerate() {
        let marker = if row.selected { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker}{:>3} {:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}",
            i + 1,
            cell[0],
            cell[1],
            cell[2],
            cell[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
    }
    let _ = writeln!(out, "{:>4} (new row)", "*");
    let _ = write!(out, "{}", view.total_label);

    if let Some(note) = &view.notification {
        let _ = write!(out, "\n[{}] {}", note.title, note.message);
    }
    out
}
