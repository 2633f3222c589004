//! # Screen Commands
//!
//! One line of input, one command.
//!
//! ```text
//! add <id> <price> <stock> <qty> <name...>   put a product in the cart
//! remove <row>                               remove the row shown as <row>
//! remove id <id>                             remove the row of product <id>
//! client <id>                                select the client
//! total | show | clear | submit | help | quit
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::str::SplitWhitespace;

use termomaz_core::{Identifier, Money, ProductOffer};

use crate::error::AppError;

/// Help text printed by `help`.
pub const HELP: &str = "\
Commands:
  add <id> <price> <stock> <qty> <name...>  add a product (price like 250.00)
  remove <row>                              remove a row by its number
  remove id <id>                            remove a product by id
  client <id>                               select the client for the order
  total                                     show the cart total
  show                                      redraw the cart
  clear                                     empty the cart
  submit                                    create the order
  help                                      show this text
  quit                                      leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { offer: ProductOffer, quantity: i64 },
    /// 1-based row number as drawn on screen.
    RemoveRow(usize),
    RemoveId(Identifier),
    Client(String),
    Total,
    Show,
    Clear,
    Submit,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. `Ok(None)` for lines with nothing to do.
    pub fn parse(line: &str) -> Result<Option<Command>, AppError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();

        let command = match verb.as_str() {
            "add" => parse_add(&mut words)?,
            "remove" | "rm" => parse_remove(&mut words)?,
            "client" => {
                let id = words.collect::<Vec<_>>().join(" ");
                if id.is_empty() {
                    return Err(AppError::invalid_command("Usage: client <id>"));
                }
                Command::Client(id)
            }
            "total" => Command::Total,
            "show" => Command::Show,
            "clear" => Command::Clear,
            "submit" => Command::Submit,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(AppError::invalid_command(format!(
                    "Unknown command '{}'. Type 'help' for the list.",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn parse_add(words: &mut SplitWhitespace<'_>) -> Result<Command, AppError> {
    const USAGE: &str = "Usage: add <id> <price> <stock> <qty> <name...>";

    let (Some(id), Some(price), Some(stock), Some(quantity)) =
        (words.next(), words.next(), words.next(), words.next())
    else {
        return Err(AppError::invalid_command(USAGE));
    };
    let name = words.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(AppError::invalid_command(USAGE));
    }

    let price: Money = price
        .parse()
        .map_err(|e| AppError::invalid_command(format!("Invalid price: {}", e)))?;
    let stock: i64 = stock
        .parse()
        .map_err(|_| AppError::invalid_command(format!("Invalid stock '{}'", stock)))?;
    let quantity: i64 = quantity.parse().map_err(|_| {
        AppError::invalid_command(format!("Quantity must be a whole number, got '{}'", quantity))
    })?;

    Ok(Command::Add {
        offer: ProductOffer::new(Identifier::from_input(id), name, price, stock),
        quantity,
    })
}

fn parse_remove(words: &mut SplitWhitespace<'_>) -> Result<Command, AppError> {
    const USAGE: &str = "Usage: remove <row> | remove id <id>";

    match (words.next(), words.next()) {
        (Some("id"), Some(id)) => Ok(Command::RemoveId(Identifier::from_input(id))),
        (Some(row), None) => match row.parse::<usize>() {
            Ok(0) => Err(AppError::invalid_command("Rows are numbered from 1")),
            Ok(row) => Ok(Command::RemoveRow(row)),
            Err(_) => Err(AppError::invalid_command(USAGE)),
        },
        _ => Err(AppError::invalid_command(USAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse("add 1 250.00 100 2 Termo Acero 500ml"),
            Command::Add {
                offer: ProductOffer::new(1_i64, "Termo Acero 500ml", Money::from_cents(25000), 100),
                quantity: 2,
            }
        );
    }

    #[test]
    fn test_parse_add_keeps_non_positive_quantity_for_the_cart() {
        assert!(matches!(parse("add A 10 5 0 Widget"), Command::Add { quantity: 0, .. }));
        assert!(matches!(parse("add A 10 5 -2 Widget"), Command::Add { quantity: -2, .. }));
    }

    #[test]
    fn test_parse_add_errors() {
        let err = Command::parse("add A 10 5 2").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);

        let err = Command::parse("add A ten 5 2 Widget").unwrap_err();
        assert!(err.message.starts_with("Invalid price"));

        let err = Command::parse("add A 10 5 1.5 Widget").unwrap_err();
        assert!(err.message.contains("whole number"));
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(parse("remove 2"), Command::RemoveRow(2));
        assert_eq!(parse("rm 1"), Command::RemoveRow(1));
        assert_eq!(parse("remove id SKU-9"), Command::RemoveId(Identifier::from("SKU-9")));
        assert_eq!(parse("remove id 7"), Command::RemoveId(Identifier::from(7_i64)));

        assert!(Command::parse("remove 0").is_err());
        assert!(Command::parse("remove").is_err());
        assert!(Command::parse("remove x").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("client 3"), Command::Client("3".into()));
        assert_eq!(parse("TOTAL"), Command::Total);
        assert_eq!(parse("submit"), Command::Submit);
        assert_eq!(parse("quit"), Command::Quit);
        assert!(Command::parse("client").is_err());
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# stock check").unwrap(), None);
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse("pay 10").unwrap_err();
        assert!(err.message.contains("'pay'"));
    }
}
