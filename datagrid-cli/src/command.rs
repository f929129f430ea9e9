//! Line commands read from stdin.

use datagrid_lib::model::Column;
use datagrid_lib::query::Direction;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  filter <column> [value|-] [asc|desc]   set a name filter; '-' or no value clears it
  sort <column> [asc|desc]               sort by any column; without a direction,
                                         step through ascending, descending, unsorted
  unsort                                 clear the sort
  page <n>                               go to page n (1-based)
  next | prev | first | last             page navigation
  size <n>                               rows per page: 10, 20, 30, 40 or 50
  reset                                  clear filters and sort, back to page 1
  refresh                                run the current query again
  select <row>...                        select rows of the current page (1-based)
  toggle <row>                           toggle one row
  toggle-all                             select or deselect the whole page
  state                                  print the table now
  help                                   show this list
  quit                                   exit

Columns: firstName, lastName, age, visits, progress";

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter {
        column: Column,
        value: Option<String>,
        sort: Option<Direction>,
    },
    Sort {
        column: Column,
        direction: Direction,
    },
    CycleSort(Column),
    Unsort,
    /// 1-based page number.
    Page(usize),
    Next,
    Prev,
    First,
    Last,
    Size(usize),
    Reset,
    Refresh,
    /// 1-based rows of the current page.
    Select(Vec<usize>),
    Toggle(usize),
    ToggleAll,
    State,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{0}' cannot be filtered")]
    NotFilterable(Column),

    #[error("Invalid direction '{0}', expected 'asc' or 'desc'")]
    InvalidDirection(String),

    #[error("Invalid number '{0}', expected a positive integer")]
    InvalidNumber(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("filter" | "f", [column, rest @ ..]) if rest.len() <= 2 => {
                let column = parse_column(column)?;
                if !column.is_filterable() {
                    return Err(CommandError::NotFilterable(column));
                }
                let value = rest.first().filter(|value| **value != "-");
                let sort = rest.get(1).map(|word| parse_direction(word)).transpose()?;
                Command::Filter {
                    column,
                    value: value.map(|value| value.to_string()),
                    sort,
                }
            }
            ("filter" | "f", _) => return Err(usage("filter", "<column> [value|-] [asc|desc]")),
            ("sort", [column, direction]) => Command::Sort {
                column: parse_column(column)?,
                direction: parse_direction(direction)?,
            },
            ("sort", [column]) => Command::CycleSort(parse_column(column)?),
            ("sort", _) => return Err(usage("sort", "<column> [asc|desc]")),
            ("unsort", []) => Command::Unsort,
            ("page" | "p", [number]) => Command::Page(parse_number(number)?),
            ("page" | "p", _) => return Err(usage("page", "a page number")),
            ("next" | "n", []) => Command::Next,
            ("prev" | "previous", []) => Command::Prev,
            ("first", []) => Command::First,
            ("last", []) => Command::Last,
            ("size", [size]) => Command::Size(parse_number(size)?),
            ("size", _) => return Err(usage("size", "a page size")),
            ("reset", []) => Command::Reset,
            ("refresh", []) => Command::Refresh,
            ("select", rows) if !rows.is_empty() => Command::Select(
                rows.iter()
                    .map(|row| parse_number(row))
                    .collect::<Result<_, _>>()?,
            ),
            ("select", _) => return Err(usage("select", "one or more row numbers")),
            ("toggle", [row]) => Command::Toggle(parse_number(row)?),
            ("toggle", _) => return Err(usage("toggle", "a row number")),
            ("toggle-all", []) => Command::ToggleAll,
            ("state", []) => Command::State,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(Some(command))
    }
}

fn usage(command: &'static str, expected: &'static str) -> CommandError {
    CommandError::Usage { command, expected }
}

/// Accepts wire keys in any case (`firstname`, `firstName`).
fn parse_column(word: &str) -> Result<Column, CommandError> {
    Column::ALL
        .into_iter()
        .find(|column| column.key().eq_ignore_ascii_case(word))
        .ok_or_else(|| CommandError::UnknownColumn(word.to_string()))
}

fn parse_direction(word: &str) -> Result<Direction, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "asc" => Ok(Direction::Asc),
        "desc" => Ok(Direction::Desc),
        _ => Err(CommandError::InvalidDirection(word.to_string())),
    }
}

fn parse_number(word: &str) -> Result<usize, CommandError> {
    match word.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(CommandError::InvalidNumber(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_filter_forms() {
        assert_eq!(
            parse("filter firstName Ada"),
            Command::Filter {
                column: Column::FirstName,
                value: Some("Ada".to_string()),
                sort: None,
            }
        );
        assert_eq!(
            parse("filter lastname - desc"),
            Command::Filter {
                column: Column::LastName,
                value: None,
                sort: Some(Direction::Desc),
            }
        );
        assert_eq!(
            parse("f firstName"),
            Command::Filter {
                column: Column::FirstName,
                value: None,
                sort: None,
            }
        );
    }

    #[test]
    fn test_filter_errors() {
        assert_eq!(
            Command::parse("filter age 3"),
            Err(CommandError::NotFilterable(Column::Age))
        );
        assert_eq!(
            Command::parse("filter nickname Ada"),
            Err(CommandError::UnknownColumn("nickname".to_string()))
        );
        assert_eq!(
            Command::parse("filter firstName Ada up"),
            Err(CommandError::InvalidDirection("up".to_string()))
        );
        assert!(matches!(
            Command::parse("filter"),
            Err(CommandError::Usage { command: "filter", .. })
        ));
    }

    #[test]
    fn test_sort_and_navigation() {
        assert_eq!(
            parse("sort age desc"),
            Command::Sort {
                column: Column::Age,
                direction: Direction::Desc,
            }
        );
        assert_eq!(parse("sort lastName"), Command::CycleSort(Column::LastName));
        assert!(Command::parse("sort").is_err());
        assert_eq!(parse("unsort"), Command::Unsort);
        assert_eq!(parse("refresh"), Command::Refresh);
        assert_eq!(parse("page 3"), Command::Page(3));
        assert_eq!(parse("NEXT"), Command::Next);
        assert_eq!(parse("prev"), Command::Prev);
        assert_eq!(parse("size 20"), Command::Size(20));
        assert_eq!(parse("quit"), Command::Quit);
    }

    #[test]
    fn test_numbers_are_one_based() {
        assert_eq!(
            Command::parse("page 0"),
            Err(CommandError::InvalidNumber("0".to_string()))
        );
        assert_eq!(
            Command::parse("toggle x"),
            Err(CommandError::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn test_selection() {
        assert_eq!(parse("select 1 3 5"), Command::Select(vec![1, 3, 5]));
        assert_eq!(parse("toggle 2"), Command::Toggle(2));
        assert_eq!(parse("toggle-all"), Command::ToggleAll);
        assert!(Command::parse("select").is_err());
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            Command::parse("frobnicate now"),
            Err(CommandError::Unknown("frobnicate now".to_string()))
        );
        assert_eq!(
            Command::parse("next 2"),
            Err(CommandError::Unknown("next 2".to_string()))
        );
    }
}
