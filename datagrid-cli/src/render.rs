//! Text rendering of table snapshots.

use datagrid_lib::controller::TableSnapshot;
use datagrid_lib::model::Column;
use datagrid_lib::model::Record;

const SEPARATOR: &str = "  ";

/// Renders the table, its footer and the state dump.
pub fn snapshot(snapshot: &TableSnapshot) -> String {
    let mut lines = table(snapshot);
    lines.push(String::new());
    lines.extend(footer(snapshot));
    if let Ok(json) = snapshot.query().to_json_pretty() {
        lines.push(String::new());
        lines.push(json);
    }
    lines.join("\n")
}

fn table(snapshot: &TableSnapshot) -> Vec<String> {
    let page = snapshot.page();

    let mut header = vec![header_checkbox(snapshot).to_string(), "#".to_string()];
    header.extend(Column::ALL.iter().map(|&column| header_label(snapshot, column)));

    let rows: Vec<Vec<String>> = page
        .iter()
        .enumerate()
        .map(|(index, record)| row(snapshot, index, record))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    if let Some(filters) = filter_line(snapshot) {
        lines.push(filters);
    }
    lines.push(format_row(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    );
    if rows.is_empty() {
        lines.push("(no rows)".to_string());
    }
    lines.extend(rows.iter().map(|row| format_row(row, &widths)));
    lines
}

fn row(snapshot: &TableSnapshot, index: usize, record: &Record) -> Vec<String> {
    let mark = if snapshot.selection.contains(record.id()) {
        "[x]"
    } else {
        "[ ]"
    };
    let mut cells = vec![mark.to_string(), (index + 1).to_string()];
    cells.extend(Column::ALL.iter().map(|&column| record.cell(column)));
    cells
}

/// The header checkbox: checked, indeterminate or empty.
fn header_checkbox(snapshot: &TableSnapshot) -> &'static str {
    let selected = snapshot.selected_rows().len();
    if selected == 0 {
        "[ ]"
    } else if selected == snapshot.page().len() {
        "[x]"
    } else {
        "[-]"
    }
}

fn header_label(snapshot: &TableSnapshot, column: Column) -> String {
    match &snapshot.sort {
        Some(sort) if sort.id == column.key() => {
            let arrow = if sort.desc { "v" } else { "^" };
            format!("{} {}", column.header(), arrow)
        }
        _ => column.header().to_string(),
    }
}

fn filter_line(snapshot: &TableSnapshot) -> Option<String> {
    if snapshot.filters.is_empty() {
        return None;
    }
    let filters: Vec<String> = snapshot
        .filters
        .iter()
        .filter_map(|filter| filter.value().map(|value| format!("{} = {}", filter.id, value)))
        .collect();
    Some(format!("Filters: {}", filters.join(", ")))
}

/// Cells are column 0 = checkbox, 1 = row number, then data columns.
fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (cell, &width))| {
            let right_aligned = match index {
                0 => false,
                1 => true,
                _ => Column::ALL[index - 2].is_numeric(),
            };
            if right_aligned {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .trim_end()
        .to_string()
}

fn footer(snapshot: &TableSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    if snapshot.loading {
        lines.push("Loading...".to_string());
    } else {
        let total = snapshot.total_count();
        let noun = if total == 1 { "record" } else { "records" };
        lines.push(format!("Found {} {}", total, noun));
    }

    let nav = |enabled: bool, label: &'static str| {
        if enabled && snapshot.is_settled() {
            label
        } else {
            "  "
        }
    };
    lines.push(format!(
        "{} {} Page {} of {} {} {}  |  Show {}",
        nav(snapshot.can_previous_page(), "<<"),
        nav(snapshot.can_previous_page(), "<"),
        snapshot.page_index + 1,
        snapshot.page_count(),
        nav(snapshot.can_next_page(), ">"),
        nav(snapshot.can_next_page(), ">>"),
        snapshot.page_size,
    ));

    let selected = snapshot.selected_rows().len();
    if selected > 0 {
        lines.push(format!("{} row(s) selected", selected));
    }
    if let Some(error) = &snapshot.error {
        if error.is_retryable() {
            lines.push(format!("Error: {} (type 'refresh' to retry)", error));
        } else {
            lines.push(format!("Error: {}", error));
        }
    }
    lines
}
