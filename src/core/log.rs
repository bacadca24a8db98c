use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_MAX_WIDTH: usize = 60;

/// ANSI colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "login" => Colour::Green,
        "logout" => Colour::Red,
        "clock-in" | "clock-out" => Colour::Cyan,
        "lunch-start" | "lunch-end" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn op_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

/// Cut to `max` visible chars, keeping only the operation word coloured.
fn render_op(row: &LogRow, max: usize) -> String {
    let color = color_for_operation(&row.operation);
    let visible = op_target(row);
    let visible = if visible.chars().count() > max {
        let mut s: String = visible.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub struct LogLogic;

impl LogLogic {
    /// Lines of the internal log, formatted for the terminal.
    pub fn render(pool: &DbPool) -> AppResult<Vec<String>> {
        let rows = load_log(&pool.conn)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let op_w = rows
            .iter()
            .map(|r| op_target(r).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_MAX_WIDTH);
        let id_w = rows
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);
        let dates: Vec<String> = rows.iter().map(|r| display_date(&r.date)).collect();
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(0);

        let lines = rows
            .iter()
            .zip(dates)
            .map(|(row, date)| {
                let op = render_op(row, OP_MAX_WIDTH);
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op).chars().count()));
                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    row.id,
                    date,
                    op,
                    padding,
                    row.message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect();

        Ok(lines)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let lines = Self::render(pool)?;
        println!("📜 Internal log:\n");
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::log::ttlog;

    #[test]
    fn long_targets_are_truncated() {
        let row = LogRow {
            id: 1,
            date: String::new(),
            operation: "login".into(),
            target: "x".repeat(100),
            message: String::new(),
        };
        let out = strip_ansi(&render_op(&row, 20));
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
        assert!(out.starts_with("login ("));
    }

    #[test]
    fn rendered_lines_have_no_ansi_in_message() {
        let pool = DbPool::in_memory().unwrap();
        ttlog(&pool.conn, "login", "u1", "Logged in").unwrap();
        let lines = LogLogic::render(&pool).unwrap();
        let last = strip_ansi(lines.last().unwrap());
        assert!(last.contains("login (u1)"));
        assert!(last.ends_with("=> Logged in"));
    }
}
