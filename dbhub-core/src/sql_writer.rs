use crate::{Order, SelectStatement, separated_by};
use std::fmt::Write;

pub trait SqlWriter {
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', r#""""#);
        out.push('"');
    }

    /// Placeholder for the parameter at `index`, starting from 1.
    fn write_placeholder(&self, out: &mut String, _index: usize) {
        out.push('?');
    }

    fn write_select(&self, out: &mut String, select: &SelectStatement) {
        out.push_str("SELECT ");
        if select.columns.is_empty() {
            out.push('*');
        } else {
            separated_by(
                out,
                &select.columns,
                |out, v| self.write_identifier_quoted(out, v),
                ", ",
            );
        }
        out.push_str("\nFROM ");
        self.write_identifier_quoted(out, &select.table);
        if !select.filters.is_empty() {
            out.push_str("\nWHERE ");
            separated_by(
                out,
                select.filters.iter().enumerate(),
                |out, (i, v)| {
                    self.write_identifier_quoted(out, v);
                    out.push_str(" = ");
                    self.write_placeholder(out, i + 1);
                },
                " AND ",
            );
        }
        if !select.order_by.is_empty() {
            out.push_str("\nORDER BY ");
            separated_by(
                out,
                &select.order_by,
                |out, (column, order)| {
                    self.write_identifier_quoted(out, column);
                    out.push_str(match order {
                        Order::ASC => " ASC",
                        Order::DESC => " DESC",
                    });
                },
                ", ",
            );
        }
        if let Some(limit) = select.limit {
            let _ = write!(out, "\nLIMIT {}", limit);
        }
    }
}

/// Writer with ANSI quoting and `?` placeholders.
#[derive(Default, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for GenericSqlWriter {}
