#[cfg(test)]
mod tests {
    use dbhub_core::{GenericSqlWriter, Order, SelectStatement, SqlWriter};
    use indoc::indoc;

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    #[test]
    fn select_all() {
        let mut out = String::new();
        WRITER.write_select(
            &mut out,
            &SelectStatement {
                table: "accounts".into(),
                ..Default::default()
            },
        );
        assert_eq!(out, "SELECT *\nFROM \"accounts\"");
    }

    #[test]
    fn select_complete() {
        let mut out = String::new();
        WRITER.write_select(
            &mut out,
            &SelectStatement {
                table: "users".into(),
                columns: vec!["id".into(), "name".into()],
                filters: vec!["active".into(), "role".into()],
                order_by: vec![("name".into(), Order::ASC), ("id".into(), Order::DESC)],
                limit: Some(10),
            },
        );
        assert_eq!(
            out,
            indoc! {r#"
                SELECT "id", "name"
                FROM "users"
                WHERE "active" = ? AND "role" = ?
                ORDER BY "name" ASC, "id" DESC
                LIMIT 10
            "#}
            .trim()
        );
    }

    #[test]
    fn identifier_escaping() {
        let mut out = String::new();
        WRITER.write_identifier_quoted(&mut out, r#"odd"name"#);
        assert_eq!(out, r#""odd""name""#);
        let mut out = String::new();
        WRITER.write_identifier_quoted(&mut out, "città\"é");
        assert_eq!(out, "\"città\"\"é\"");
    }
}
