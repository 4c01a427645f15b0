#[cfg(test)]
mod tests {
    use dbhub::{Order, SelectStatement, SqlWriter};
    use dbhub_mysql::MySQLSqlWriter;
    use indoc::indoc;

    #[test]
    fn select_with_backticks() {
        let mut out = String::new();
        MySQLSqlWriter::default().write_select(
            &mut out,
            &SelectStatement {
                table: "user`s".into(),
                columns: vec!["id".into(), "name".into()],
                filters: vec!["active".into()],
                order_by: vec![("name".into(), Order::ASC)],
                limit: Some(1),
            },
        );
        assert_eq!(
            out,
            indoc! {"
                SELECT `id`, `name`
                FROM `user``s`
                WHERE `active` = ?
                ORDER BY `name` ASC
                LIMIT 1
            "}
            .trim()
        );
    }
}
