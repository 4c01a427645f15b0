#[cfg(test)]
mod tests {
    use dbhub::{
        ConnectOptions, Driver, Value, list_tables_mysql, list_tables_postgres,
    };
    use dbhub_tests::{MockConnection, MockDriver, init_logs};

    async fn connection(driver: &MockDriver, dialect: &str, uri: &str) -> MockConnection {
        init_logs();
        driver
            .connect(ConnectOptions::new(dialect, uri))
            .await
            .expect("Could not connect")
    }

    #[tokio::test]
    async fn postgres_lists_catalog_tables() {
        let driver = MockDriver::new().with_tables("shop", ["orders", "customers"]);
        let connection = connection(&driver, "postgres", "postgres://host/shop").await;
        let tables = list_tables_postgres(&connection, "shop")
            .await
            .expect("Could not list the tables");
        assert_eq!(tables, ["orders", "customers"]);

        let queries = driver.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].sql.starts_with("SELECT table_name FROM"));
        assert!(queries[0].sql.contains("table_catalog = $1"));
        assert!(queries[0].sql.contains("table_schema = current_schema()"));
        assert_eq!(queries[0].params, [Value::from("shop")]);
    }

    #[tokio::test]
    async fn postgres_rejects_rows_without_table_name() {
        let driver = MockDriver::new().with_tables("shop", ["orders"]);
        driver.set_discovery_label(Some("TABLE_NAME"));
        let connection = connection(&driver, "postgres", "postgres://host/shop").await;
        let error = list_tables_postgres(&connection, "shop")
            .await
            .expect_err("Should have failed");
        let message = error.to_string();
        assert!(message.contains("`table_name`"), "{}", message);
        assert!(message.contains("TABLE_NAME"), "{}", message);
    }

    #[tokio::test]
    async fn mysql_lists_schema_tables() {
        let driver = MockDriver::new().with_tables("shop", ["orders"]);
        let connection = connection(&driver, "mysql", "mysql://host/shop").await;
        let tables = list_tables_mysql(&connection, "shop")
            .await
            .expect("Could not list the tables");
        assert_eq!(tables, ["orders"]);

        let queries = driver.queries();
        assert!(queries[0].sql.contains("TABLE_SCHEMA = ?"));
        assert_eq!(queries[0].params, [Value::from("shop")]);
    }

    #[tokio::test]
    async fn mysql_rejects_rows_without_table_name() {
        let driver = MockDriver::new().with_tables("shop", ["orders"]);
        driver.set_discovery_label(Some("name"));
        let connection = connection(&driver, "mysql", "mysql://host/shop").await;
        let error = list_tables_mysql(&connection, "shop")
            .await
            .expect_err("Should have failed");
        assert!(error.to_string().contains("`TABLE_NAME`"));
    }

    #[tokio::test]
    async fn other_schema_has_no_tables() {
        let driver = MockDriver::new().with_tables("shop", ["orders"]);
        let connection = connection(&driver, "postgres", "postgres://host/shop").await;
        let tables = list_tables_postgres(&connection, "archive")
            .await
            .expect("Could not list the tables");
        assert!(tables.is_empty());
    }
}
