use dbhub_core::SqlWriter;

#[derive(Default)]
pub struct MySQLSqlWriter {}

impl SqlWriter for MySQLSqlWriter {
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }
}
