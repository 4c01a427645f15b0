use dbhub_core::future::{BoxFuture, FutureExt};
use std::{env, future, process::Command, time::Duration};
use testcontainers_modules::{
    mysql::Mysql,
    testcontainers::{
        ContainerAsync, ImageExt,
        core::logs::{LogFrame, consumer::LogConsumer},
        runners::AsyncRunner,
    },
};

struct TestcontainersLogConsumer;
impl LogConsumer for TestcontainersLogConsumer {
    fn accept<'a>(&'a self, record: &'a LogFrame) -> BoxFuture<'a, ()> {
        let log = std::str::from_utf8(record.bytes())
            .unwrap_or("Invalid error message")
            .trim();
        future::ready(if !log.is_empty() {
            match record {
                LogFrame::StdOut(..) => log::trace!("{log}",),
                LogFrame::StdErr(..) => log::debug!("{log}"),
            }
        })
        .boxed()
    }
}

/// Url of the server to test against, `None` when neither `DBHUB_MYSQL_TEST` nor docker is available.
pub async fn init() -> Option<(String, Option<ContainerAsync<Mysql>>)> {
    if let Ok(url) = env::var("DBHUB_MYSQL_TEST") {
        return Some((url, None));
    };
    if !Command::new("docker")
        .arg("ps")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
    {
        log::warn!("Cannot access docker and DBHUB_MYSQL_TEST is not set, skipping");
        return None;
    }
    let container = Mysql::default()
        .with_startup_timeout(Duration::from_secs(90))
        .with_log_consumer(TestcontainersLogConsumer)
        .start()
        .await
        .expect("Could not start the container");
    let port = container
        .get_host_port_ipv4(3306)
        .await
        .expect("Cannot get the port of Mysql");
    Some((format!("mysql://root@127.0.0.1:{port}/test"), Some(container)))
}
