mod mock;

pub use mock::*;
#[doc(hidden)]
pub use log;

use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = $crate::log::max_level();
        $crate::log::set_max_level($crate::log::LevelFilter::Off);
        let result = { $($code)+ };
        $crate::log::set_max_level(level);
        result
    }};
}
