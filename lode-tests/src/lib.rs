mod errors;
mod lifecycle;
mod ordering;
mod scores;
mod transaction1;
mod types;
mod values;

use crate::{
    errors::errors,
    lifecycle::lifecycle,
    ordering::ordering,
    scores::scores,
    transaction1::transaction1,
    types::types,
    values::values,
};
use lode::Connection;
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

pub fn execute_tests(connection: &Connection) {
    types(connection);
    values(connection);
    ordering(connection);
    lifecycle(connection);
    scores(connection);
    transaction1(connection);
    errors(connection);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
