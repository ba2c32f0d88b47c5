use log::LevelFilter;

/// Target used for records that report a finished piece of work.
pub const SUCCESS_TARGET: &str = "success";

/// Logs at info level under the [`SUCCESS_TARGET`] target.
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        ::log::info!(target: $crate::logger::SUCCESS_TARGET, $($arg)+)
    };
}

pub fn init_default_logger() {
    let mut builder = pretty_env_logger::formatted_timed_builder();

    builder
        .filter_level(LevelFilter::Info)
        .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.init();
}
