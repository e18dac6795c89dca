use std::io;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, format::Format};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fedem_driver=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fedem_driver=info"))
    }
}

/// 日誌寫到 stderr，stdout 留給 --json 報告
fn base_layer<S>() -> fmt::Layer<S, fmt::format::DefaultFields, Format, fn() -> io::Stderr>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(io::stderr as fn() -> io::Stderr)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(base_layer().compact())
        .init();
}

/// 服務環境下使用 JSON 格式，方便日誌收集
pub fn init_service_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(base_layer().json())
        .init();
}
