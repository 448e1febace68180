use log::error;

use pnx_cli::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logger with custom format for the installer
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse_args();
    if let Err(e) = pnx_cli::pipeline::run(&cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
