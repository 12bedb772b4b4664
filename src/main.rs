use color_eyre::Result;
use joybridge::config::BridgeConfig;
use joybridge::device::{SinkAdapter, UinputJoystick};
use joybridge::stream::BridgeHandle;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = BridgeConfig::load_or_default()?;
    config.validate()?;

    info!("Starting telemetry to virtual joystick bridge");
    info!("Telemetry source: {}", config.source.describe());

    let sink = UinputJoystick::create(&config.device.name)?;
    let adapter = SinkAdapter::new(Box::new(sink), config.scaling.stick, config.scaling.wheel);

    let handle = BridgeHandle::spawn(&config.source, adapter)?;

    let cancel = handle.cancellation_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(_) => {
                info!("Ctrl-C received, stopping bridge");
                cancel.cancel();
            }
            Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    handle.join().await?;
    info!("Bridge stopped");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
