//! IsotrakIO - serial driver daemon for Polhemus Isotrak motion trackers
//!
//! Opens the tracker's serial port, configures continuous metric
//! position + quaternion output, and prints one pose line per decoded
//! record on stdout. Status transitions and retry countdowns go to stderr
//! through the logger, keeping stdout a clean pose stream.

use isotrak_io::config::AppConfig;
use isotrak_io::driver::IsotrakDriver;
use isotrak_io::pose::Pose;
use isotrak_io::session::Session;
use isotrak_io::transport::SerialTransport;
use std::env;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Parse the command line: one required positional serial port, plus an
/// optional `--config <path>` (or `-c <path>`) TOML file.
fn parse_args() -> (String, Option<String>) {
    let args: Vec<String> = env::args().collect();

    let mut port = None;
    let mut config_path = None;
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if i + 1 >= args.len() {
                usage(&args[0]);
            }
            config_path = Some(args[i + 1].clone());
            i += 2;
        } else if !args[i].starts_with('-') && port.is_none() {
            port = Some(args[i].clone());
            i += 1;
        } else {
            usage(&args[0]);
        }
    }

    match port {
        Some(port) => (port, config_path),
        None => usage(&args[0]),
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <serial-port> [--config <path>]", program);
    process::exit(2);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (port, config_path) = parse_args();

    let mut config = match config_path {
        Some(path) => match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                process::exit(1);
            }
        },
        None => AppConfig::isotrak_defaults(),
    };
    config.serial.port = port;

    log::info!("IsotrakIO v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Station {} on {} at {} baud",
        config.tracker.station,
        config.serial.port,
        config.serial.baud_rate
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        flag.store(true, Ordering::Relaxed);
    }) {
        log::error!("Error setting Ctrl-C handler: {}", e);
        process::exit(1);
    }

    let transport = SerialTransport::new(&config.serial.port, config.serial.baud_rate);
    let driver = IsotrakDriver::new(transport, &config.tracker.station);
    let mut session = Session::new(
        driver,
        config.session.retry_interval(),
        |pose: &Pose| println!("{}", pose),
    );

    session.run(&shutdown);

    log::info!("IsotrakIO stopped");
}
