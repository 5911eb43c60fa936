use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use route53_ddns::error::Result;
use route53_ddns::logger::FileLogger;
use route53_ddns::syncer;

const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "route53.log";

/// Checks the public IP of this host against the A record of a Route 53 name
/// and upserts the record when they differ.
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Config file, defaults to config.json next to the executable
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Log file, defaults to route53.log next to the executable
    #[clap(short, long)]
    log_file: Option<PathBuf>,

    /// Minimum level written to the log file
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    log::set_max_level(args.log_level);

    let logger = match open_logger(&args) {
        Ok(logger) => logger,
        Err(e) => {
            // The log file is the only channel, so stderr is the last resort.
            eprintln!("route53-ddns: cannot open log file: {}", e);
            return e.exit_code();
        }
    };

    let config_path = match args.config {
        Some(path) => path,
        None => match exe_dir() {
            Ok(dir) => dir.join(CONFIG_FILE_NAME),
            Err(e) => {
                log::error!(logger: logger, "cannot locate executable directory: {}", e);
                return e.exit_code();
            }
        },
    };

    match syncer::run(&config_path, &logger).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(logger: logger, "{}", e);
            e.exit_code()
        }
    }
}

fn open_logger(args: &Args) -> Result<FileLogger> {
    FileLogger::open(log_file_path(args)?, args.log_level)
}

fn log_file_path(args: &Args) -> Result<PathBuf> {
    match &args.log_file {
        Some(path) => Ok(path.clone()),
        None => Ok(exe_dir()?.join(LOG_FILE_NAME)),
    }
}

fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .map(|dir| dir.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(dir)
}
