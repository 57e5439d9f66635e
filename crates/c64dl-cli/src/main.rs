use c64dl_core::config::ConfigOrigin;
use c64dl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse_args();

    let resolved = cli.resolve_config();
    let log_file = match &resolved {
        Ok((cfg, _)) => cfg.log_file.clone(),
        Err(_) => None,
    };
    if let Err(err) = logging::init_logging(log_file.as_deref()) {
        logging::init_logging_stdout();
        tracing::warn!("log file unavailable, logging to stdout: {:#}", err);
    }

    // Failures are reported through the log; the exit status stays 0.
    let cfg = match resolved {
        Ok((cfg, origin)) => {
            match origin {
                ConfigOrigin::Loaded(path) => {
                    tracing::debug!("loaded config from {}", path.display())
                }
                ConfigOrigin::Created(path) => {
                    tracing::info!("created default config at {}", path.display())
                }
                ConfigOrigin::Builtin(err) => {
                    tracing::warn!("config file unavailable, using built-in defaults: {:#}", err)
                }
            }
            cfg
        }
        Err(err) => {
            tracing::error!("configuration error: {:#}", err);
            return;
        }
    };
    cli.dispatch(&cfg);
}
