use livetype::Config;
use livetype::log_init::init_logger;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("livetype: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> livetype::Result<()> {
    let config = Config::from_env()?;
    if let Some(path) = &config.log_path {
        init_logger(path)?;
    }
    log::debug!("livetype: starting with {config:?}");
    livetype::run(config)
}
