use lampu_tui::{catalog, config, logging, run, Config};

fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", config::USAGE);
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }

    let result = catalog::validate().and_then(|()| {
        tracing::debug!("catalog validated");
        run::run(&config)
    });
    if let Err(e) = result {
        tracing::error!(error = %e, "run failed");
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}
