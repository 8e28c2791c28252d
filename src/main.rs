use minori::cli::{build_cli, build_logger, dispatch, parse_options, resolve_config};

fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    let options = parse_options(&matches)?;

    let config = match resolve_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = config.apply() {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(2);
    }

    let logger = build_logger(&config, &options);

    // Route tracing events from dependencies through the same stream.
    minori::init_tracing(logger.child("tracing"))?;

    dispatch(&logger, &options);
    Ok(())
}
