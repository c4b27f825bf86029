use filmstrip_viewer::app;
use filmstrip_viewer::config::ViewerConfig;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("filmstrip_viewer=info".parse().unwrap()),
        )
        .init();

    let config = match ViewerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("Usage: filmstrip-viewer [--unsorted] [--preload N] [--max-dimension PX] [FOLDER]");
            std::process::exit(2);
        }
    };

    tracing::info!("Starting with {:?}", config);

    app::run(config)
}
