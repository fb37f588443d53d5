use std::process::ExitCode;
use std::sync::Arc;

use lattice::config::Config;
use lattice::server::{self, ServeSettings};
use lattice::{logger, routes};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_fatal(&e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Worker count comes from config, otherwise one per CPU core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|&n| n > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::log_startup(&cfg);

    let dispatcher = Arc::new(routes::build()?);
    let listener = server::bind(&cfg.listen_addr()).await?;

    server::serve(
        listener,
        dispatcher,
        ServeSettings::from(&cfg),
        server::shutdown_signal(),
    )
    .await?;

    Ok(())
}
