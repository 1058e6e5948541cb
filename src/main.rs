//! # DLR Receiver - Entry Point
//! src/main.rs
//!
//! Punto de entrada del receptor. stdout queda reservado para el eco de
//! lo recibido; los logs van a stderr (nivel con `RUST_LOG`).

use dlr_receiver::config::Config;
use dlr_receiver::server::Server;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=================================");
    log::info!("  DLR Receiver");
    log::info!("=================================");

    // Un puerto inválido termina acá, antes de crear el socket
    let config = Config::new();

    if let Err(e) = config.validate() {
        log::error!("💥 Configuración inválida: {}", e);
        std::process::exit(2);
    }

    config.print_summary();

    if let Err(e) = run(config) {
        log::error!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

/// El `Server` se suelta (y cierra el socket) antes de salir del proceso
fn run(config: Config) -> std::io::Result<()> {
    let mut server = Server::bind(config)?;
    server.run()
}
