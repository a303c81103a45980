//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor. La fase de configuración corre en un
//! solo thread: se parsea la configuración, se registran los servicios
//! contra el router y recién entonces arranca el listener. Después de
//! eso el router y la raíz de estáticos son de solo lectura.

use web_server::config::Config;
use web_server::router::Router;
use web_server::server::Server;
use web_server::services;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=================================");
    println!("  Web Server HTTP/1.1");
    println!("=================================\n");

    let config = Config::new();
    if let Err(e) = config.validate() {
        eprintln!("Configuración inválida: {}", e);
        std::process::exit(1);
    }
    config.print_summary();

    // Fase de configuración: registrar servicios antes de escuchar
    let mut router = Router::new();
    router.register("/hello", services::hello_service);
    router.register("/echo", services::echo_service);

    let mut server = Server::new(config, router);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
