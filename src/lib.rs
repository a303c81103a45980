//! # Web Server
//! src/lib.rs
//!
//! Servidor web HTTP/1.1 concurrente implementado desde cero: acepta
//! conexiones simultáneas con un pool fijo de workers, sirve archivos
//! estáticos desde un directorio configurable y despacha rutas de
//! aplicación (`/app/...`) a servicios registrados durante la fase de
//! configuración.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests, construcción de responses, status codes y MIME
//! - `server`: Loop de aceptación, pool de workers y manejo de conexiones
//! - `router`: Registro de servicios y búsqueda por prefijo
//! - `static_files`: Resolución y lectura de archivos estáticos
//! - `services`: Servicios de ejemplo (saludo y echo)
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_server::config::Config;
//! use web_server::router::Router;
//! use web_server::server::Server;
//! use web_server::services;
//!
//! let config = Config::default();
//! let mut router = Router::new();
//! router.register("/hello", services::hello_service);
//! router.register("/echo", services::echo_service);
//!
//! let mut server = Server::new(config, router);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod services;
pub mod static_files;
