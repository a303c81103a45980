//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Lógica del servidor TCP: loop de aceptación, pool fijo de workers y
//! manejo de cada conexión de punta a punta.

pub mod connection;
pub mod pool;
pub mod tcp;

pub use pool::WorkerPool;
pub use tcp::Server;
