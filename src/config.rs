//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor web con soporte
//! para argumentos CLI y variables de entorno.
//!
//! La configuración se construye una sola vez al inicio, antes de que
//! arranque el listener; después de eso nadie la muta.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server --port 8080 --static-root ./www --workers 10
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 STATIC_ROOT=./www ./web_server
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor web HTTP/1.1 concurrente con archivos estáticos y servicios de aplicación")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz de archivos estáticos
    #[arg(long = "static-root", default_value = "./www", env = "STATIC_ROOT")]
    pub static_root: String,

    /// Número de workers del pool de conexiones
    #[arg(long, default_value = "10", env = "WORKERS")]
    pub workers: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use web_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }
        if self.static_root.trim().is_empty() {
            return Err("Static root must not be empty".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔═══════════════════════════════════════════╗");
        println!("║        Web Server Configuration           ║");
        println!("╚═══════════════════════════════════════════╝");
        println!();
        println!("   Address:      {}", self.address());
        println!("   Static root:  {}", self.static_root);
        println!("   Workers:      {}", self.workers);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            static_root: "./www".to_string(),
            workers: 10,
        }
    }
}
