//! # Módulo HTTP
//!
//! Este módulo implementa lo mínimo del protocolo HTTP/1.1 que el servidor
//! necesita, sin librerías de alto nivel:
//!
//! - Parsing incremental de requests (request line, headers, body)
//! - Extracción de query parameters
//! - Construcción de responses
//! - Status codes y resolución de tipos MIME
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! (body opcional)
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-type: text/html\r\n
//! Content-length: 13\r\n
//! \r\n
//! <html>...</html>
//! ```
//!
//! El servidor atiende un request por conexión: no hay keep-alive ni
//! chunked transfer encoding.

pub mod mime;
pub mod request;
pub mod response;
pub mod status;

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
