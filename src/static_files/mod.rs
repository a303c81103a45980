//! # Servidor de Archivos Estáticos
//! src/static_files/mod.rs
//!
//! Resuelve un path pedido contra el directorio raíz configurado y lee
//! el archivo completo en memoria antes de escribir el primer byte (no
//! hay lecturas parciales ni streaming).
//!
//! El path pedido no se sanitiza: una secuencia `..` escapa del
//! directorio raíz. Es una debilidad conocida, conservada por
//! compatibilidad con el comportamiento de referencia; una versión con
//! intención de producción debería canonicalizar y confinar a la raíz.

use crate::http::{mime, Response, StatusCode};
use std::fs;
use std::path::Path;

/// Página fija para archivos inexistentes
const NOT_FOUND_PAGE: &str = "<html><body><h1>File Not Found</h1></body></html>";

/// Sirve un archivo estático desde el directorio raíz
///
/// Si el archivo existe se responde 200 con el Content-Type inferido de
/// la extensión, `Content-length` igual al tamaño en bytes y el
/// contenido crudo. Si no existe, 404 con una página HTML fija.
///
/// El path se une a la raíz quitando el `/` inicial, de modo que
/// `/index.html` se resuelve dentro de la raíz y no como path absoluto.
pub fn serve(root: &str, requested: &str) -> Response {
    let relative = requested.trim_start_matches('/');
    let path = Path::new(root).join(relative);

    match fs::read(&path) {
        Ok(data) => Response::new(StatusCode::Ok)
            .with_header("Content-type", mime::content_type(requested))
            .with_file_body(data),
        Err(_) => Response::new(StatusCode::NotFound)
            .with_header("Content-type", "text/html")
            .with_body(NOT_FOUND_PAGE),
    }
}
