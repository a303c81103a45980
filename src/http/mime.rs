//! # Resolución de Tipos MIME
//! src/http/mime.rs
//!
//! Mapea la extensión del archivo pedido a su Content-Type. La
//! comparación es por sufijo y sensible a mayúsculas: `foto.JPG` no
//! coincide con `.jpg` y cae al tipo por defecto.

/// Obtiene el Content-Type según la extensión del path pedido
///
/// Extensiones reconocidas: `.html`, `.css`, `.js`, `.png`, `.jpg`.
/// Cualquier otra cosa retorna `text/plain`.
///
/// # Ejemplo
/// ```
/// use web_server::http::mime::content_type;
/// assert_eq!(content_type("/index.html"), "text/html");
/// assert_eq!(content_type("/notas.txt"), "text/plain");
/// ```
pub fn content_type(requested: &str) -> &'static str {
    if requested.ends_with(".html") {
        "text/html"
    } else if requested.ends_with(".css") {
        "text/css"
    } else if requested.ends_with(".js") {
        "application/javascript"
    } else if requested.ends_with(".png") {
        "image/png"
    } else if requested.ends_with(".jpg") {
        "image/jpeg"
    } else {
        "text/plain"
    }
}
