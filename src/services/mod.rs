//! # Servicios de Ejemplo
//! src/services/mod.rs
//!
//! Colaboradores externos del servidor: se registran contra el router
//! durante la fase de configuración y retornan el cuerpo completo de la
//! respuesta como string.
//!
//! - `/app/hello?name=X` (GET): saludo en texto plano
//! - `/app/echo` (POST): devuelve el campo `"text"` del body

use crate::http::request::{query_param, url_decode};
use regex::Regex;
use std::sync::OnceLock;

/// Servicio de saludo para GET `/app/hello?name=X`
///
/// Recibe el path crudo (query incluida). Con `name` presente responde
/// `Hola, <name>`; sin nombre responde un mensaje de error fijo, siempre
/// con status 200 a nivel de transporte.
pub fn hello_service(request: &str) -> String {
    let name = query_param(request, "name");

    if !name.is_empty() {
        format!("Hola, {}", url_decode(&name))
    } else {
        "Error: No se proporcionó ningún nombre.".to_string()
    }
}

/// Servicio de eco para POST `/app/echo`
///
/// Recibe el body crudo del request y extrae el campo `"text"` con un
/// match permisivo, no con un parser JSON completo: cualquier body que
/// contenga `"text": "..."` sirve.
pub fn echo_service(request: &str) -> String {
    if request.is_empty() {
        return "Error: No se proporcionó ningún mensaje.".to_string();
    }

    static TEXT_FIELD: OnceLock<Regex> = OnceLock::new();
    let pattern = TEXT_FIELD.get_or_init(|| {
        Regex::new(r#""text"\s*:\s*"(.*?)""#).expect("patrón de campo text inválido")
    });

    let text = match pattern.captures(request).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().to_string(),
        None => "Error: Campo 'text' no encontrado".to_string(),
    };

    format!("Echo: {}", text)
}
