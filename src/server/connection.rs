//! # Manejo de Conexiones
//! src/server/connection.rs
//!
//! Orquesta una conexión de cliente de punta a punta, como una máquina
//! de estados:
//!
//! ```text
//! ReadRequestLine → ReadHeaders → Classify
//!     → { Dispatch(App) | Dispatch(StaticGET) | Dispatch(StaticPOST) }
//!     → WriteResponse → Closed
//! ```
//!
//! La clasificación es excluyente: un request va a ruta de aplicación
//! (prefijo `/app`) o al servidor de archivos estáticos, nunca a ambos.
//! Se atiende un request por conexión y el socket se cierra al terminar.

use crate::http::{Method, ParseError, Request, Response, StatusCode};
use crate::router::Router;
use crate::static_files;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use tracing::{debug, info};

/// Namespace de las rutas de aplicación
const APP_PREFIX: &str = "/app";

/// Cuerpo fijo para rutas de aplicación sin servicio registrado
///
/// Comportamiento heredado: se responde 200 con este mensaje, no 404/405.
const UNSUPPORTED_ROUTE: &str = "Error: Método no soportado";

/// Maneja una conexión completa: parsear, clasificar, despachar, responder
///
/// Un request malformado (request line de menos de dos tokens, método
/// desconocido o header inválido) aborta la conexión sin escribir
/// respuesta. Los errores de E/S se propagan al worker, que los loguea;
/// nunca tumban el loop de aceptación ni afectan otras conexiones.
pub fn handle(stream: TcpStream, router: &Router, static_root: &str) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    let mut request = match Request::read_head(&mut reader) {
        Ok(Some(request)) => request,
        Ok(None) => return Ok(()),
        Err(ParseError::Io(e)) => return Err(e),
        Err(e) => {
            // Request malformado: abortar sin respuesta
            debug!("request malformado, conexión abortada: {}", e);
            return Ok(());
        }
    };

    info!("{} {}", request.method().as_str(), request.raw_path());

    let response = if request.raw_path().starts_with(APP_PREFIX) {
        dispatch_app(&mut reader, &mut request, router)?
    } else {
        match request.method() {
            Method::GET => static_files::serve(static_root, request.raw_path()),
            Method::POST => legacy_post(&mut reader)?,
        }
    };

    writer.write_all(&response.to_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Despacha una ruta de aplicación contra el registro de servicios
///
/// El prefijo `/app` se quita antes de buscar por prefijo. Una ruta GET
/// recibe el path crudo completo (query incluida); una ruta POST recibe
/// el body, leído con el largo exacto que declara `Content-Length` (cero
/// si el header no está).
fn dispatch_app<R: BufRead>(
    reader: &mut R,
    request: &mut Request,
    router: &Router,
) -> std::io::Result<Response> {
    let stripped = request
        .raw_path()
        .strip_prefix(APP_PREFIX)
        .unwrap_or(request.raw_path())
        .to_string();

    let body = match router.lookup(&stripped) {
        Some(service) => match request.method() {
            Method::GET => service.handle(request.raw_path()),
            Method::POST => {
                let content_length = request.content_length().unwrap_or(0);
                request.read_body(reader, content_length)?;
                service.handle(request.body().unwrap_or(""))
            }
        },
        None => UNSUPPORTED_ROUTE.to_string(),
    };

    Ok(Response::new(StatusCode::Ok)
        .with_header("Content-type", "text/plain")
        .with_body(&body))
}

/// POST fuera del namespace `/app`: eco del payload en una página HTML
///
/// El payload se acumula leyendo líneas hasta una línea en blanco o el
/// fin del stream, y se incrusta sin escapar en el HTML (comportamiento
/// de compatibilidad, no una buena práctica: quien necesite salida
/// segura debe escapar antes de incrustar).
fn legacy_post<R: BufRead>(reader: &mut R) -> std::io::Result<Response> {
    let mut payload = String::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        payload.push_str(trimmed);
    }

    let html = format!(
        "<html><body><h1>POST data received:</h1>\r\n<p>{}</p>\r\n</body></html>",
        payload
    );

    Ok(Response::new(StatusCode::Ok)
        .with_header("Content-type", "text/html")
        .with_body(&html))
}
