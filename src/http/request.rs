//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser incremental sobre el stream de la conexión. A diferencia de un
//! parser sobre un buffer fijo, aquí la request line y los headers se
//! leen primero y el body se lee después, solo cuando la clasificación
//! del request lo pide (rutas POST de aplicación).
//!
//! ## Formato esperado
//!
//! ```text
//! GET /path?param1=value1&param2=value2 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Length: 21\r\n
//! \r\n
//! (body de Content-Length bytes)
//! ```
//!
//! `Content-Length` se busca con comparación sensible a mayúsculas: solo
//! esa escritura exacta determina el largo del body.

use std::io::{BufRead, Read};
use thiserror::Error;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,
}

impl Method {
    fn from_token(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
///
/// Ante cualquiera de estos errores el manejador de la conexión aborta
/// sin escribir respuesta alguna.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Request line con menos de dos tokens
    #[error("request line inválida")]
    InvalidRequestLine,

    /// Método HTTP distinto de GET/POST
    #[error("método HTTP no soportado: {0}")]
    UnsupportedMethod(String),

    /// Header sin separador ':'
    #[error("header inválido: {0}")]
    InvalidHeader(String),

    /// Error de E/S leyendo el stream
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Representa un request parseado, con vida limitada a su conexión
///
/// Los headers se conservan en orden de llegada. El body queda vacío
/// hasta que alguien llame a [`Request::read_body`].
#[derive(Debug)]
pub struct Request {
    method: Method,
    raw_path: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl Request {
    /// Lee y parsea la request line y los headers desde el stream
    ///
    /// Retorna `Ok(None)` si el peer cerró la conexión sin enviar nada.
    /// La request line se separa por espacios; con menos de dos tokens el
    /// request es malformado.
    ///
    /// # Ejemplo
    /// ```
    /// use std::io::Cursor;
    /// use web_server::http::{Method, Request};
    ///
    /// let mut stream = Cursor::new(b"GET /hello?name=ana HTTP/1.1\r\nHost: x\r\n\r\n".to_vec());
    /// let request = Request::read_head(&mut stream).unwrap().unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.raw_path(), "/hello?name=ana");
    /// assert_eq!(request.header("Host"), Some("x"));
    /// ```
    pub fn read_head<R: BufRead>(reader: &mut R) -> Result<Option<Self>, ParseError> {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_token(tokens[0])?;
        let raw_path = tokens[1].to_string();
        let headers = read_headers(reader)?;

        Ok(Some(Request {
            method,
            raw_path,
            headers,
            body: None,
        }))
    }

    /// Lee exactamente `content_length` bytes del stream como body
    ///
    /// Bloquea hasta completar el largo declarado; si el peer abandona la
    /// conexión antes, retorna el error de E/S correspondiente.
    pub fn read_body<R: Read>(
        &mut self,
        reader: &mut R,
        content_length: usize,
    ) -> std::io::Result<&str> {
        let mut buffer = vec![0u8; content_length];
        reader.read_exact(&mut buffer)?;
        let body = String::from_utf8_lossy(&buffer).into_owned();
        self.body = Some(body);
        Ok(self.body.as_deref().unwrap_or(""))
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path crudo, query string incluida
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// Obtiene los headers en orden de llegada
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header específico (comparación exacta del nombre)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Largo del body declarado por el header `Content-Length`
    ///
    /// La búsqueda es sensible a mayúsculas: `content-length` no cuenta.
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
    }

    /// Obtiene el body, si ya fue leído
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Consume líneas de headers hasta la línea en blanco o el fin del stream
fn read_headers<R: BufRead>(reader: &mut R) -> Result<Vec<(String, String)>, ParseError> {
    let mut headers = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            // Stream agotado: los headers terminan aquí
            break;
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }

        match trimmed.split_once(':') {
            Some((name, value)) => {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
            None => return Err(ParseError::InvalidHeader(trimmed.to_string())),
        }
    }

    Ok(headers)
}

/// Extrae el valor de un query parameter de un path crudo
///
/// Semántica de split ingenuo, reproducida a propósito:
/// - La query es el texto entre el primer y el segundo `?`.
/// - Cada par se separa en `&`; el valor es el segmento entre el primer
///   y el segundo `=` del par (un valor que contiene `=` queda truncado).
/// - Retorna el primer valor cuya clave coincida; string vacío si la
///   clave no está, no tiene valor, o no hay query string.
///
/// # Ejemplo
/// ```
/// use web_server::http::request::query_param;
///
/// assert_eq!(query_param("/app/hello?name=sebas", "name"), "sebas");
/// assert_eq!(query_param("/app/hello?a=1&b=2", "b"), "2");
/// assert_eq!(query_param("/app/hello", "name"), "");
/// ```
pub fn query_param(raw_path: &str, name: &str) -> String {
    let query = match raw_path.split('?').nth(1) {
        Some(q) => q,
        None => return String::new(),
    };

    for pair in query.split('&') {
        let mut parts = pair.split('=');
        let key = parts.next().unwrap_or("");
        if key == name {
            return parts.next().unwrap_or("").to_string();
        }
    }

    String::new()
}

/// Decodifica una URL de forma básica (%20 y '+' a espacio)
pub fn url_decode(s: &str) -> String {
    s.replace("%20", " ").replace('+', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn head_of(raw: &[u8]) -> Request {
        let mut cursor = Cursor::new(raw.to_vec());
        Request::read_head(&mut cursor).unwrap().unwrap()
    }

    #[test]
    fn test_parse_simple_get() {
        let request = head_of(b"GET / HTTP/1.1\r\n\r\n");

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.raw_path(), "/");
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_parse_preserves_query_in_raw_path() {
        let request = head_of(b"GET /app/hello?name=sebas HTTP/1.1\r\n\r\n");

        assert_eq!(request.raw_path(), "/app/hello?name=sebas");
    }

    #[test]
    fn test_parse_with_headers_in_order() {
        let request = head_of(b"GET / HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: test\r\n\r\n");

        assert_eq!(request.header("Host"), Some("localhost:8080"));
        assert_eq!(request.header("User-Agent"), Some("test"));
        assert_eq!(request.headers()[0].0, "Host");
        assert_eq!(request.headers()[1].0, "User-Agent");
    }

    #[test]
    fn test_content_length_case_sensitive() {
        let request = head_of(b"POST /x HTTP/1.1\r\nContent-Length: 5\r\n\r\n");
        assert_eq!(request.content_length(), Some(5));

        let request = head_of(b"POST /x HTTP/1.1\r\ncontent-length: 5\r\n\r\n");
        assert_eq!(request.content_length(), None);
    }

    #[test]
    fn test_read_body_exact_length() {
        let raw = b"POST /app/echo HTTP/1.1\r\nContent-Length: 21\r\n\r\n{\"text\":\"hola mundo\"}";
        let mut cursor = Cursor::new(raw.to_vec());
        let mut request = Request::read_head(&mut cursor).unwrap().unwrap();

        let len = request.content_length().unwrap();
        let body = request.read_body(&mut cursor, len).unwrap();
        assert_eq!(body, "{\"text\":\"hola mundo\"}");
        assert_eq!(request.body(), Some("{\"text\":\"hola mundo\"}"));
    }

    #[test]
    fn test_read_body_truncated_stream_fails() {
        let raw = b"POST /x HTTP/1.1\r\nContent-Length: 100\r\n\r\ncorto";
        let mut cursor = Cursor::new(raw.to_vec());
        let mut request = Request::read_head(&mut cursor).unwrap().unwrap();

        assert!(request.read_body(&mut cursor, 100).is_err());
    }

    #[test]
    fn test_empty_stream_returns_none() {
        let mut cursor = Cursor::new(Vec::new());
        let result = Request::read_head(&mut cursor).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_request_line_too_short() {
        let mut cursor = Cursor::new(b"GET\r\n\r\n".to_vec());
        let result = Request::read_head(&mut cursor);
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
    }

    #[test]
    fn test_unsupported_method() {
        let mut cursor = Cursor::new(b"DELETE /x HTTP/1.1\r\n\r\n".to_vec());
        let result = Request::read_head(&mut cursor);
        assert!(matches!(result, Err(ParseError::UnsupportedMethod(_))));
    }

    #[test]
    fn test_header_without_colon() {
        let mut cursor = Cursor::new(b"GET / HTTP/1.1\r\nsin separador\r\n\r\n".to_vec());
        let result = Request::read_head(&mut cursor);
        assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_headers_end_at_stream_exhaustion() {
        // Sin línea en blanco final: los headers terminan con el stream
        let request = head_of(b"GET / HTTP/1.1\r\nHost: x\r\n");
        assert_eq!(request.header("Host"), Some("x"));
    }

    // === query_param ===

    #[test]
    fn test_query_param_basic() {
        assert_eq!(query_param("/app/hello?name=sebas", "name"), "sebas");
    }

    #[test]
    fn test_query_param_missing_query_string() {
        assert_eq!(query_param("/app/hello", "name"), "");
    }

    #[test]
    fn test_query_param_multiple_pairs() {
        assert_eq!(query_param("/app/hello?a=1&b=2", "b"), "2");
        assert_eq!(query_param("/app/hello?a=1&b=2", "a"), "1");
    }

    #[test]
    fn test_query_param_absent_key() {
        assert_eq!(query_param("/app/hello?a=1", "b"), "");
    }

    #[test]
    fn test_query_param_key_without_value() {
        assert_eq!(query_param("/x?debug", "debug"), "");
        assert_eq!(query_param("/x?debug=", "debug"), "");
    }

    #[test]
    fn test_query_param_value_truncated_at_second_equals() {
        // Split ingenuo: "a=b=c" entrega "b"
        assert_eq!(query_param("/x?k=b=c", "k"), "b");
    }

    #[test]
    fn test_query_param_first_match_wins() {
        assert_eq!(query_param("/x?k=uno&k=dos", "k"), "uno");
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("hola%20mundo"), "hola mundo");
        assert_eq!(url_decode("hola+mundo"), "hola mundo");
        assert_eq!(url_decode("simple"), "simple");
    }
}
