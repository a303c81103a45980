//! Tests de integración del servidor web
//!
//! Cada test levanta su propio servidor en un puerto efímero, con un
//! directorio de estáticos propio, y habla HTTP crudo por el socket
//! (un request por conexión: el cierre del servidor delimita la
//! respuesta).

use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use web_server::config::Config;
use web_server::router::Router;
use web_server::server::Server;
use web_server::services;

static NEXT_ROOT: AtomicUsize = AtomicUsize::new(0);

/// Crea un directorio de estáticos único con un index.html de prueba
fn static_root() -> PathBuf {
    let id = NEXT_ROOT.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "web_server_it_{}_{}",
        std::process::id(),
        id
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("index.html"),
        "<html><head><title>Inicio</title></head><body>hola</body></html>",
    )
    .unwrap();
    dir
}

/// Levanta un servidor con los servicios por defecto y retorna su dirección
fn start_server(root: &PathBuf) -> SocketAddr {
    let mut config = Config::default();
    config.port = 0;
    config.static_root = root.to_str().unwrap().to_string();

    let mut router = Router::new();
    router.register("/hello", services::hello_service);
    router.register("/echo", services::echo_service);

    let mut server = Server::new(config, router);
    let addr = server.bind().expect("bind del servidor");
    thread::spawn(move || {
        let _ = server.run();
    });
    addr
}

/// Envía un request crudo y retorna la respuesta completa como bytes
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream.write_all(raw).unwrap();
    stream.flush().unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

/// Versión string de `send_raw`
fn send_request(addr: SocketAddr, raw: &str) -> String {
    String::from_utf8_lossy(&send_raw(addr, raw.as_bytes())).into_owned()
}

/// Extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

#[test]
fn test_hello_service_get() {
    let root = static_root();
    let addr = start_server(&root);

    let response = send_request(addr, "GET /app/hello?name=sebas HTTP/1.1\r\n\r\n");

    assert!(response.contains("200 OK"), "got: {}", response);
    assert!(response.contains("Hola, sebas"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_hello_service_missing_name() {
    let root = static_root();
    let addr = start_server(&root);

    let response = send_request(addr, "GET /app/hello HTTP/1.1\r\n\r\n");

    assert!(response.contains("200 OK"));
    assert!(response.contains("Error: No se proporcionó ningún nombre."));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_echo_service_post() {
    let root = static_root();
    let addr = start_server(&root);

    let body = r#"{"text":"Test message"}"#;
    let raw = format!(
        "POST /app/echo HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let response = send_request(addr, &raw);

    assert!(response.contains("200 OK"));
    assert!(response.contains("Echo: Test message"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_unmatched_app_route_is_200() {
    let root = static_root();
    let addr = start_server(&root);

    let response = send_request(addr, "GET /app/otra HTTP/1.1\r\n\r\n");

    assert!(response.contains("200 OK"));
    assert!(response.contains("Error: Método no soportado"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_static_file_found() {
    let root = static_root();
    let expected = fs::read(root.join("index.html")).unwrap();
    let addr = start_server(&root);

    let response = send_raw(addr, b"GET /index.html HTTP/1.1\r\n\r\n");
    let text = String::from_utf8_lossy(&response).into_owned();

    assert!(text.contains("200 OK"));
    assert!(text.contains("Content-type: text/html"));
    assert!(text.contains(&format!("Content-length: {}", expected.len())));

    // El body debe ser byte a byte idéntico al archivo
    let body_start = text.find("\r\n\r\n").unwrap() + 4;
    assert_eq!(&response[body_start..], &expected[..]);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_static_file_not_found() {
    let root = static_root();
    let addr = start_server(&root);

    let response = send_request(addr, "GET /nonexistentfile.html HTTP/1.1\r\n\r\n");

    assert!(response.contains("404 Not Found"));
    assert!(extract_body(&response).contains("File Not Found"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_legacy_post_echoes_payload() {
    let root = static_root();
    let addr = start_server(&root);

    let response = send_request(addr, "POST /formulario HTTP/1.1\r\n\r\ncampo=valor\r\n\r\n");

    assert!(response.contains("200 OK"));
    assert!(response.contains("POST data received:"));
    assert!(response.contains("<p>campo=valor</p>"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_malformed_request_line_no_response() {
    let root = static_root();
    let addr = start_server(&root);

    let response = send_raw(addr, b"BASURA\r\n\r\n");
    assert!(response.is_empty());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_concurrent_requests_same_file() {
    const NUM_REQUESTS: usize = 8;

    let root = static_root();
    let addr = start_server(&root);

    let mut handles = Vec::new();
    for _ in 0..NUM_REQUESTS {
        handles.push(thread::spawn(move || {
            send_request(addr, "GET /index.html HTTP/1.1\r\n\r\n")
        }));
    }

    let responses: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for response in &responses {
        assert!(response.contains("200 OK"));
        assert!(response.contains("<title>Inicio</title>"));
    }
    // Todas las respuestas deben ser idénticas entre sí
    for response in &responses[1..] {
        assert_eq!(response, &responses[0]);
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_repeated_get_is_byte_identical() {
    let root = static_root();
    let addr = start_server(&root);

    let first = send_raw(addr, b"GET /index.html HTTP/1.1\r\n\r\n");
    let second = send_raw(addr, b"GET /index.html HTTP/1.1\r\n\r\n");

    assert!(!first.is_empty());
    assert_eq!(first, second);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_connection_closes_after_one_exchange() {
    let root = static_root();
    let addr = start_server(&root);

    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream
        .write_all(b"GET /app/hello?name=uno HTTP/1.1\r\n\r\n")
        .unwrap();

    // Sin cerrar la escritura: el servidor responde y cierra igual,
    // porque atiende un solo request por conexión
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert!(response.contains("Hola, uno"));

    let _ = fs::remove_dir_all(&root);
}
