//! # Loop del Servidor TCP
//! src/server/tcp.rs
//!
//! Enlaza el socket de escucha, acepta conexiones indefinidamente y
//! entrega cada una al pool fijo de workers. El flag de ejecución
//! permite pedir el apagado desde afuera: al quedar en falso no se
//! aceptan conexiones nuevas (recién después de que el `accept()`
//! bloqueante en curso retorne) y las conexiones en vuelo corren hasta
//! completarse.

use crate::config::Config;
use crate::router::Router;
use crate::server::{connection, WorkerPool};
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

/// Servidor HTTP/1.1 concurrente
///
/// El router y la raíz de estáticos se congelan al construir el
/// servidor: toda la registración ocurre antes, en fase de configuración
/// de un solo thread, así los workers los leen sin sincronización.
pub struct Server {
    config: Config,
    router: Arc<Router>,
    running: Arc<AtomicBool>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor con su configuración y el router ya poblado
    pub fn new(config: Config, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
            running: Arc::new(AtomicBool::new(true)),
            listener: None,
        }
    }

    /// Enlaza el socket de escucha y retorna la dirección local
    ///
    /// Separado de `run` para que los tests puedan enlazar el puerto 0 y
    /// conocer el puerto efímero asignado.
    pub fn bind(&mut self) -> std::io::Result<SocketAddr> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        let local = listener.local_addr()?;
        info!("servidor escuchando en {}", local);
        self.listener = Some(listener);
        Ok(local)
    }

    /// Acepta conexiones hasta que el flag de ejecución se apague
    ///
    /// Cada conexión aceptada se entrega al pool; los errores de una
    /// conexión se loguean en su worker y no afectan al resto.
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self.listener.as_ref().expect("listener enlazado");

        let mut pool = WorkerPool::new(self.config.workers);
        info!("pool de {} workers listo", pool.size());

        for stream in listener.incoming() {
            if !self.running.load(Ordering::SeqCst) {
                info!("flag de ejecución apagado: no se aceptan más conexiones");
                break;
            }

            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    let static_root = self.config.static_root.clone();
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "desconocido".to_string());

                    pool.execute(move || {
                        if let Err(e) = connection::handle(stream, &router, &static_root) {
                            error!("error de E/S en la conexión {}: {}", peer, e);
                        }
                    });
                }
                Err(e) => {
                    error!("error al aceptar conexión: {}", e);
                }
            }
        }

        // Drenar lo encolado y esperar a los workers
        pool.shutdown();
        Ok(())
    }

    /// Pide el apagado: no se aceptarán conexiones nuevas
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Handle clonable del flag de ejecución, para apagar desde otro thread
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }
}
