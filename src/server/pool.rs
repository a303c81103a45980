//! # Pool de Workers
//! src/server/pool.rs
//!
//! Pool acotado de threads que procesan conexiones aceptadas. Cada
//! worker toma trabajos de una cola compartida protegida con mutex y
//! condvar; cuando el pool está saturado, los trabajos esperan en la
//! cola a que se libere un worker (la cola no tiene límite explícito de
//! profundidad: el backlog del socket más esta cola absorben las
//! ráfagas).
//!
//! El shutdown es de mejor esfuerzo: no se acepta trabajo nuevo, pero lo
//! encolado y lo en vuelo corre hasta completarse.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::warn;

/// Unidad de trabajo: una conexión a manejar de punta a punta
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Estado compartido entre los workers y el pool
struct PoolShared {
    queue: Mutex<VecDeque<Job>>,
    condvar: Condvar,
    shutdown: AtomicBool,
}

/// Pool de tamaño fijo de workers
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Crea el pool y lanza `size` workers
    ///
    /// Cada worker atiende una conexión completa de forma síncrona antes
    /// de tomar la siguiente.
    pub fn new(size: usize) -> Self {
        let shared = Arc::new(PoolShared {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });

        let mut workers = Vec::with_capacity(size);
        for i in 0..size {
            let shared = Arc::clone(&shared);
            workers.push(thread::spawn(move || Self::worker_loop(i, shared)));
        }

        Self { shared, workers }
    }

    /// Loop de un worker: tomar trabajo, ejecutarlo, repetir
    ///
    /// Con shutdown activo el worker drena lo que quede en la cola y
    /// recién entonces termina.
    fn worker_loop(_id: usize, shared: Arc<PoolShared>) {
        loop {
            let job = {
                let mut queue = shared.queue.lock().unwrap();
                loop {
                    if let Some(job) = queue.pop_front() {
                        break job;
                    }
                    if shared.shutdown.load(Ordering::SeqCst) {
                        return;
                    }
                    queue = shared.condvar.wait(queue).unwrap();
                }
            };

            job();
        }
    }

    /// Encola un trabajo para el próximo worker libre
    ///
    /// Después del shutdown el trabajo se descarta con una advertencia.
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.shared.shutdown.load(Ordering::SeqCst) {
            warn!("pool en shutdown: trabajo descartado");
            return;
        }

        let mut queue = self.shared.queue.lock().unwrap();
        queue.push_back(Box::new(job));
        drop(queue);
        self.shared.condvar.notify_one();
    }

    /// Detiene el pool: deja de aceptar trabajo y espera a los workers
    ///
    /// Lo ya encolado se procesa completo antes de que los workers
    /// terminen.
    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        self.shared.condvar.notify_all();

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }

    /// Cantidad de workers del pool
    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
