//! # Registro de Rutas de Aplicación
//! src/router/mod.rs
//!
//! Mapea prefijos de path a servicios registrados. El registro se llena
//! una sola vez durante la fase de configuración, antes de que arranque
//! el listener; después solo se lee, compartido vía `Arc` entre los
//! workers, así que las búsquedas no toman ningún lock.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router::lookup → Service → body de la respuesta
//! ```

/// Contrato de un servicio de aplicación
///
/// Un servicio recibe una representación cruda del request (el path con
/// query string para rutas GET, el body para rutas POST) y retorna el
/// string que será el cuerpo completo de la respuesta.
pub trait Service: Send + Sync {
    fn handle(&self, request: &str) -> String;
}

/// Cualquier función o closure `Fn(&str) -> String` sirve como servicio
impl<F> Service for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn handle(&self, request: &str) -> String {
        self(request)
    }
}

/// Router que mapea prefijos de path a servicios
pub struct Router {
    /// Rutas en orden de registro
    routes: Vec<(String, Box<dyn Service>)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra un servicio bajo un path
    ///
    /// Si el path exacto ya estaba registrado, el registro nuevo lo
    /// reemplaza (la última registración gana). No existe operación de
    /// eliminación.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::router::Router;
    ///
    /// let mut router = Router::new();
    /// router.register("/hello", |req: &str| format!("Hola desde {}", req));
    /// assert!(router.lookup("/hello").is_some());
    /// ```
    pub fn register<S>(&mut self, path: &str, service: S)
    where
        S: Service + 'static,
    {
        if let Some(entry) = self.routes.iter_mut().find(|(p, _)| p == path) {
            entry.1 = Box::new(service);
        } else {
            self.routes.push((path.to_string(), Box::new(service)));
        }
    }

    /// Busca el servicio cuyo path registrado sea prefijo del path dado
    ///
    /// El path entrante ya viene sin el namespace `/app`. Retorna la
    /// primera coincidencia en orden de registro, o `None`.
    pub fn lookup(&self, path: &str) -> Option<&dyn Service> {
        self.routes
            .iter()
            .find(|(route_path, _)| path.starts_with(route_path.as_str()))
            .map(|(_, service)| service.as_ref())
    }

    /// Cantidad de rutas registradas
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Verifica si no hay rutas registradas
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
