//! Registro de capacidades
//!
//! Puerto opcional que recibe el extractor al construirse. Registrar una
//! capacidad es un efecto lateral puro: el extractor no depende del registro
//! para funcionar.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Manejador registrado bajo un nombre de capacidad
pub type CapabilityHandler = Arc<dyn Any + Send + Sync>;

pub trait CapabilityRegistry: Send + Sync {
    fn register_capability(&self, name: &str, handler: CapabilityHandler);
}

/// Registro en memoria: nombre → manejador. Registrar dos veces el mismo
/// nombre reemplaza el manejador anterior.
#[derive(Default)]
pub struct CapabilityCoordinator {
    capabilities: Mutex<HashMap<String, CapabilityHandler>>,
}

impl CapabilityCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<CapabilityHandler> {
        self.capabilities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Devuelve el manejador ya tipado, o `None` si no existe o es de otro tipo
    pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get(name)?.downcast::<T>().ok()
    }

    pub fn list_capabilities(&self) -> Vec<String> {
        let mut nombres: Vec<String> = self
            .capabilities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        nombres.sort();
        nombres
    }
}

impl CapabilityRegistry for CapabilityCoordinator {
    fn register_capability(&self, name: &str, handler: CapabilityHandler) {
        self.capabilities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), handler);
    }
}
