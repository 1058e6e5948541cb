//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el receptor TCP que:
//! 1. Escucha en 127.0.0.1
//! 2. Acepta una conexión a la vez
//! 3. Hace eco de lo recibido hasta el fin de los headers
//! 4. Responde siempre `200 OK` y cierra

pub mod capture;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use capture::{Capture, CaptureEnd};
pub use tcp::{Server, SEPARATOR};
