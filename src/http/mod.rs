//! # Módulo HTTP
//! src/http/mod.rs
//!
//! El receptor no implementa HTTP: solo busca el fin de los headers y
//! responde siempre lo mismo. Este módulo agrupa lo poco de protocolo
//! que sí necesita:
//!
//! - Detección del terminador de headers (`\r\n\r\n`)
//! - La respuesta fija que recibe cada cliente
//! - Un parser tolerante del request line y headers, usado solo por `--inspect`
//!
//! ### Formato de un delivery report típico
//!
//! ```text
//! GET /dlr?id=42&status=8&smsc=fake HTTP/1.1\r\n
//! Host: 127.0.0.1:6666\r\n
//! \r\n
//! ```

pub mod request;   // Resumen del request para --inspect
pub mod response;  // Respuesta fija
pub mod status;    // Códigos de estado

pub use request::RequestHead;
pub use response::Response;
pub use status::StatusCode;

/// Secuencia que marca el fin del bloque de headers
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Busca el terminador de headers en `buffer` a partir de `from`
///
/// Retorna la posición donde empieza el terminador.
///
/// # Ejemplo
/// ```
/// use dlr_receiver::http::find_header_terminator;
///
/// assert_eq!(find_header_terminator(b"GET / HTTP/1.1\r\n\r\n", 0), Some(14));
/// assert_eq!(find_header_terminator(b"GET / HTTP/1.1\r\n", 0), None);
/// ```
pub fn find_header_terminator(buffer: &[u8], from: usize) -> Option<usize> {
    if from >= buffer.len() {
        return None;
    }
    buffer[from..]
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
        .map(|pos| pos + from)
}
