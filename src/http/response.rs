//! # Respuesta HTTP
//! src/http/response.rs
//!
//! Construye la respuesta que recibe cada cliente. A diferencia de un
//! servidor HTTP normal no se agrega `Content-Length` ni `Content-Type`:
//! la conexión se cierra después de escribir y eso delimita el body.
//!
//! ## Formato enviado
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Connection: close\r\n
//! \r\n
//! <html><body>Ok.</body></html>
//! ```

use super::StatusCode;

/// Body que se envía a todos los clientes
pub const ACK_BODY: &str = "<html><body>Ok.</body></html>";

/// Representa una respuesta HTTP/1.1
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// Headers en el orden en que se escriben
    headers: Vec<(String, String)>,

    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// La respuesta fija del receptor
    ///
    /// # Ejemplo
    /// ```
    /// use dlr_receiver::http::Response;
    ///
    /// let bytes = Response::ack().to_bytes();
    /// assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
    /// ```
    pub fn ack() -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Connection", "close")
            .with_body(ACK_BODY)
    }

    /// Agrega un header al final de la lista
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Establece el body. No toca los headers.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Convierte la respuesta a bytes listos para el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        // 3. Línea vacía
        result.extend_from_slice(b"\r\n");

        // 4. Body
        result.extend_from_slice(&self.body);

        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_is_byte_exact() {
        let expected: &[u8] =
            b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n<html><body>Ok.</body></html>";
        assert_eq!(Response::ack().to_bytes(), expected);
    }

    #[test]
    fn test_ack_has_no_length_or_type() {
        let response = Response::ack();
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.headers().len(), 1);
        assert!(!response
            .headers()
            .iter()
            .any(|(name, _)| name == "Content-Length" || name == "Content-Type"));
        assert_eq!(response.body(), ACK_BODY.as_bytes());
    }

    #[test]
    fn test_headers_keep_insertion_order() {
        let bytes = Response::new(StatusCode::Ok)
            .with_header("B", "2")
            .with_header("A", "1")
            .to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 200 OK\r\nB: 2\r\nA: 1\r\n\r\n");
    }
}
