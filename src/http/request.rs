//! # Resumen de Requests
//! src/http/request.rs
//!
//! Parser tolerante del bloque de headers, usado por `--inspect` para
//! mostrar qué delivery report llegó. Nunca decide la respuesta: si el
//! parsing falla solo se registra el error.
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.x`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body (el body se ignora)

use serde::Serialize;

/// Request line y headers de un request capturado
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestHead {
    /// Cualquier token, no solo GET/POST
    method: String,

    /// Path sin query string (ej: "/dlr")
    path: String,

    /// Query parameters decodificados, en orden de aparición
    query_params: Vec<(String, String)>,

    /// "HTTP/1.0" o "HTTP/1.1"
    version: String,

    headers: Vec<(String, String)>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No hay nada antes del terminador
    EmptyRequest,

    /// Request line sin 3 partes o con bytes no UTF-8
    InvalidRequestLine,

    /// Versión HTTP distinta de 1.0 / 1.1
    InvalidHttpVersion(String),

    /// Header sin ':'
    InvalidHeader(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
        }
    }
}

impl std::error::Error for ParseError {}

impl RequestHead {
    /// Parsea el bloque de headers desde bytes
    ///
    /// Acepta el buffer completo: todo lo que venga después del primer
    /// `\r\n\r\n` se ignora.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use dlr_receiver::http::RequestHead;
    ///
    /// let raw = b"GET /dlr?id=42&status=8 HTTP/1.1\r\nHost: x\r\n\r\n";
    /// let head = RequestHead::parse(raw).unwrap();
    ///
    /// assert_eq!(head.path(), "/dlr");
    /// assert_eq!(head.query_param("status"), Some("8"));
    /// assert_eq!(head.header("host"), Some("x"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let head = match super::find_header_terminator(buffer, 0) {
            Some(end) => &buffer[..end],
            None => buffer,
        };

        let head_str = std::str::from_utf8(head).map_err(|_| ParseError::InvalidRequestLine)?;

        if head_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = head_str.split("\r\n");
        let request_line = lines.next().ok_or(ParseError::EmptyRequest)?;

        let (method, path, query_params, version) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines)?;

        Ok(RequestHead {
            method,
            path,
            query_params,
            version,
            headers,
        })
    }

    /// Formato: `METHOD /path?query HTTP/1.x`
    fn parse_request_line(
        line: &str,
    ) -> Result<(String, String, Vec<(String, String)>, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        let (path, query_params) = match parts[1].split_once('?') {
            Some((path, query)) => (path.to_string(), Self::parse_query_string(query)),
            None => (parts[1].to_string(), Vec::new()),
        };

        Ok((parts[0].to_string(), path, query_params, version))
    }

    /// Ejemplo: "id=42&status=8&flag" -> [("id","42"), ("status","8"), ("flag","")]
    fn parse_query_string(query: &str) -> Vec<(String, String)> {
        query
            .split('&')
            .filter(|param| !param.is_empty())
            .map(|param| match param.split_once('=') {
                Some((key, value)) => (url_decode(key), url_decode(value)),
                None => (url_decode(param), String::new()),
            })
            .collect()
    }

    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<(String, String)>, ParseError> {
        let mut headers = Vec::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.push((name.trim().to_string(), value.trim().to_string()))
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    // === Accesores ===

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Primer query parameter con ese nombre
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Busca un header sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Resumen en una línea JSON para el log
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
    }
}

/// Decodifica `%XX` y `+`. Secuencias `%` inválidas se dejan tal cual;
/// si el resultado no es UTF-8 se conserva el texto original.
fn url_decode(s: &str) -> String {
    let plus_decoded = s.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_decoded,
    }
}
