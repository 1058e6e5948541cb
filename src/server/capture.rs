//! # Captura de Headers
//! src/server/capture.rs
//!
//! Lee de la conexión hasta encontrar `\r\n\r\n`, haciendo eco de cada
//! chunk apenas llega. Es genérico sobre `Read`/`Write` para poder
//! probarlo sin sockets.

use crate::config::RECV_CHUNK_SIZE;
use crate::http::{find_header_terminator, HEADER_TERMINATOR};
use std::io::{self, ErrorKind, Read, Write};

/// Cómo terminó el loop de lectura
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEnd {
    /// Se encontró el terminador de headers
    HeadersComplete,

    /// `read` devolvió 0 antes del terminador
    PeerClosed,

    /// Venció el read timeout antes del terminador
    TimedOut,
}

/// Todo lo recibido en una conexión
#[derive(Debug, Clone)]
pub struct Capture {
    buffer: Vec<u8>,
    end: CaptureEnd,
    chunks: usize,
}

impl Capture {
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn end(&self) -> CaptureEnd {
        self.end
    }

    /// Cantidad de lecturas no vacías
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn is_complete(&self) -> bool {
        self.end == CaptureEnd::HeadersComplete
    }
}

/// Lee chunks de hasta `RECV_CHUNK_SIZE` bytes hasta ver el terminador
///
/// Cada chunk se escribe tal cual en `echo` y se hace flush antes de la
/// siguiente lectura. Errores de lectura (salvo timeout) y de escritura
/// se propagan.
pub fn capture_headers<R: Read, W: Write>(stream: &mut R, echo: &mut W) -> io::Result<Capture> {
    let mut buffer = Vec::new();
    let mut chunk = vec![0u8; RECV_CHUNK_SIZE];
    let mut chunks = 0;

    let end = loop {
        let bytes_read = match stream.read(&mut chunk) {
            Ok(0) => break CaptureEnd::PeerClosed,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                break CaptureEnd::TimedOut
            }
            Err(e) => return Err(e),
        };
        chunks += 1;

        echo.write_all(&chunk[..bytes_read])?;
        echo.flush()?;

        // El terminador puede haber quedado partido entre dos chunks
        let search_from = buffer.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        buffer.extend_from_slice(&chunk[..bytes_read]);

        if find_header_terminator(&buffer, search_from).is_some() {
            break CaptureEnd::HeadersComplete;
        }
    };

    Ok(Capture { buffer, end, chunks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Reader que entrega cada elemento en una llamada a `read` distinta
    struct ChunkedReader {
        chunks: VecDeque<io::Result<Vec<u8>>>,
        reads: usize,
    }

    impl ChunkedReader {
        fn new(chunks: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                chunks: chunks.into(),
                reads: 0,
            }
        }
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            match self.chunks.pop_front() {
                Some(Ok(data)) => {
                    buf[..data.len()].copy_from_slice(&data);
                    Ok(data.len())
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_single_chunk_request() {
        let raw = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n".to_vec();
        let mut reader = ChunkedReader::new(vec![Ok(raw.clone())]);
        let mut echo = Vec::new();

        let capture = capture_headers(&mut reader, &mut echo).unwrap();

        assert!(capture.is_complete());
        assert_eq!(capture.bytes(), &raw[..]);
        assert_eq!(echo, raw);
        assert_eq!(capture.chunks(), 1);
        assert_eq!(reader.reads, 1);
    }

    #[test]
    fn test_terminator_split_across_chunks() {
        let mut reader = ChunkedReader::new(vec![
            Ok(b"GET / HTTP/1.1\r\n".to_vec()),
            Ok(b"\r".to_vec()),
            Ok(b"\n".to_vec()),
            Ok(b"never read".to_vec()),
        ]);
        let mut echo = Vec::new();

        let capture = capture_headers(&mut reader, &mut echo).unwrap();

        assert_eq!(capture.end(), CaptureEnd::HeadersComplete);
        assert_eq!(echo, b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(capture.chunks(), 3);
        assert_eq!(reader.reads, 3);
    }

    #[test]
    fn test_bytes_after_terminator_are_kept() {
        let raw = b"POST /dlr HTTP/1.1\r\n\r\nid=1".to_vec();
        let mut reader = ChunkedReader::new(vec![Ok(raw.clone())]);
        let mut echo = Vec::new();

        let capture = capture_headers(&mut reader, &mut echo).unwrap();

        assert!(capture.is_complete());
        assert_eq!(capture.bytes(), &raw[..]);
        assert_eq!(echo, raw);
    }

    #[test]
    fn test_peer_closed_before_terminator() {
        let mut reader = ChunkedReader::new(vec![Ok(b"GET / HTTP/1.1\r\n".to_vec())]);
        let mut echo = Vec::new();

        let capture = capture_headers(&mut reader, &mut echo).unwrap();

        assert_eq!(capture.end(), CaptureEnd::PeerClosed);
        assert_eq!(echo, b"GET / HTTP/1.1\r\n");
        // Una lectura con datos y otra que retorna 0: no hay spin
        assert_eq!(reader.reads, 2);
    }

    #[test]
    fn test_peer_closed_without_data() {
        let mut reader = ChunkedReader::new(vec![]);
        let mut echo = Vec::new();

        let capture = capture_headers(&mut reader, &mut echo).unwrap();

        assert_eq!(capture.end(), CaptureEnd::PeerClosed);
        assert!(capture.bytes().is_empty());
        assert!(echo.is_empty());
        assert_eq!(capture.chunks(), 0);
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let mut reader = ChunkedReader::new(vec![
            Err(io::Error::from(ErrorKind::Interrupted)),
            Ok(b"GET / HTTP/1.1\r\n\r\n".to_vec()),
        ]);
        let mut echo = Vec::new();

        let capture = capture_headers(&mut reader, &mut echo).unwrap();
        assert!(capture.is_complete());
    }

    #[test]
    fn test_timeout_ends_capture() {
        let mut reader = ChunkedReader::new(vec![
            Ok(b"GET / HT".to_vec()),
            Err(io::Error::from(ErrorKind::WouldBlock)),
        ]);
        let mut echo = Vec::new();

        let capture = capture_headers(&mut reader, &mut echo).unwrap();

        assert_eq!(capture.end(), CaptureEnd::TimedOut);
        assert_eq!(capture.bytes(), b"GET / HT");
    }

    #[test]
    fn test_read_error_is_propagated() {
        let mut reader = ChunkedReader::new(vec![Err(io::Error::from(
            ErrorKind::ConnectionReset,
        ))]);
        let mut echo = Vec::new();

        let err = capture_headers(&mut reader, &mut echo).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionReset);
    }
}
