//! # Servidor TCP Secuencial
//! src/server/tcp.rs
//!
//! Implementación del loop accept/leer/responder/cerrar. Se atiende una
//! conexión a la vez en el thread principal: mientras una conexión está
//! abierta, las demás esperan en la cola del kernel (backlog 1).

use super::capture::{capture_headers, Capture, CaptureEnd};
use crate::config::{Config, LISTEN_BACKLOG};
use crate::http::{RequestHead, Response};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpListener};

/// Línea que marca el fin del eco de cada conexión
pub const SEPARATOR: &str = "-=-=--";

/// Receptor de delivery reports
///
/// Es dueño del socket de escucha: al soltar el `Server` el socket se
/// cierra, también en los caminos de error.
pub struct Server {
    config: Config,
    listener: TcpListener,
    served: u64,
}

impl Server {
    /// Crea el socket de escucha en 127.0.0.1 y anuncia el puerto en stdout
    pub fn bind(config: Config) -> io::Result<Self> {
        let address = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
        log::info!("[*] Iniciando receptor en {}", address);

        let listener = bind_listener(address)?;
        let port = listener.local_addr()?.port();

        println!("Listening for connections on port {}...", port);
        log::info!("[+] Receptor escuchando en 127.0.0.1:{}", port);
        log::info!("[*] Modo secuencial: una conexión a la vez\n");

        Ok(Self {
            config,
            listener,
            served: 0,
        })
    }

    /// Dirección efectiva (útil cuando se pidió el puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Conexiones atendidas hasta ahora
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Atiende conexiones para siempre, con eco a stdout
    ///
    /// Solo retorna si falla alguna operación de socket; ese error es fatal.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let stdout = io::stdout();
            let mut echo = stdout.lock();
            self.serve_one(&mut echo)?;
        }
    }

    /// Acepta una conexión y la atiende completa
    ///
    /// 1. Espera un cliente
    /// 2. Eco de lo recibido hasta `\r\n\r\n`
    /// 3. Escribe el separador
    /// 4. Envía la respuesta fija
    /// 5. Cierra la conexión
    pub fn serve_one<W: Write>(&mut self, echo: &mut W) -> io::Result<Capture> {
        let (mut stream, peer_addr) = self.listener.accept()?;
        self.served += 1;
        let id = self.served;

        log::info!("✅ Conexión #{} desde: {}", id, peer_addr);

        if let Some(timeout) = self.config.read_timeout() {
            stream.set_read_timeout(Some(timeout))?;
        }

        let capture = capture_headers(&mut stream, echo)?;

        writeln!(echo, "{}", SEPARATOR)?;
        echo.flush()?;

        match capture.end() {
            CaptureEnd::HeadersComplete => {
                log::info!(
                    "   ✅ #{}: {} bytes en {} lecturas",
                    id,
                    capture.bytes().len(),
                    capture.chunks()
                );

                if self.config.inspect {
                    inspect(id, &capture);
                }
            }
            CaptureEnd::PeerClosed => {
                log::warn!(
                    "   ❌ #{}: el cliente cerró sin completar headers ({} bytes)",
                    id,
                    capture.bytes().len()
                );
            }
            CaptureEnd::TimedOut => {
                log::warn!(
                    "   ❌ #{}: timeout esperando headers ({} bytes)",
                    id,
                    capture.bytes().len()
                );
            }
        }

        let sent = stream
            .write_all(&Response::ack().to_bytes())
            .and_then(|()| stream.flush());

        match sent {
            Ok(()) => log::info!("   ✅ #{}: 200 OK enviado, cerrando\n", id),
            // Sin headers completos el peer pudo haberse ido del todo
            Err(e) if !capture.is_complete() => {
                log::warn!("   ❌ #{}: no se pudo enviar la respuesta: {}\n", id, e)
            }
            Err(e) => return Err(e),
        }

        // El stream se cierra al salir del scope
        Ok(capture)
    }
}

/// socket + SO_REUSEADDR + bind + listen(1)
fn bind_listener(address: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(address), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&address.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    Ok(socket.into())
}

fn inspect(id: u64, capture: &Capture) {
    match RequestHead::parse(capture.bytes()) {
        Ok(head) => log::info!("   🔎 #{}: {}", id, head.to_json()),
        Err(e) => log::warn!("   🔎 #{}: no se pudo interpretar el request: {}", id, e),
    }
}
