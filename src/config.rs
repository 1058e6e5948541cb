//! # Configuración del Receptor
//! src/config.rs
//!
//! Este módulo define la configuración del receptor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! El único argumento "histórico" es el puerto posicional; el resto son
//! opcionales y por defecto no cambian el comportamiento.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./dlr_receiver            # escucha en 127.0.0.1:6666
//! ./dlr_receiver 7000       # escucha en 127.0.0.1:7000
//! ./dlr_receiver 7000 --inspect --read-timeout 30
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! DLR_RECEIVER_PORT=7000 RUST_LOG=debug ./dlr_receiver
//! ```

use clap::Parser;
use std::time::Duration;

/// Puerto por defecto cuando no se pasa ninguno
pub const DEFAULT_PORT: u16 = 6666;

/// Solo aceptamos conexiones de la máquina local
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Una sola conexión pendiente en la cola del kernel
pub const LISTEN_BACKLOG: i32 = 1;

/// Máximo de bytes pedidos en cada llamada a `read`
pub const RECV_CHUNK_SIZE: usize = 10_000;

/// Configuración del receptor de delivery reports
#[derive(Debug, Clone, Parser)]
#[command(name = "dlr_receiver")]
#[command(about = "Receptor TCP de diagnóstico: imprime lo recibido y responde 200 OK")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en 127.0.0.1 donde escuchar
    #[arg(default_value_t = DEFAULT_PORT, env = "DLR_RECEIVER_PORT")]
    pub port: u16,

    /// Timeout en segundos para cada lectura (sin timeout si se omite)
    #[arg(long = "read-timeout", value_name = "SECS", env = "DLR_RECEIVER_READ_TIMEOUT")]
    pub read_timeout_secs: Option<u64>,

    /// Registra en stderr un resumen JSON de cada request recibido
    #[arg(long, env = "DLR_RECEIVER_INSPECT")]
    pub inspect: bool,
}

impl Config {
    /// Crea la configuración parseando argumentos CLI
    ///
    /// Si el puerto no es un entero válido clap termina el proceso
    /// antes de que se cree cualquier socket.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use dlr_receiver::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:6666");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", LOOPBACK_HOST, self.port)
    }

    /// Timeout de lectura como `Duration`, si está configurado
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        // Un timeout de 0 lo rechaza set_read_timeout
        if self.read_timeout_secs == Some(0) {
            return Err("Read timeout must be > 0 seconds".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración efectiva
    pub fn print_summary(&self) {
        log::info!("⚙️  Configuración:");
        log::info!("   Dirección:    {}", self.address());
        log::info!("   Backlog:      {}", LISTEN_BACKLOG);
        match self.read_timeout_secs {
            Some(secs) => log::info!("   Read timeout: {} s", secs),
            None => log::info!("   Read timeout: sin límite"),
        }
        log::info!(
            "   Inspección:   {}",
            if self.inspect { "activada" } else { "desactivada" }
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            read_timeout_secs: None,
            inspect: false,
        }
    }
}
