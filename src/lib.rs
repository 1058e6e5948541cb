//! # DLR Receiver
//! src/lib.rs
//!
//! Receptor TCP de diagnóstico para delivery reports enviados por HTTP.
//! Imprime en stdout, byte a byte, lo que manda el cliente hasta el fin de
//! los headers y contesta con un `200 OK` fijo. Sirve para comprobar a mano
//! que un gateway arma bien sus requests.
//!
//! ## Arquitectura
//!
//! - `config`: Argumentos CLI (puerto posicional y opciones)
//! - `http`: Terminador de headers, respuesta fija y parser para `--inspect`
//! - `server`: Socket de escucha y loop accept/eco/respuesta/cierre
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use dlr_receiver::config::Config;
//! use dlr_receiver::server::Server;
//!
//! let mut server = Server::bind(Config::default()).expect("Error al iniciar receptor");
//! server.run().expect("Error fatal");
//! ```

pub mod config;
pub mod http;
pub mod server;
