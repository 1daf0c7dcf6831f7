//! Process lifecycle: waiting for the signal that stops the server.

mod shutdown;

pub use shutdown::shutdown_signal;
