//! stdio server loop.
//!
//! Frames newline-delimited JSON-RPC messages from stdin, hands each request
//! to the shared [`Dispatcher`], and writes the shaped response to stdout.
//! Runs until stdin closes or a termination signal arrives.
//!
//! Dispatch itself is stateless; this loop adds only framing and shutdown
//! handling on top of it. Client lifecycle notifications
//! (`notifications/initialized`) are accepted and ignored.

use std::sync::Arc;

use tracing::{debug, info};

use super::dispatch::Dispatcher;
use super::protocol::{parse_message, IncomingMessage};
use super::transport::StdioTransport;

/// The stdio-transport MCP server.
pub struct StdioServer {
    dispatcher: Arc<Dispatcher>,
    transport: StdioTransport,
}

impl StdioServer {
    /// Creates a server over a shared dispatcher.
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            transport: StdioTransport::new(),
        }
    }

    /// Runs the server main loop with graceful shutdown handling.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.run_with_shutdown().await
    }

    #[cfg(unix)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(std::io::Error::other)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(std::io::Error::other)?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, initiating graceful shutdown");
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    info!("Received SIGTERM, initiating graceful shutdown");
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    #[cfg(windows)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handles the result from a transport read.
    ///
    /// Returns `true` if the server should shut down (EOF).
    async fn handle_transport_result(
        &mut self,
        line_result: std::io::Result<Option<String>>,
    ) -> std::io::Result<bool> {
        let Some(line) = line_result? else {
            info!("stdin closed, shutting down");
            return Ok(true);
        };

        if line.trim().is_empty() {
            return Ok(false);
        }

        self.handle_line(&line).await?;
        Ok(false)
    }

    /// Handles a single line of input.
    async fn handle_line(&mut self, line: &str) -> std::io::Result<()> {
        let msg = match parse_message(line) {
            Ok(msg) => msg,
            Err(error) => return self.transport.write_error(&error).await,
        };

        match msg {
            IncomingMessage::Request(req) => match self.dispatcher.dispatch(&req) {
                Ok(response) => self.transport.write_response(&response).await,
                Err(error) => self.transport.write_error(&error).await,
            },
            IncomingMessage::Notification(notif) => {
                // One-way by definition; nothing to send back.
                debug!(method = %notif.method, "notification received");
                Ok(())
            }
        }
    }
}
