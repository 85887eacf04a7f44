//! gpsd-backed location provider.
//!
//! Talks the gpsd JSON protocol over TCP: enable watching, then read report
//! lines until a `TPV` (time-position-velocity) report carries a 2D or 3D fix.

use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use mylocation_types::{Coordinates, PermissionStatus};

use crate::error::{Error, Result};
use crate::traits::{LocationProvider, PositionOptions};

/// Default gpsd host.
pub const DEFAULT_GPSD_HOST: &str = "localhost";

/// Default gpsd TCP port.
pub const DEFAULT_GPSD_PORT: u16 = 2947;

/// Default time allowed to obtain a fix.
pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(30);

/// Time allowed to open the TCP connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const WATCH_ENABLE: &str = "?WATCH={\"enable\":true,\"json\":true}\n";
const WATCH_DISABLE: &str = "?WATCH={\"enable\":false}\n";

/// Connection settings for [`GpsdProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpsdConfig {
    pub host: String,
    pub port: u16,
    /// Used when the request does not carry its own timeout.
    pub fix_timeout: Duration,
}

impl Default for GpsdConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GPSD_HOST.to_string(),
            port: DEFAULT_GPSD_PORT,
            fix_timeout: DEFAULT_FIX_TIMEOUT,
        }
    }
}

impl GpsdConfig {
    /// `host:port` as passed to the socket layer.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// One line of gpsd output. Only the fields needed for a fix are decoded.
#[derive(Debug, Deserialize)]
struct Report {
    class: String,
    #[serde(default)]
    mode: Option<u8>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a gpsd report line.
///
/// Returns `Ok(Some(_))` for a TPV report with `mode >= 2` and both
/// coordinates, `Ok(None)` for any other well-formed report, and an error for
/// malformed JSON or an `ERROR` report.
pub fn parse_report(line: &str) -> Result<Option<Coordinates>> {
    let report: Report = serde_json::from_str(line)
        .map_err(|e| Error::Protocol(format!("invalid gpsd report: {e}")))?;

    match report.class.as_str() {
        "TPV" => {
            if report.mode.unwrap_or(0) < 2 {
                return Ok(None);
            }
            match (report.lat, report.lon) {
                (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon)?)),
                _ => Ok(None),
            }
        }
        "ERROR" => Err(Error::Protocol(
            report
                .message
                .unwrap_or_else(|| "gpsd reported an error".to_string()),
        )),
        _ => Ok(None),
    }
}

/// Location provider reading fixes from a gpsd daemon.
#[derive(Debug, Clone, Default)]
pub struct GpsdProvider {
    config: GpsdConfig,
}

impl GpsdProvider {
    pub fn new(config: GpsdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GpsdConfig {
        &self.config
    }

    async fn connect(&self) -> Result<TcpStream> {
        let address = self.config.address();
        tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(&address))
            .await
            .map_err(|_| Error::timeout("connect", CONNECT_TIMEOUT))?
            .map_err(Error::from)
    }

    async fn read_fix(&self, stream: TcpStream) -> Result<Coordinates> {
        let (reader, mut writer) = stream.into_split();
        writer.write_all(WATCH_ENABLE.as_bytes()).await?;

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!(line, "gpsd report");
            if let Some(coords) = parse_report(line)? {
                if let Err(e) = writer.write_all(WATCH_DISABLE.as_bytes()).await {
                    debug!(error = %e, "Failed to disable gpsd watch");
                }
                return Ok(coords);
            }
        }

        Err(Error::PositionUnavailable(
            "gpsd closed the connection before a fix".to_string(),
        ))
    }
}

#[async_trait]
impl LocationProvider for GpsdProvider {
    fn name(&self) -> &str {
        "gpsd"
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        match self.connect().await {
            Ok(_) => Ok(PermissionStatus::Granted),
            Err(Error::Io(e))
                if matches!(
                    e.kind(),
                    ErrorKind::ConnectionRefused | ErrorKind::PermissionDenied
                ) =>
            {
                warn!(address = %self.config.address(), error = %e, "gpsd refused the connection");
                Ok(PermissionStatus::Denied)
            }
            Err(e) => Err(e),
        }
    }

    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates> {
        let limit = options.timeout.unwrap_or(self.config.fix_timeout);
        let stream = self.connect().await?;
        info!(address = %self.config.address(), "Waiting for gpsd fix");

        tokio::time::timeout(limit, self.read_fix(stream))
            .await
            .map_err(|_| Error::timeout("gpsd fix", limit))?
    }
}
