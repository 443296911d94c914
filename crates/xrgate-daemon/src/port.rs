// crates/xrgate-daemon/src/port.rs
//
// Pre-flight check for the gateway port.

use std::time::Duration;

use tokio::net::TcpStream;
use xrgate_core::GatewayError;

const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Returns true when something already accepts connections on
/// `127.0.0.1:<port>`.
pub async fn is_port_in_use(port: u16) -> bool {
    let addr = format!("127.0.0.1:{}", port);
    matches!(
        tokio::time::timeout(PROBE_TIMEOUT, TcpStream::connect(&addr)).await,
        Ok(Ok(_))
    )
}

/// Fail with `PortInUse` if the port is taken.
pub async fn ensure_port_free(port: u16) -> Result<(), GatewayError> {
    if is_port_in_use(port).await {
        return Err(GatewayError::PortInUse(port));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn bound_port_is_in_use() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(is_port_in_use(port).await);
        let err = ensure_port_free(port).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Port {} is already in use. Please stop whatever process is using that port and try again.",
                port
            )
        );
    }

    #[tokio::test]
    async fn released_port_is_free() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        assert!(!is_port_in_use(port).await);
        assert!(ensure_port_free(port).await.is_ok());
    }
}
