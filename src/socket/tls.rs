use crate::base::neterror::NetError;
use boring::ssl::{SslConnector, SslMethod};
use tokio::net::TcpStream;
use tokio_boring::SslStream;

/// ALPN wire format for the only protocol the client speaks.
pub(crate) const HTTP1_ALPN: &[u8] = b"\x08http/1.1";

/// Upgrade a connected TCP stream to TLS.
///
/// Uses BoringSSL's connector defaults: default CA paths, peer
/// verification and hostname (or IP) verification against `host`. SNI is
/// sent for names and skipped for IP literals.
pub async fn connect(host: &str, stream: TcpStream) -> Result<SslStream<TcpStream>, NetError> {
    let mut builder =
        SslConnector::builder(SslMethod::tls()).map_err(|e| NetError::ssl_failed(host, e))?;
    builder
        .set_alpn_protos(HTTP1_ALPN)
        .map_err(|e| NetError::ssl_failed(host, e))?;

    let config = builder
        .build()
        .configure()
        .map_err(|e| NetError::ssl_failed(host, e))?;

    let stream = tokio_boring::connect(config, host, stream).await.map_err(|e| {
        tracing::debug!(host = %host, error = %e, "TLS handshake failed");
        NetError::ssl_failed(host, e)
    })?;

    tracing::trace!(
        host = %host,
        version = stream.ssl().version_str(),
        "TLS handshake complete"
    );
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::testcert::spawn_tls_server;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_alpn_wire_format() {
        assert_eq!(HTTP1_ALPN[0] as usize, HTTP1_ALPN.len() - 1);
        assert_eq!(&HTTP1_ALPN[1..], b"http/1.1");
    }

    #[tokio::test]
    async fn test_handshake_against_plain_server_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = socket.write_all(b"HTTP/1.1 400 Bad Request\r\n\r\n").await;
        });

        let stream = TcpStream::connect(addr).await.unwrap();
        let err = connect("localhost", stream).await.err().expect("handshake should fail");
        assert!(matches!(err, NetError::SslProtocolError { .. }));
    }

    #[tokio::test]
    async fn test_self_signed_certificate_is_rejected() {
        let addr = spawn_tls_server().await;

        let stream = TcpStream::connect(addr).await.unwrap();
        let err = connect("localhost", stream).await.err().expect("verification should fail");
        match err {
            NetError::SslProtocolError { host, .. } => assert_eq!(host, "localhost"),
            other => panic!("Expected SslProtocolError, got {other:?}"),
        }
    }
}
