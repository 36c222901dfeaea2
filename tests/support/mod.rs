//! Loopback fixtures: a stub DNS server and canned HTTP/1.1 servers.

#![allow(dead_code)]

use hickory_resolver::proto::op::{Message, MessageType, ResponseCode};
use hickory_resolver::proto::rr::rdata::A;
use hickory_resolver::proto::rr::{RData, Record, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

/// Stub DNS server answering every A query with `answer`, over UDP and
/// TCP on separate loopback ports. Other query types get an empty NOERROR
/// answer.
pub struct StubDns {
    pub addr: SocketAddr,
    pub tcp_addr: SocketAddr,
    queries: Arc<AtomicUsize>,
}

impl StubDns {
    pub async fn spawn(answer: Ipv4Addr) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let tcp_addr = listener.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));

        let counter = queries.clone();
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            loop {
                let Ok((n, src)) = socket.recv_from(&mut buf).await else {
                    break;
                };
                if let Some(bytes) = respond(&buf[..n], answer, &counter) {
                    let _ = socket.send_to(&bytes, src).await;
                }
            }
        });

        let counter = queries.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let counter = counter.clone();
                tokio::spawn(async move {
                    // RFC 1035 4.2.2: two-byte length prefix per message.
                    loop {
                        let Ok(len) = stream.read_u16().await else {
                            break;
                        };
                        let mut msg = vec![0u8; usize::from(len)];
                        if stream.read_exact(&mut msg).await.is_err() {
                            break;
                        }
                        let Some(bytes) = respond(&msg, answer, &counter) else {
                            continue;
                        };
                        let Ok(len) = u16::try_from(bytes.len()) else {
                            break;
                        };
                        if stream.write_u16(len).await.is_err()
                            || stream.write_all(&bytes).await.is_err()
                        {
                            break;
                        }
                    }
                });
            }
        });

        Self {
            addr,
            tcp_addr,
            queries,
        }
    }

    /// Number of well-formed queries received so far, over either transport.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

fn respond(request: &[u8], answer: Ipv4Addr, counter: &AtomicUsize) -> Option<Vec<u8>> {
    let request = Message::from_vec(request).ok()?;
    counter.fetch_add(1, Ordering::SeqCst);

    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);

    for query in request.queries() {
        response.add_query(query.clone());
        if query.query_type() == RecordType::A {
            response.add_answer(Record::from_rdata(
                query.name().clone(),
                60,
                RData::A(A(answer)),
            ));
        }
    }

    response.to_vec().ok()
}

/// UDP socket that receives queries and never answers. Keep it alive for
/// the duration of the test.
pub fn silent_udp() -> std::net::UdpSocket {
    std::net::UdpSocket::bind("127.0.0.1:0").unwrap()
}

/// A loopback address nothing listens on.
pub fn closed_udp_addr() -> SocketAddr {
    let socket = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = socket.local_addr().unwrap();
    drop(socket);
    addr
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

/// HTTP server answering every request with `status` and `body`.
pub async fn spawn_http(status: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request_head(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    addr
}

/// HTTP server that accepts connections and never answers.
pub async fn spawn_silent_http() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}
