use anyhow::anyhow;
use async_trait::async_trait;
use bytes::Bytes;
use futures::prelude::*;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio_util::codec::BytesCodec;
use tokio_util::udp::UdpFramed;
use tracing::{debug, info};

type Result<T> = anyhow::Result<T>;

/// Carries one query to a resolver and hands back the reply.
#[async_trait]
pub trait Transport {
    /// Sends `query` and waits for a single inbound datagram, returning its
    /// sender and payload. There is no timeout.
    async fn exchange(&mut self, query: &[u8]) -> Result<(SocketAddr, Bytes)>;
}

/// Connectionless transport over UDP. Every exchange binds a fresh socket on
/// an ephemeral port and closes it once the reply has arrived.
///
/// Replies are read through `UdpFramed`, which reserves 64 KiB per datagram,
/// so nothing a resolver sends over UDP is cut short.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    resolver: SocketAddr,
}

impl UdpTransport {
    pub fn new(resolver: SocketAddr) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> SocketAddr {
        self.resolver
    }

    fn local_addr(&self) -> SocketAddr {
        match self.resolver {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        }
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn exchange(&mut self, query: &[u8]) -> Result<(SocketAddr, Bytes)> {
        let socket = UdpSocket::bind(self.local_addr()).await?;
        debug!("Bound {}", socket.local_addr()?);

        let mut framed = UdpFramed::new(socket, BytesCodec::new());

        info!("Sending {} bytes to {}", query.len(), self.resolver);
        framed
            .send((Bytes::copy_from_slice(query), self.resolver))
            .await?;

        match framed.next().await {
            Some(Ok((reply, from))) => {
                info!("Received {} bytes from {}", reply.len(), from);
                Ok((from, reply.freeze()))
            }
            Some(Err(e)) => Err(e.into()),
            None => Err(anyhow!("socket closed before a reply arrived")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_exchange_one_datagram() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        let responder = tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (len, peer) = server.recv_from(&mut buf).await.unwrap();
            let mut reply = buf[..len].to_vec();
            reply.reverse();
            server.send_to(&reply, peer).await.unwrap();
        });

        let mut transport = UdpTransport::new(server_addr);
        let (from, reply) = transport.exchange(&[1, 2, 3]).await.unwrap();

        assert_eq!(from, server_addr);
        assert_eq!(&reply[..], &[3, 2, 1]);
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_exchange_reply_larger_than_512_bytes() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();
        let large: Vec<u8> = (0..4096u32).map(|i| i as u8).collect();
        let expected = large.clone();

        let responder = tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (_, peer) = server.recv_from(&mut buf).await.unwrap();
            server.send_to(&large, peer).await.unwrap();
        });

        let mut transport = UdpTransport::new(server_addr);
        let (_, reply) = transport.exchange(&[0]).await.unwrap();

        assert_eq!(reply.len(), 4096);
        assert_eq!(&reply[..], &expected[..]);
        responder.await.unwrap();
    }

    #[test]
    fn test_local_addr_matches_family() {
        let v4 = UdpTransport::new("8.8.8.8:53".parse().unwrap());
        assert_eq!(v4.local_addr(), "0.0.0.0:0".parse::<SocketAddr>().unwrap());

        let v6 = UdpTransport::new("[2001:4860:4860::8888]:53".parse().unwrap());
        assert_eq!(v6.local_addr(), "[::]:0".parse::<SocketAddr>().unwrap());
    }
}
