use emdns_infrastructure::dns::{resolve, Zone};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

pub async fn start_dns_server(
    bind_addr: String,
    zone: Arc<Zone>,
    max_response_size: u16,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = UdpSocket::bind(socket_addr).await?;

    info!(
        bind_address = %socket_addr,
        records = zone.len(),
        max_response_size,
        "DNS server ready"
    );

    run_udp_loop(socket, zone, max_response_size).await;
    Ok(())
}

/// Answers one datagram at a time until the socket is gone.
async fn run_udp_loop(socket: UdpSocket, zone: Arc<Zone>, max_response_size: u16) {
    let mut recv_buf = [0u8; 4096];
    let mut response = vec![0u8; max_response_size as usize];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let len = resolve(&zone, &recv_buf[..n], &mut response, max_response_size);
        if len == 0 {
            warn!(client = %from, "No response produced");
            continue;
        }

        debug!(client = %from, request_len = n, response_len = len, "Sending response");
        if let Err(e) = socket.send_to(&response[..len as usize], from).await {
            error!(client = %from, error = %e, "UDP send error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emdns_domain::{RecordClass, RecordType};
    use std::time::Duration;

    fn a_query(id: u16, name: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0]);
        for label in name {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
        buf.push(0);
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf
    }

    async fn spawn_server(zone: Zone) -> SocketAddr {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        tokio::spawn(run_udp_loop(socket, Arc::new(zone), 512));
        addr
    }

    async fn exchange(server: SocketAddr, query: &[u8]) -> Vec<u8> {
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(query, server).await.unwrap();
        let mut buf = [0u8; 1024];
        let (n, _) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        buf[..n].to_vec()
    }

    #[tokio::test]
    async fn test_answers_a_query_over_udp() {
        let mut zone = Zone::new();
        zone.add("domain.com", RecordType::A, RecordClass::IN, "12.34.56.78", 300)
            .unwrap();
        let server = spawn_server(zone).await;

        let response = exchange(server, &a_query(0x1234, &["domain", "com"])).await;

        assert_eq!(&response[0..2], &[0x12, 0x34]);
        assert_eq!(u16::from_be_bytes([response[6], response[7]]), 1);
        assert_eq!(&response[response.len() - 4..], &[12, 34, 56, 78]);
    }

    #[tokio::test]
    async fn test_unknown_name_gets_header_only_reply() {
        let server = spawn_server(Zone::new()).await;

        let response = exchange(server, &a_query(7, &["missing", "com"])).await;

        assert_eq!(response.len(), 12);
        assert_eq!(response[3] & 0x0F, 3);
    }
}
