//! A misbehaving client must only cost its own connection; the
//! server goes back to accepting afterwards.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::thread;

use solows::frame::{mask, Fin, FrameHead, Mask, OpCode};
use solows::queue::{self, OverflowPolicy};
use solows::{Server, ServerConfig};

use log::debug;

const REQUEST: &[u8] = b"\
    GET /ws HTTP/1.1\r\n\
    Host: www.example.com\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
    Sec-WebSocket-Version: 13\r\n\r\n";

fn read_until_eof(tcp: &mut TcpStream) -> Vec<u8> {
    let mut data = Vec::new();
    let mut buf = [0_u8; 256];
    loop {
        match tcp.read(&mut buf) {
            Ok(0) => return data,
            Ok(n) => data.extend_from_slice(&buf[..n]),
            Err(_) => return data,
        }
    }
}

#[test]
fn recover_from_bad_clients() {
    env_logger::init();

    let (producer, consumer) = queue::bounded(10, OverflowPolicy::default());
    let server = Server::bind(ServerConfig {
        port: 0,
        ..ServerConfig::default()
    })
    .unwrap();
    let addr = server.local_addr().unwrap();

    // serving loop keeps going until the consumer hangs up
    thread::spawn(move || server.run(producer, |_| {}));

    // 1: no sec-websocket-key, dropped without a 101
    {
        let mut tcp = TcpStream::connect(addr).unwrap();
        debug!("client 1: upgrade without key");
        tcp.write_all(b"GET /ws HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
        let data = read_until_eof(&mut tcp);
        assert!(data.is_empty());
    }

    // 2: good handshake, then an unassigned opcode
    {
        let mut tcp = TcpStream::connect(addr).unwrap();
        debug!("client 2: unknown opcode after upgrade");
        tcp.write_all(REQUEST).unwrap();

        let key = mask::new_rand_key();
        let mut bad = vec![0x83_u8, 0x80];
        bad.extend_from_slice(&key);
        tcp.write_all(&bad).unwrap();

        let data = read_until_eof(&mut tcp);
        let text = String::from_utf8_lossy(&data);
        assert!(text.starts_with("HTTP/1.1 101 Switching Protocols"));
        // connection was torn down with a close frame
        assert_eq!(&data[data.len() - 2..], &[0x88, 0x00]);
    }

    // 3: the server is still there for a well-behaved client
    {
        let mut tcp = TcpStream::connect(addr).unwrap();
        debug!("client 3: clean session");
        tcp.write_all(REQUEST).unwrap();

        let payload = b"still alive";
        let head = FrameHead::new(
            Fin::Y,
            OpCode::Text,
            Mask::Key(mask::new_rand_key()),
            payload.len() as u8,
        );
        let mut wire = vec![0_u8; 6 + payload.len()];
        let n = head.encode(&mut wire).unwrap();
        wire[n..].copy_from_slice(payload);
        if let Mask::Key(key) = head.mask {
            mask::apply_mask(key, &mut wire[n..]);
        }
        tcp.write_all(&wire).unwrap();

        assert_eq!(consumer.pop().unwrap().payload, payload);

        let close = {
            let key = mask::new_rand_key();
            let mut wire = vec![0x88_u8, 0x80];
            wire.extend_from_slice(&key);
            wire
        };
        tcp.write_all(&close).unwrap();

        let data = read_until_eof(&mut tcp);
        let text = String::from_utf8_lossy(&data);
        assert!(text.starts_with("HTTP/1.1 101 Switching Protocols"));
        assert_eq!(&data[data.len() - 2..], &[0x88, 0x00]);
    }
}
