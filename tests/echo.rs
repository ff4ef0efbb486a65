use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;

use solows::frame::{mask, Fin, FrameHead, Mask, OpCode};
use solows::handshake::{derive_accept_key, new_sec_key};
use solows::queue::{self, OverflowPolicy};
use solows::{Server, ServerConfig};

use log::debug;

const ECHO_DATA: &[u8] = b"ECHO ECHO ECHO!";

macro_rules! gets {
    ($b: expr) => {
        std::str::from_utf8($b).unwrap()
    };
}

fn write_masked(tcp: &mut TcpStream, opcode: OpCode, payload: &[u8]) {
    let key = mask::new_rand_key();
    let head = FrameHead::new(Fin::Y, opcode, Mask::Key(key), payload.len() as u8);

    let mut wire = vec![0_u8; 6 + payload.len()];
    let n = head.encode(&mut wire).unwrap();
    wire[n..].copy_from_slice(payload);
    mask::apply_mask(key, &mut wire[n..]);

    tcp.write_all(&wire).unwrap();
}

fn read_handshake_response(tcp: &mut TcpStream) -> Vec<u8> {
    let mut response = Vec::new();
    let mut byte = [0_u8; 1];
    while !response.ends_with(b"\r\n\r\n") {
        tcp.read_exact(&mut byte).unwrap();
        response.push(byte[0]);
    }
    response
}

#[test]
fn echo() {
    env_logger::init();

    let (producer, consumer) = queue::bounded(10, OverflowPolicy::default());
    let server = Server::bind(ServerConfig {
        port: 0,
        ..ServerConfig::default()
    })
    .unwrap();
    let addr = server.local_addr().unwrap();

    let (sender_tx, sender_rx) = mpsc::channel();

    let t1 = thread::spawn(move || {
        debug!("server: waiting for a connection..");
        server
            .serve_once(&producer, |sender| sender_tx.send(sender).unwrap())
            .unwrap();
        debug!("server: connection done");
    });

    let t2 = thread::spawn(move || {
        let sender = sender_rx.recv().unwrap();
        debug!("consumer: got reply path");
        while let Ok(msg) = consumer.pop() {
            debug!("consumer: echo {} bytes", msg.len());
            sender.send(msg.opcode, &msg.payload).unwrap();
        }
        debug!("consumer: queue closed");
    });

    let mut tcp = TcpStream::connect(addr).unwrap();
    debug!("client: tcp connected!");

    let sec_key = new_sec_key();
    let request = format!(
        "GET /ws HTTP/1.1\r\n\
         Host: www.example.com\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Key: {}\r\n\
         Sec-WebSocket-Version: 13\r\n\r\n",
        gets!(&sec_key)
    );
    tcp.write_all(request.as_bytes()).unwrap();

    let expected_accept = derive_accept_key(&sec_key);
    let response = read_handshake_response(&mut tcp);
    let response = gets!(&response);
    assert!(response.starts_with("HTTP/1.1 101 Switching Protocols"));
    assert!(response.contains(&format!(
        "Sec-WebSocket-Accept: {}",
        gets!(&expected_accept)
    )));
    debug!("client: websocket connected!");

    let mut buf = vec![0_u8; 256];
    for i in 1..=5 {
        debug!("client: send[{}]..", i);
        write_masked(&mut tcp, OpCode::Text, ECHO_DATA);

        // server frames are exactly head + payload, never masked
        tcp.read_exact(&mut buf[..2 + ECHO_DATA.len()]).unwrap();
        assert_eq!(buf[0], 0x81);
        assert_eq!(buf[1] as usize, ECHO_DATA.len());
        debug!(
            "client: receive message: {}",
            gets!(&buf[2..2 + ECHO_DATA.len()])
        );
        assert_eq!(&buf[2..2 + ECHO_DATA.len()], ECHO_DATA);
    }

    debug!("client: close");
    write_masked(&mut tcp, OpCode::Close, &[]);

    // close acknowledgment, then EOF
    tcp.read_exact(&mut buf[..2]).unwrap();
    assert_eq!(&buf[..2], &[0x88, 0x00]);
    assert_eq!(tcp.read(&mut buf).unwrap(), 0);

    t1.join().unwrap();
    t2.join().unwrap();
}
