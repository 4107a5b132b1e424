//! Connection to the word game server

use log::{debug, info};
use shared::encode_line;
use std::io;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpStream;

pub struct Client {
    stream: TcpStream,
}

impl Client {
    pub async fn connect(server_addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = TcpStream::connect(server_addr).await?;
        info!("Connected to {}", stream.peer_addr()?);
        Ok(Client { stream })
    }

    /// Relays between the terminal and the server until either side closes
    pub async fn run(self) -> io::Result<()> {
        let (server_rx, server_tx) = self.stream.into_split();
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        relay(server_rx, server_tx, stdin, stdout).await
    }
}

/// Copies server output to `output` and `input` lines to the server.
///
/// Returns when the server closes the connection or `input` reaches EOF.
pub async fn relay<R, W, I, O>(
    mut server_rx: R,
    mut server_tx: W,
    input: I,
    mut output: O,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut buffer = [0u8; 1024];

    loop {
        tokio::select! {
            read = server_rx.read(&mut buffer) => {
                let len = read?;
                if len == 0 {
                    info!("Server closed the connection");
                    return Ok(());
                }
                output.write_all(&buffer[..len]).await?;
                output.flush().await?;
            }

            line = lines.next_line() => match line? {
                Some(line) => {
                    debug!("Sending {:?}", line);
                    server_tx.write_all(encode_line(&line).as_bytes()).await?;
                }
                None => {
                    debug!("Input closed");
                    server_tx.shutdown().await?;
                    return Ok(());
                }
            },
        }
    }
}
