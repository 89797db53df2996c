//! Newline framing over a byte stream.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{CacheError, CacheResult};
use crate::response::Response;

/// A client connection: reads newline-terminated lines and writes
/// responses.
#[derive(Debug)]
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    max_line: usize,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap `stream`, refusing lines longer than `max_line` bytes.
    pub fn new(stream: S, max_line: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(max_line.min(64 * 1024)),
            max_line,
        }
    }

    /// Read the next line, newline included.
    ///
    /// Returns `Ok(None)` once the peer closes the stream. Bytes received
    /// after the last newline are discarded at that point.
    pub async fn read_line(&mut self) -> CacheResult<Option<BytesMut>> {
        let mut scanned = 0;
        loop {
            if let Some(pos) = self.buffer[scanned..].iter().position(|b| *b == b'\n') {
                let len = scanned + pos + 1;
                if len > self.max_line {
                    return Err(CacheError::LineTooLong {
                        limit: self.max_line,
                    });
                }
                return Ok(Some(self.buffer.split_to(len)));
            }
            scanned = self.buffer.len();

            if self.buffer.len() > self.max_line {
                return Err(CacheError::LineTooLong {
                    limit: self.max_line,
                });
            }

            if self.stream.read_buf(&mut self.buffer).await? == 0 {
                return Ok(None);
            }
        }
    }

    /// Write one response and flush it.
    pub async fn write_response(&mut self, response: &Response) -> CacheResult<()> {
        self.stream
            .write_all(response.to_string().as_bytes())
            .await?;
        self.stream.flush().await?;
        Ok(())
    }
}
