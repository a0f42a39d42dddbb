//! Console I/O
//!
//! Wraps an async line reader and writer (stdin/stdout for the real shell)
//! and collects replies to prompt requests.

use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::auth::PromptRequest;

pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub async fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    pub async fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(&format!("{}\n", text)).await
    }

    /// Reads one line without its line ending, `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks for the reply to `request`.
    ///
    /// Passwords are one line. Content is every line up to and including the
    /// terminator, which the scripted prompt uses to find the end. Returns
    /// `None` if input ends first.
    pub async fn answer(&mut self, request: &PromptRequest) -> io::Result<Option<Vec<String>>> {
        match request.terminator() {
            None => {
                self.write(&format!("{}: ", request)).await?;
                Ok(self.read_line().await?.map(|line| vec![line]))
            }
            Some(terminator) => {
                self.write_line(&format!("{}:", request)).await?;
                let mut lines = Vec::new();
                loop {
                    match self.read_line().await? {
                        Some(line) => {
                            let done = line == terminator;
                            lines.push(line);
                            if done {
                                return Ok(Some(lines));
                            }
                        }
                        None => return Ok(None),
                    }
                }
            }
        }
    }
}
