use crate::error::ClientError;

use std::path::{Path, PathBuf};
use std::pin::pin;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use log::info;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Write the body to `file_path` and return the path.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] without a path, and
/// [`ClientError::Io`] / [`ClientError::Transport`] if writing or reading fails.
pub async fn parse_stream(
    response: Response,
    file_path: Option<&Path>,
    chunk_size: usize,
) -> Result<PathBuf, ClientError> {
    let Some(file_path) = file_path else {
        return Err(ClientError::configuration(
            "stream decoding needs a file path",
        ));
    };

    let file = File::create(file_path)
        .await
        .map_err(|e| ClientError::io(file_path, e))?;
    let written = write_stream(response.bytes_stream(), file, chunk_size).await?;

    info!("Wrote {} bytes to {}", written, file_path.display());
    Ok(file_path.to_path_buf())
}

/// Copy `stream` into `writer` in pieces of exactly `chunk_size` bytes (the
/// last piece may be shorter). Returns the number of bytes written.
///
/// The writer is owned by this call and dropped before it returns, on success
/// and on every error.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] for a zero chunk size, or the first
/// read or write failure.
pub async fn write_stream<S, E, W>(
    stream: S,
    mut writer: W,
    chunk_size: usize,
) -> Result<u64, ClientError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<ClientError>,
    W: AsyncWrite + Unpin,
{
    if chunk_size == 0 {
        return Err(ClientError::configuration("chunk size must be positive"));
    }

    let mut stream = pin!(stream);
    let mut buffer = BytesMut::with_capacity(chunk_size);
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::<ClientError>::into)?;
        buffer.extend_from_slice(&chunk);
        while buffer.len() >= chunk_size {
            let piece = buffer.split_to(chunk_size);
            writer.write_all(&piece).await?;
            written += piece.len() as u64;
        }
    }

    if !buffer.is_empty() {
        writer.write_all(&buffer).await?;
        written += buffer.len() as u64;
    }
    writer.flush().await?;

    Ok(written)
}
