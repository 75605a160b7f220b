use super::{Client, RequestData, RequestOptions};

use crate::error::ClientError;
use crate::responses::{Decoded, ResponseClass, is_json_content_type, parse_stream};

use std::path::{Path, PathBuf};

use log::info;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Multipart field name used by [`Client::upload_file`] callers that have no preference.
pub const DEFAULT_FORM_KEY: &str = "file";

/// Open `file` as a stream of chunks of at most `chunk_size` bytes.
///
/// The file handle lives inside the stream and closes when it is dropped.
///
/// # Errors
///
/// Returns [`ClientError::Io`] if the file cannot be opened.
pub async fn read_file_by_chunk(
    file: impl AsRef<Path>,
    chunk_size: usize,
) -> Result<ReaderStream<File>, ClientError> {
    if chunk_size == 0 {
        return Err(ClientError::configuration("chunk size must be positive"));
    }

    let path = file.as_ref();
    let handle = File::open(path).await.map_err(|e| ClientError::io(path, e))?;
    Ok(ReaderStream::with_capacity(handle, chunk_size))
}

impl Client {
    /// POST `file` as a multipart form under `form_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be opened, otherwise as
    /// [`Client::request`].
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: impl AsRef<Path>,
        form_key: &str,
        options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        let file_path = file.as_ref();
        let handle = File::open(file_path)
            .await
            .map_err(|e| ClientError::io(file_path, e))?;
        let length = handle
            .metadata()
            .await
            .map_err(|e| ClientError::io(file_path, e))?
            .len();

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| form_key.to_string());

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(handle)), length)
            .file_name(file_name);
        let form = Form::new().part(form_key.to_string(), part);

        self.post(path, options.with_data(RequestData::Multipart(form)))
            .await
    }

    /// POST the contents of `file` as a streamed body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be opened, otherwise as
    /// [`Client::request`].
    pub async fn stream_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: impl AsRef<Path>,
        options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        let chunks = read_file_by_chunk(file, self.chunk_size_for(&options)).await?;

        self.post(path, options.with_data(RequestData::Stream(Body::wrap_stream(chunks))))
            .await
    }

    /// GET `path` and save the body.
    ///
    /// A JSON response is decoded instead (into the schema when one is set).
    /// Otherwise the body goes to `file_path`, the options' file path, or the
    /// last segment of `path`, and [`Decoded::File`] holds where it went.
    ///
    /// # Errors
    ///
    /// As [`Client::request`], plus [`ClientError::Configuration`] when no file
    /// name can be derived.
    pub async fn download_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_path: Option<&Path>,
        mut options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        let response = self.prepare(Method::GET, path, &mut options)?.send().await?;

        if !response.status().is_success() {
            return Err(self.error_for(response, &options.error_models).await);
        }

        if is_json_content_type(response.headers()) {
            let class = match options.decode.schema {
                Some(_) => ResponseClass::Model,
                None => ResponseClass::Json,
            };
            return class.parse(response, &options.decode).await;
        }

        let target = match file_path
            .map(Path::to_path_buf)
            .or_else(|| options.decode.file_path.clone())
        {
            Some(target) => target,
            None => file_name_from_path(path)?,
        };

        info!("Downloading {} to {}", path, target.display());
        parse_stream(response, Some(&target), options.decode.chunk_size)
            .await
            .map(Decoded::File)
    }
}

/// Last segment of a request path (`"files/report.pdf"` gives `report.pdf`).
pub(crate) fn file_name_from_path(path: &str) -> Result<PathBuf, ClientError> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(PathBuf::from(name)),
        _ => Err(ClientError::configuration(format!(
            "cannot derive a file name from '{path}'"
        ))),
    }
}
