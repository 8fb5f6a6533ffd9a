use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::Config;
use crate::error::RichTextError;

/// Reads the whole of `reader` as UTF-8, refusing anything over `limit` bytes.
pub async fn read_markdown<R>(reader: R, limit: usize) -> Result<String, RichTextError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    // One extra byte tells an exact fit apart from an overflow
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .await?;

    if buf.len() > limit {
        return Err(RichTextError::InputTooLarge { limit });
    }

    tracing::debug!(bytes = buf.len(), "Read markdown input");
    Ok(String::from_utf8(buf)?)
}

pub async fn read_input(config: &Config) -> Result<String, RichTextError> {
    match &config.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| RichTextError::Read {
                    path: path.clone(),
                    source,
                })?;
            read_markdown(file, config.max_input_bytes).await
        }
        None => read_markdown(tokio::io::stdin(), config.max_input_bytes).await,
    }
}

pub async fn write_html<W>(mut writer: W, html: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(html.as_bytes()).await?;
    writer.flush().await?;
    tracing::debug!(bytes = html.len(), "Wrote HTML output");
    Ok(())
}

pub async fn write_output(config: &Config, html: &str) -> Result<(), RichTextError> {
    match &config.output {
        Some(path) => {
            let write = async {
                let file = tokio::fs::File::create(path).await?;
                write_html(file, html).await
            };
            write.await.map_err(|source| RichTextError::Write {
                path: path.clone(),
                source,
            })
        }
        None => Ok(write_html(tokio::io::stdout(), html).await?),
    }
}
