use anyhow::Result;
use richtext_md::{config, markdown, stream};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (also applies .env, which may set RUST_LOG)
    let config = config::load_config()?;

    // stdout carries the HTML, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &config.input {
        Some(path) => tracing::debug!(input = %path.display(), "Input configured"),
        None => tracing::debug!("Reading markdown from stdin"),
    }

    let markdown = stream::read_input(&config).await?;
    let html = markdown::convert(Some(&markdown));
    stream::write_output(&config, &html).await?;

    tracing::info!(
        input_bytes = markdown.len(),
        output_bytes = html.len(),
        "Converted markdown to HTML"
    );

    Ok(())
}
