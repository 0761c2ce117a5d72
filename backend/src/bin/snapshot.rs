use std::path::PathBuf;

use clap::Parser;
use explorer_backend::{
    config::DEFAULT_MAX_TEXT_FILE_SIZE, error::AppError, resolver::PathResolver,
    snapshot::StaticSnapshot, tree::TreeBuilder,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate the static file tree snapshot")]
struct Args {
    /// Folder to walk, usually the published files folder.
    #[arg(short, long, value_name = "DIR", default_value = "public/files")]
    root: PathBuf,
    /// Where the JSON snapshot is written.
    #[arg(short, long, value_name = "FILE", default_value = "data/fileList.json")]
    output: PathBuf,
    /// Files at or above this many bytes are listed without content.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_TEXT_FILE_SIZE)]
    max_text_size: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let resolver = PathResolver::new(&args.root)?;
    if !resolver.root().is_dir() {
        return Err(AppError::NotFound(format!(
            "snapshot root {}",
            resolver.root().display()
        )));
    }

    let builder = TreeBuilder::new(resolver.root(), args.max_text_size);
    let nodes = builder.build_root().await;
    let top_level = nodes.len();

    StaticSnapshot::new(nodes).save(&args.output)?;
    info!(
        root = %resolver.root().display(),
        output = %args.output.display(),
        top_level,
        "snapshot generated"
    );
    Ok(())
}
