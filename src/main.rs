mod confine;
mod errors;
mod logging;
mod server;

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let home = dirs::home_dir().context("cannot determine home directory")?;
    let root = dunce::canonicalize(&home)
        .with_context(|| format!("canonicalizing root {}", home.display()))?;

    info!(root = %root.display(), addr = server::BIND_ADDR, "homeview ready");
    println!("homeview serving {} on {}", root.display(), server::BIND_ADDR);

    server::serve(root).await
}
