mod cli;
mod logging;
mod page;
#[cfg(test)]
mod test_support;
mod tui;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("create runtime")?;
    cli::run(&runtime)
}
