use anyhow::{Context, Result};
use shoebox3d::session::Session;
use shoebox3d::GeometryParams;
use tracing_subscriber::EnvFilter;

/// Builds the default shoebox, prints its metrics and the size of the
/// converted viewer bundle.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = Session::new()?;
    session.set_parameters(&GeometryParams::default());
    session.rebuild()?;

    let metrics = session.metrics().context("No model was built")?;
    println!("{metrics}");

    let bundle = session
        .set_visualize(true)?
        .context("No viewer bundle was produced")?;
    println!("Viewer bundle: {} bytes", bundle.len());

    Ok(())
}
