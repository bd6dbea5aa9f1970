use std::{env, fs};

use anyhow::{Context, Result};
use open_channel::{Channel, ChannelConfig};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"
b = 10.0
zleft = 0.0
zright = 0.0
n = 0.02
slope = 0.001
q = 150.0
y1 = 5.0
y2 = 4.0
"#;

fn main() -> Result<()> {
    // RUST_LOG overrides the default, e.g. RUST_LOG=open_channel=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("open_channel=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let toml_str = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?,
        None => SAMPLE.to_string(),
    };
    let config: ChannelConfig = toml::from_str(&toml_str).context("failed to parse channel TOML")?;
    let ch = Channel::new(config)?;

    println!("{ch}");
    println!("yn = {:.3} ft, yc = {:.3} ft", ch.norm_depth()?, ch.crit_depth()?);
    match ch.direct_step() {
        Ok(d) => println!("{} is downstream, {d:.1} ft away", ch.downstream()?),
        Err(e) => println!("no profile: {e}"),
    }

    Ok(())
}
