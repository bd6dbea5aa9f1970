use std::io;

use anyhow::Result;
use open_channel::{Channel, ChannelConfig, TableRenderer};

fn main() -> Result<()> {
    let ch = Channel::new(
        ChannelConfig::new(160.0, 2.0, 2.0, 0.014, 0.0034, 83700.0)
            .with_depths(15.0, 17.0)
            .with_alpha(1.05),
    )?;
    println!("{ch}");
    println!("{} is downstream, profile {}", ch.downstream()?, ch.profile_type(15.0)?);

    let mut table = TableRenderer::new(io::stdout().lock());
    let dist = ch.direct_step_rendered(&mut table)?;
    println!("distance between the two points is {dist:.1} ft");

    Ok(())
}
