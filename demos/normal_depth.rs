use anyhow::Result;
use open_channel::{Channel, ChannelConfig};

fn main() -> Result<()> {
    let ch = Channel::new(ChannelConfig::new(12.0, 0.0, 0.0, 0.015, 0.0087, 300.0))?;
    println!("{ch}");

    let yn = ch.norm_depth()?;
    let yc = ch.crit_depth()?;
    println!("normal depth is {yn:.3} ft, critical depth is {yc:.3} ft");
    println!("channel slope is {}", ch.slope_class()?);
    println!("critical slope is {:.5}", ch.critical_slope()?);

    Ok(())
}
