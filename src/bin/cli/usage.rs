use dunetool::{apis::dune::ReqwestTransport, date_range, tools};

use crate::DuneArgs;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    dune: DuneArgs,
}

pub fn main(args: Args) -> anyhow::Result<()> {
    let Args { dune } = args;
    let config = dune.into_config();

    let transport = ReqwestTransport::new()?;
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    tools::usage::report_usage(
        &transport,
        &config,
        &mut stdin,
        &mut stdout,
        date_range::today_utc(),
    )?;

    Ok(())
}
