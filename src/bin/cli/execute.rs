use dunetool::{
    apis::dune::{ReqwestTransport, QUERY_IDS},
    tools,
};

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
    let mut stdout = std::io::stdout().lock();
    tools::execute_queries::execute_queries(&transport, &config, &QUERY_IDS, &mut stdout)?;

    Ok(())
}
