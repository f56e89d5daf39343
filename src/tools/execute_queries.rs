use std::io::Write;

use tracing::info;

use crate::apis::dune::{self, DuneConfig, QueryId, Transport};

/// Triggers each query in turn and writes `Query <id>: <body>` per query.
/// An error status from Dune is written out like any other body; a failure
/// to reach Dune at all stops the run.
pub fn execute_queries<T: Transport + ?Sized>(
    transport: &T,
    config: &DuneConfig,
    query_ids: &[QueryId],
    output: &mut impl Write,
) -> anyhow::Result<()> {
    for &query_id in query_ids {
        let response = dune::execute_query(transport, config, query_id)?;
        writeln!(output, "Query {}: {}", query_id, response.body)?;
    }
    info!("triggered {} queries", query_ids.len());
    Ok(())
}
