use std::io::{BufRead, Write};

use anyhow::bail;
use tracing::debug;

use crate::date_range::validate_date;

/// Asks for a `%Y-%m-%d` date until a valid one is entered. An empty answer
/// selects `default` when there is one. Fails only if input runs out or the
/// terminal can't be written to.
pub fn prompt_date(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt_text: &str,
    default: Option<&str>,
) -> anyhow::Result<String> {
    loop {
        write!(output, "{} (YYYY-MM-DD)", prompt_text)?;
        if let Some(default) = default {
            write!(output, " [{}]", default)?;
        }
        write!(output, ": ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a date was entered");
        }

        match validate_date(&line, default) {
            Ok(date) => return Ok(date),
            Err(err) => {
                debug!("rejected date input {:?}: {}", line.trim(), err);
                writeln!(output, "{}", err)?;
            }
        }
    }
}
