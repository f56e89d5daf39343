use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::{
    apis::dune::{self, DuneConfig, Transport},
    date_range::{self, UsageDateRange},
    prompt,
};

/// Prompts for the end of the range (defaulting to `today`), fetches usage
/// since the fixed start date, and writes the response as pretty JSON.
pub fn report_usage<T: Transport + ?Sized>(
    transport: &T,
    config: &DuneConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
    today: NaiveDate,
) -> anyhow::Result<serde_json::Value> {
    let default_end = date_range::format_date(today);
    let end_date = prompt::prompt_date(input, output, "Enter end date", Some(&default_end))?;
    let range = UsageDateRange::new(end_date);

    let usage = dune::get_usage(transport, config, &range)?;
    writeln!(output, "{}", serde_json::to_string_pretty(&usage)?)?;
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::apis::dune::{test_support::RecordingTransport, ApiKey, DEFAULT_BASE_URL};

    fn sent_body(transport: &RecordingTransport) -> serde_json::Value {
        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn empty_answer_uses_today() {
        let transport = RecordingTransport::default().respond_with(200, r#"{"credits":1}"#);
        let config = DuneConfig::new(ApiKey::new(Some("k".to_owned())), DEFAULT_BASE_URL);
        let mut output = Vec::new();

        report_usage(&transport, &config, &mut Cursor::new("\n"), &mut output, today()).unwrap();

        assert_eq!(
            sent_body(&transport),
            serde_json::json!({"start_date": "2025-11-08", "end_date": "2026-10-16"})
        );
    }

    #[test]
    fn entered_date_is_sent_after_reprompt() {
        let transport = RecordingTransport::default().respond_with(200, r#"{"credits":1}"#);
        let config = DuneConfig::new(ApiKey::new(Some("k".to_owned())), DEFAULT_BASE_URL);
        let mut output = Vec::new();

        let usage = report_usage(
            &transport,
            &config,
            &mut Cursor::new("2025-13-40\n2025-12-01\n"),
            &mut output,
            today(),
        )
        .unwrap();

        assert_eq!(usage, serde_json::json!({"credits": 1}));
        assert_eq!(
            sent_body(&transport),
            serde_json::json!({"start_date": "2025-11-08", "end_date": "2025-12-01"})
        );
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Enter end date").count(), 2);
        assert!(output.ends_with("{\n  \"credits\": 1\n}\n"));
    }

    #[test]
    fn non_json_response_is_an_error() {
        let transport = RecordingTransport::default().respond_with(500, "Internal Server Error");
        let config = DuneConfig::new(ApiKey::new(None), DEFAULT_BASE_URL);
        let mut output = Vec::new();

        let result =
            report_usage(&transport, &config, &mut Cursor::new("\n"), &mut output, today());

        assert!(result.is_err());
        assert_eq!(transport.requests.borrow().len(), 1);
    }
}
