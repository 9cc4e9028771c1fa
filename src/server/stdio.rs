use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use super::request::{parse_request, Incoming};
use super::response::RpcResponse;
use crate::catalog::Catalog;
use crate::dispatcher::Dispatcher;

/// Counters reported when the input stream closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub requests: usize,
    pub notifications: usize,
    pub rejected: usize,
    pub errors: usize,
}

/// Decode and serve one input line. Returns `None` when nothing should be written.
pub fn handle_line(
    catalog: &Catalog,
    dispatcher: &Dispatcher,
    line: &str,
    stats: &mut ServeStats,
) -> Option<RpcResponse> {
    match parse_request(line) {
        Incoming::Rejected(response) => {
            stats.rejected += 1;
            Some(response)
        }
        Incoming::Request(request) => {
            if request.is_notification() {
                stats.notifications += 1;
            } else {
                stats.requests += 1;
            }
            let response = dispatcher.handle(catalog, &request);
            if response.as_ref().is_some_and(|r| r.error.is_some()) {
                stats.errors += 1;
            }
            response
        }
    }
}

/// Serve newline-delimited JSON-RPC until `input` reaches end of file.
///
/// Blank lines are skipped. Each response is written as one line and flushed
/// before the next request is read.
pub fn serve<R: BufRead, W: Write>(
    catalog: &Catalog,
    dispatcher: &Dispatcher,
    input: R,
    mut output: W,
) -> io::Result<ServeStats> {
    let mut stats = ServeStats::default();
    info!(
        towers = catalog.tower_count(),
        heroes = catalog.hero_count(),
        "serving JSON-RPC on stdio"
    );
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(response) = handle_line(catalog, dispatcher, line, &mut stats) {
            writeln!(output, "{}", response.to_line())?;
            output.flush()?;
        }
    }
    debug!(?stats, "input closed");
    info!(
        requests = stats.requests,
        notifications = stats.notifications,
        rejected = stats.rejected,
        errors = stats.errors,
        "stdio session finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SampleSource;
    use serde_json::Value;
    use std::io::Cursor;

    fn run(input: &str) -> (Vec<Value>, ServeStats) {
        let catalog = Catalog::load(&SampleSource).unwrap();
        let mut out = Vec::new();
        let stats = serve(&catalog, &Dispatcher::new(), Cursor::new(input), &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (lines, stats)
    }

    #[test]
    fn test_one_response_per_request_in_order() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"list_all_heroes"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":"b","method":"get_hero_info","params":{"hero_id":"nope"}}"#,
            "\n",
            "not json\n",
        );
        let (lines, stats) = run(input);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["id"], "b");
        assert_eq!(lines[1]["error"]["code"], -32004);
        assert_eq!(lines[2]["error"]["code"], -32700);
        assert_eq!(
            stats,
            ServeStats {
                requests: 2,
                notifications: 1,
                rejected: 1,
                errors: 1,
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let (lines, stats) = run("");
        assert!(lines.is_empty());
        assert_eq!(stats, ServeStats::default());
    }
}
