//! Port specification parsing
//!
//! A port spec is a comma-separated list of tokens, each either a single
//! port (`80`) or an inclusive range (`8000-8100`).

use crate::{Result, ScanError};
use std::collections::BTreeSet;

/// Parse a port spec like `"22,80,8000-8100"` into a sorted, deduplicated
/// port list.
///
/// Blank tokens (trailing commas, empty spec) contribute nothing. A range
/// whose low bound exceeds its high bound contributes nothing rather than
/// being swapped or rejected.
pub fn parse_ports(spec: &str) -> Result<Vec<u16>> {
    let mut ports = BTreeSet::new();

    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if token.contains('-') {
            let mut bounds = token.splitn(2, '-');
            let low = parse_port(bounds.next().unwrap_or(""), token)?;
            let high = parse_port(bounds.next().unwrap_or(""), token)?;
            // low > high is an empty range, not an error
            ports.extend(low..=high);
        } else {
            ports.insert(parse_port(token, token)?);
        }
    }

    Ok(ports.into_iter().collect())
}

fn parse_port(value: &str, token: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| ScanError::ParseError(format!("invalid port token: {}", token)))
}
