//! Usage input parsing
//!
//! Accepts a bare API usage object, a message carrying `model` + `usage`,
//! a Claude Code log line wrapping such a message, a JSON array of any of
//! these, or JSON Lines with one of them per line.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use ccprice::{CostBreakdown, Resolution, UsageTokens};

use crate::error::UsageError;
use crate::utils::debug_note;

const STDIN_PATH: &str = "-";

#[derive(Debug, Deserialize)]
struct Message {
    model: Option<String>,
    usage: UsageTokens,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UsageDocument {
    Logged { message: Message },
    Message(Message),
    Bare(UsageTokens),
}

impl UsageDocument {
    fn into_record(self, line: usize) -> UsageRecord {
        let (model, usage) = match self {
            UsageDocument::Logged { message } | UsageDocument::Message(message) => {
                (message.model, message.usage)
            }
            UsageDocument::Bare(usage) => (None, usage),
        };
        UsageRecord { model, usage, line }
    }
}

/// One priced unit of input
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UsageRecord {
    /// Model named by the record itself, if any
    pub(crate) model: Option<String>,
    pub(crate) usage: UsageTokens,
    /// 1-based source line (or array index + 1)
    pub(crate) line: usize,
}

/// Usage record with the pricing it resolved to
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PricedRecord {
    /// Model identifier the record was priced as (`None` = no model given)
    pub(crate) model: Option<String>,
    pub(crate) line: usize,
    pub(crate) usage: UsageTokens,
    pub(crate) resolution: Resolution,
    pub(crate) cost: CostBreakdown,
}

/// Read usage records from `path`, or from stdin when `path` is "-".
pub(crate) fn read_usage(path: &Path) -> Result<Vec<UsageRecord>, UsageError> {
    let label = if path.as_os_str() == STDIN_PATH {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    };

    let content = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    }
    .map_err(|source| UsageError::Read {
        path: label.clone(),
        source,
    })?;

    parse_usage(&content, &label)
}

pub(crate) fn parse_usage(content: &str, label: &str) -> Result<Vec<UsageRecord>, UsageError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(UsageError::Empty {
            path: label.to_string(),
        });
    }

    if trimmed.starts_with('[') {
        let docs: Vec<UsageDocument> =
            serde_json::from_str(trimmed).map_err(|source| UsageError::Parse {
                path: label.to_string(),
                source,
            })?;
        if docs.is_empty() {
            return Err(UsageError::Empty {
                path: label.to_string(),
            });
        }
        return Ok(docs
            .into_iter()
            .enumerate()
            .map(|(i, doc)| doc.into_record(i + 1))
            .collect());
    }

    // A single (possibly pretty-printed) document
    if let Ok(doc) = serde_json::from_str::<UsageDocument>(trimmed) {
        return Ok(vec![doc.into_record(1)]);
    }

    parse_usage_lines(content, label)
}

fn parse_usage_lines(content: &str, label: &str) -> Result<Vec<UsageRecord>, UsageError> {
    let mut records = Vec::new();
    let mut first_error = None;

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<UsageDocument>(line) {
            Ok(doc) => records.push(doc.into_record(line_no + 1)),
            Err(err) => {
                debug_note(|| format!("Skipping {}:{}: {}", label, line_no + 1, err));
                first_error.get_or_insert(err);
            }
        }
    }

    if !records.is_empty() {
        return Ok(records);
    }

    match first_error {
        Some(source) => Err(UsageError::Parse {
            path: label.to_string(),
            source,
        }),
        None => Err(UsageError::Empty {
            path: label.to_string(),
        }),
    }
}
