//! Per-link reports printed by the command-line tool.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{Config, OutputFormat};
use crate::handlers::{self, DerivedLinks, LinkKind, Service};
use crate::sanitize::{sanitize_link, strip_tracking_params};

/// What is known about a single input link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    /// Link exactly as given.
    pub input: String,
    /// Link after sanitation, as classified.
    pub url: String,
    pub handled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<LinkKind>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub identifiers: BTreeMap<String, String>,
    #[serde(flatten)]
    pub derived: Option<DerivedLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,
}

/// Prepare `input` according to `config` and classify it.
#[must_use]
pub fn inspect(input: &str, config: &Config) -> LinkReport {
    let mut url = if config.sanitize {
        sanitize_link(input)
    } else {
        input.to_string()
    };
    if config.strip_tracking {
        url = strip_tracking_params(&url);
    }

    let classification = handlers::classify(&url);
    let link = classification.link();

    LinkReport {
        input: input.to_string(),
        handled: link.is_some(),
        service: link.map(handlers::ServiceLink::service),
        kind: link.map(handlers::ServiceLink::kind),
        identifiers: link
            .map(|l| {
                l.identifiers()
                    .into_iter()
                    .map(|(role, value)| (role.to_string(), value.to_string()))
                    .collect()
            })
            .unwrap_or_default(),
        derived: link.map(handlers::ServiceLink::derived_links),
        channel_url: link.and_then(handlers::ServiceLink::channel_url),
        url,
    }
}

/// Render a report in the requested format, without a trailing newline.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &LinkReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(report),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &LinkReport) -> String {
    let mut out = String::new();

    if !report.handled {
        let _ = write!(out, "{} -> unhandled", report.input);
        if report.url != report.input {
            let _ = write!(out, " (sanitized: {})", report.url);
        }
        return out;
    }

    out.push_str(&report.input);
    let mut line = |key: &str, value: &str| {
        let _ = write!(out, "\n  {key}: {value}");
    };

    if report.url != report.input {
        line("url", &report.url);
    }
    if let Some(service) = report.service {
        line("service", service.as_str());
    }
    if let Some(kind) = report.kind {
        line("kind", kind.as_str());
    }
    for (role, value) in &report.identifiers {
        line(role.as_str(), value.as_str());
    }
    if let Some(derived) = &report.derived {
        if let Some(canonical) = &derived.canonical_url {
            line("canonical", canonical.as_str());
        }
        for alternate in &derived.alternate_urls {
            line("alternate", alternate.as_str());
        }
        for feed in &derived.feed_urls {
            line("feed", feed.as_str());
        }
        if let Some(embed) = &derived.embed_url {
            line("embed", embed.as_str());
        }
    }
    if let Some(channel) = &report.channel_url {
        line("channel", channel.as_str());
    }

    out
}
