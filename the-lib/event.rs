//! Event details and the placeholder values derived from them.
//!
//! Links handed out to attendees are short links built from the event month
//! (`{base}/{prefix}{YYYYMM}-zoom`), and access codes are `{prefix}{YYMM}`.

use chrono::NaiveDate;
use serde::{
  Deserialize,
  Serialize,
};
use url::Url;

use crate::substitution::{
  DATE_VALUE_FORMAT,
  ValueDictionary,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EventConfig {
  pub prefix:         String,
  pub short_url_base: String,
  pub connpass_host:  String,
}

impl Default for EventConfig {
  fn default() -> Self {
    Self {
      prefix:         "event".to_string(),
      short_url_base: "https://bit.ly".to_string(),
      connpass_host:  "xxxxx.connpass.com".to_string(),
    }
  }
}

impl EventConfig {
  /// `{base}/{prefix}{YYYYMM}-{suffix}`.
  pub fn short_link(&self, date: NaiveDate, suffix: &str) -> String {
    format!(
      "{}/{}{}-{suffix}",
      self.short_url_base.trim_end_matches('/'),
      self.prefix,
      date.format("%Y%m")
    )
  }

  /// `{prefix}{YYMM}`, used both as meeting passcode and Q&A event code.
  pub fn event_code(&self, date: NaiveDate) -> String {
    format!("{}{}", self.prefix, date.format("%y%m"))
  }
}

/// Links an operator pastes into the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
  Zoom,
  Youtube,
  Survey,
  Slido,
  Connpass,
}

impl LinkKind {
  pub const ALL: [LinkKind; 5] = [
    LinkKind::Zoom,
    LinkKind::Youtube,
    LinkKind::Survey,
    LinkKind::Slido,
    LinkKind::Connpass,
  ];

  /// Placeholder identifier holding this link.
  pub const fn identifier(self) -> &'static str {
    match self {
      LinkKind::Zoom => "zoomUrl",
      LinkKind::Youtube => "youtubeUrl",
      LinkKind::Survey => "surveyUrl",
      LinkKind::Slido => "slidoUrl",
      LinkKind::Connpass => "connpassUrl",
    }
  }

  /// Host a pasted link must have.
  pub fn expected_host(self, config: &EventConfig) -> &str {
    match self {
      LinkKind::Zoom => "us06web.zoom.us",
      LinkKind::Youtube => "www.youtube.com",
      LinkKind::Survey => "docs.google.com",
      LinkKind::Slido => "app.sli.do",
      LinkKind::Connpass => &config.connpass_host,
    }
  }

  /// Suffix of the generated short link, if this link is shortened.
  const fn short_suffix(self) -> Option<&'static str> {
    match self {
      LinkKind::Zoom => Some("zoom"),
      LinkKind::Youtube => Some("youtube"),
      LinkKind::Survey => Some("survey"),
      LinkKind::Slido => Some("slido"),
      LinkKind::Connpass => None,
    }
  }
}

/// Returns true if `link` is an absolute URL whose host is exactly `host`.
pub fn link_matches_host(link: &str, host: &str) -> bool {
  Url::parse(link.trim()).is_ok_and(|url| url.host_str() == Some(host))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
  pub title:        String,
  pub description:  String,
  pub date:         NaiveDate,
  pub zoom_url:     String,
  pub youtube_url:  String,
  pub survey_url:   String,
  pub slido_url:    String,
  pub connpass_url: String,
}

impl EventDetails {
  pub fn new(date: NaiveDate) -> Self {
    Self {
      title: String::new(),
      description: String::new(),
      date,
      zoom_url: String::new(),
      youtube_url: String::new(),
      survey_url: String::new(),
      slido_url: String::new(),
      connpass_url: String::new(),
    }
  }

  pub fn link(&self, kind: LinkKind) -> &str {
    match kind {
      LinkKind::Zoom => &self.zoom_url,
      LinkKind::Youtube => &self.youtube_url,
      LinkKind::Survey => &self.survey_url,
      LinkKind::Slido => &self.slido_url,
      LinkKind::Connpass => &self.connpass_url,
    }
  }

  /// Whether the link entered for `kind` is empty or points at the expected
  /// host.
  pub fn link_is_valid(&self, kind: LinkKind, config: &EventConfig) -> bool {
    let link = self.link(kind);
    link.is_empty() || link_matches_host(link, kind.expected_host(config))
  }

  /// Builds the value dictionary for the resolver.
  ///
  /// Shortened links are derived from the event month rather than taken from
  /// the pasted URLs; only the connpass page is passed through as entered.
  pub fn values(&self, config: &EventConfig) -> ValueDictionary {
    let mut values = ValueDictionary::with_capacity(10);
    for kind in LinkKind::ALL {
      let value = match kind.short_suffix() {
        Some(suffix) => config.short_link(self.date, suffix),
        None => self.link(kind).to_string(),
      };
      values.insert(kind.identifier().to_string(), value);
    }
    let code = config.event_code(self.date);
    values.insert("zoomPasscode".to_string(), code.clone());
    values.insert("slidoEventCode".to_string(), code);
    values.insert("eventTitle".to_string(), self.title.clone());
    values.insert("eventDescription".to_string(), self.description.clone());
    values.insert(
      "eventDate".to_string(),
      self.date.format(DATE_VALUE_FORMAT).to_string(),
    );
    values
  }
}
