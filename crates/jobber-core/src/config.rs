use anyhow::Context;
use chrono_tz::Tz;
use serde::{
  Deserialize,
  Serialize
};

use crate::due::parse_timezone;
use crate::gateway::Endpoints;
use crate::mutation::SettleStrategy;

pub const DEFAULT_API_BASE_URL: &str =
  "http://localhost:8000";

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "snake_case")]
pub enum GatewayKind {
  #[default]
  Http,
  Memory
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(default)]
pub struct AppConfig {
  pub api_base_url:      String,
  pub owner_id:          u64,
  pub timezone:          Option<String>,
  pub gateway:           GatewayKind,
  pub settle:            SettleStrategy,
  pub create_settle_ms:  u32,
  pub update_settle_ms:  u32,
  pub delete_settle_ms:  u32,
  pub toast_duration_ms: u32,
  pub log_level:         String,
  pub user_name:         String
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      api_base_url:      DEFAULT_API_BASE_URL
        .to_string(),
      owner_id:          1,
      timezone:          None,
      gateway:           GatewayKind::Http,
      settle:            SettleStrategy::Refresh,
      create_settle_ms:  1500,
      update_settle_ms:  1500,
      delete_settle_ms:  1000,
      toast_duration_ms: 4000,
      log_level:         "info".to_string(),
      user_name:         "Henrique Silveira"
        .to_string()
    }
  }
}

impl AppConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<AppConfig>(raw)
        .context(
          "failed to parse app config"
        )?;
    config.sanitize();
    Ok(config)
  }

  /// Parses `raw`, logging and falling back to defaults on error.
  pub fn load_or_default(
    raw: &str
  ) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(config) => {
        tracing::info!(
          api_base_url = %config.api_base_url,
          gateway = ?config.gateway,
          settle = ?config.settle,
          "loaded app config"
        );
        config
      }
      | Err(error) => {
        tracing::error!(
          error = %format!("{error:#}"),
          "failed parsing app config; \
           using defaults"
        );
        AppConfig::default()
      }
    }
  }

  pub fn sanitize(&mut self) {
    let defaults = AppConfig::default();

    if self.api_base_url.trim().is_empty()
    {
      self.api_base_url =
        defaults.api_base_url.clone();
    }
    self.api_base_url = self
      .api_base_url
      .trim()
      .trim_end_matches('/')
      .to_string();

    if self.owner_id == 0 {
      self.owner_id = defaults.owner_id;
    }

    if self
      .timezone
      .as_deref()
      .is_some_and(|tz| tz.trim().is_empty())
    {
      self.timezone = None;
    }

    if self.toast_duration_ms == 0 {
      self.toast_duration_ms =
        defaults.toast_duration_ms;
    }

    if self.log_level.trim().is_empty() {
      self.log_level = defaults.log_level;
    }
  }

  pub fn with_api_base_url(
    mut self,
    url: &str
  ) -> Self {
    if !url.trim().is_empty() {
      self.api_base_url = url.to_string();
      self.sanitize();
    }
    self
  }

  pub fn endpoints(&self) -> Endpoints {
    Endpoints::new(&self.api_base_url)
  }

  pub fn tz(&self) -> Option<Tz> {
    self
      .timezone
      .as_deref()
      .and_then(parse_timezone)
  }

  /// Whether UI debug events are mirrored to the browser console.
  pub fn verbose(&self) -> bool {
    let level = self.log_level.trim();
    level.eq_ignore_ascii_case("debug")
      || level.eq_ignore_ascii_case("trace")
  }

  /// Avatar initials derived from `user_name`.
  pub fn user_initials(&self) -> String {
    self
      .user_name
      .split_whitespace()
      .filter_map(|part| part.chars().next())
      .take(2)
      .flat_map(char::to_uppercase)
      .collect()
  }
}
