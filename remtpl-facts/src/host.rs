//! Host fact collection.
//!
//! [`HostProbe`] reads everything relative to a filesystem root and an
//! explicit environment map, so tests can point it at a fake `/etc` and
//! `/proc` without touching the machine they run on.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use serde_json::{json, Value};

use remtpl_core::{VarMap, PASSWORD_ENV};

use crate::error::{io_err, FactError};
use crate::os_release::{self, OsRelease};

/// Fact mapping handed to the renderer.
pub type Facts = VarMap;

/// Where host facts are read from.
#[derive(Debug, Clone)]
pub struct HostProbe {
    root: PathBuf,
    env: BTreeMap<String, String>,
    home: Option<PathBuf>,
    now: DateTime<FixedOffset>,
}

impl HostProbe {
    /// Probe the running system: `/`, the process environment, the user's home.
    ///
    /// Non-UTF-8 variables and the password variable are left out of `env`.
    pub fn system() -> Self {
        let env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .filter(|(k, _)| k != PASSWORD_ENV)
            .collect();
        let now = Local::now();
        HostProbe {
            root: PathBuf::from("/"),
            env,
            home: dirs::home_dir(),
            now: now.with_timezone(now.offset()),
        }
    }

    /// Probe a fake root with an empty environment.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let now = Local::now();
        HostProbe {
            root: root.into(),
            env: BTreeMap::new(),
            home: None,
            now: now.with_timezone(now.offset()),
        }
    }

    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_now(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now = now;
        self
    }

    /// Gather all facts. Absent sources are skipped; a source that exists but
    /// cannot be read is an error.
    pub fn collect(&self) -> Result<Facts, FactError> {
        let mut facts = Facts::new();

        let system = system_name();
        facts.insert("system".into(), json!(system));
        facts.insert("architecture".into(), json!(std::env::consts::ARCH));
        facts.insert("processor_vcpus".into(), json!(vcpus()));

        if let Some(nodename) = self.hostname()? {
            let short = nodename.split('.').next().unwrap_or(&nodename).to_string();
            facts.insert("hostname".into(), json!(short));
            facts.insert("fqdn".into(), json!(nodename));
            facts.insert("nodename".into(), json!(nodename));
        }

        let release = self.os_release()?;
        let family = release
            .as_ref()
            .and_then(OsRelease::os_family)
            .map(str::to_string)
            .unwrap_or_else(|| system.to_string());
        facts.insert("os_family".into(), json!(family));
        if let Some(release) = release {
            if let Some(distribution) = release.distribution() {
                facts.insert("distribution".into(), json!(distribution));
            }
            if let Some(version) = release.version_id {
                let major = version.split('.').next().unwrap_or(&version).to_string();
                facts.insert("distribution_version".into(), json!(version));
                facts.insert("distribution_major_version".into(), json!(major));
            }
            if let Some(codename) = release.version_codename {
                facts.insert("distribution_release".into(), json!(codename));
            }
        }

        if let Some(user) = self.env_var("USER").or_else(|| self.env_var("USERNAME")) {
            facts.insert("user_id".into(), json!(user));
        }
        if let Some(home) = self.user_dir() {
            facts.insert("user_dir".into(), json!(home.display().to_string()));
        }

        let env: serde_json::Map<String, Value> = self
            .env
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();
        facts.insert("env".into(), Value::Object(env));
        facts.insert("date_time".into(), date_time(&self.now));

        tracing::debug!("collected {} host facts", facts.len());
        Ok(facts)
    }

    fn env_var(&self, key: &str) -> Option<String> {
        self.env.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn user_dir(&self) -> Option<PathBuf> {
        self.env_var("HOME")
            .or_else(|| self.env_var("USERPROFILE"))
            .map(PathBuf::from)
            .or_else(|| self.home.clone())
    }

    fn hostname(&self) -> Result<Option<String>, FactError> {
        for candidate in ["proc/sys/kernel/hostname", "etc/hostname"] {
            if let Some(content) = read_optional(&self.root.join(candidate))? {
                let name = content.trim();
                if !name.is_empty() {
                    return Ok(Some(name.to_string()));
                }
            }
        }
        Ok(self
            .env_var("HOSTNAME")
            .or_else(|| self.env_var("COMPUTERNAME")))
    }

    fn os_release(&self) -> Result<Option<OsRelease>, FactError> {
        for candidate in ["etc/os-release", "usr/lib/os-release"] {
            if let Some(content) = read_optional(&self.root.join(candidate))? {
                return Ok(Some(os_release::parse(&content)));
            }
        }
        Ok(None)
    }
}

/// Collect facts from the running system.
pub fn collect_host_facts() -> Result<Facts, FactError> {
    HostProbe::system().collect()
}

fn read_optional(path: &Path) -> Result<Option<String>, FactError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!("fact source absent: {}", path.display());
            Ok(None)
        }
        Err(err) => Err(io_err(path, err)),
    }
}

fn system_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        other => other,
    }
}

fn vcpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn date_time(now: &DateTime<FixedOffset>) -> Value {
    json!({
        "date": now.format("%Y-%m-%d").to_string(),
        "time": now.format("%H:%M:%S").to_string(),
        "year": now.format("%Y").to_string(),
        "month": now.format("%m").to_string(),
        "day": now.format("%d").to_string(),
        "hour": now.format("%H").to_string(),
        "minute": now.format("%M").to_string(),
        "second": now.format("%S").to_string(),
        "weekday": now.format("%A").to_string(),
        "tz_offset": now.format("%z").to_string(),
        "epoch": now.timestamp().to_string(),
        "iso8601": now
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
