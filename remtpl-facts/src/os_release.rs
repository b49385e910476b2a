//! `/etc/os-release` parsing and distribution → OS family mapping.

use std::collections::HashMap;

/// The handful of os-release keys the facts care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: Option<String>,
    pub id_like: Vec<String>,
    pub name: Option<String>,
    pub version_id: Option<String>,
    pub version_codename: Option<String>,
}

/// Parse os-release `KEY=value` lines. Unknown keys, comments and malformed
/// lines are ignored; surrounding single or double quotes are stripped.
pub fn parse(content: &str) -> OsRelease {
    let fields: HashMap<&str, String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), unquote(value.trim())))
        .collect();

    let field = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

    OsRelease {
        id: field("ID").map(|id| id.to_lowercase()),
        id_like: field("ID_LIKE")
            .map(|like| like.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default(),
        name: field("NAME"),
        version_id: field("VERSION_ID"),
        version_codename: field("VERSION_CODENAME"),
    }
}

fn unquote(value: &str) -> String {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value).to_string()
}

impl OsRelease {
    /// Canonical distribution name, e.g. `Ubuntu`, `RedHat`, `Archlinux`.
    pub fn distribution(&self) -> Option<String> {
        let canonical = self.id.as_deref().and_then(|id| match id {
            "ubuntu" => Some("Ubuntu"),
            "debian" => Some("Debian"),
            "rhel" => Some("RedHat"),
            "centos" => Some("CentOS"),
            "fedora" => Some("Fedora"),
            "rocky" => Some("Rocky"),
            "almalinux" => Some("AlmaLinux"),
            "amzn" => Some("Amazon"),
            "arch" => Some("Archlinux"),
            "alpine" => Some("Alpine"),
            "sles" => Some("SLES"),
            "gentoo" => Some("Gentoo"),
            id if id.starts_with("opensuse") => Some("openSUSE"),
            _ => None,
        });
        canonical.map(str::to_string).or_else(|| self.name.clone())
    }

    /// OS family, resolved from `ID` first and then each `ID_LIKE` entry.
    pub fn os_family(&self) -> Option<&'static str> {
        self.id
            .iter()
            .chain(self.id_like.iter())
            .find_map(|id| family_of(id))
    }
}

fn family_of(id: &str) -> Option<&'static str> {
    match id {
        "debian" | "ubuntu" | "linuxmint" | "raspbian" => Some("Debian"),
        "rhel" | "centos" | "fedora" | "rocky" | "almalinux" | "amzn" | "ol" => Some("RedHat"),
        "arch" | "manjaro" => Some("Archlinux"),
        "alpine" => Some("Alpine"),
        "suse" | "sles" => Some("Suse"),
        "gentoo" => Some("Gentoo"),
        id if id.starts_with("opensuse") => Some("Suse"),
        _ => None,
    }
}
