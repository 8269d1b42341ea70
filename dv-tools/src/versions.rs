//! Release version bookkeeping.
//!
//! `VERSION.toml` at the repository root is the single source of truth:
//!
//! ```toml
//! major = 0
//! minor = 3
//!
//! [patch]
//! rust = 0
//! python = 1
//! cpp = 0
//! ```
//!
//! Each [`Package`] owns one manifest whose version must equal
//! `major.minor.patch[package]`. The checker reports drift, rewrites the
//! manifest when asked to, and refuses any version that its package registry
//! already publishes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Parsed `VERSION.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionFile {
    pub major: u64,
    pub minor: u64,
    pub patch: BTreeMap<String, u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("VERSION.toml has no patch entry for `{0}`")]
    MissingPatch(&'static str),
    #[error("{path}: no version found ({what})")]
    VersionNotFound { path: PathBuf, what: &'static str },
}

impl VersionFile {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid VERSION.toml")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text)
    }

    /// The full version string for `package`.
    pub fn version_for(&self, package: Package) -> Result<String, VersionError> {
        let patch = self
            .patch
            .get(package.key())
            .ok_or(VersionError::MissingPatch(package.key()))?;
        Ok(format!("{}.{}.{}", self.major, self.minor, patch))
    }
}

/// A released artifact whose manifest carries a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
    Rust,
    Python,
    Cpp,
}

impl Package {
    pub const ALL: [Package; 3] = [Package::Rust, Package::Python, Package::Cpp];

    /// Key in the `[patch]` table.
    pub const fn key(self) -> &'static str {
        match self {
            Package::Rust => "rust",
            Package::Python => "python",
            Package::Cpp => "cpp",
        }
    }

    /// Manifest path, relative to the repository root.
    pub const fn manifest(self) -> &'static str {
        match self {
            // Member crates inherit `version.workspace = true`.
            Package::Rust => "Cargo.toml",
            Package::Python => "pyproject.toml",
            Package::Cpp => "cpp/CMakeLists.txt",
        }
    }

    /// Reads the version currently declared in `text`.
    pub fn read_version(self, text: &str) -> Option<String> {
        match self {
            Package::Rust => toml_string(text, &["workspace", "package", "version"]),
            Package::Python => toml_string(text, &["project", "version"]),
            Package::Cpp => cmake_version_span(text).map(|(start, end)| text[start..end].to_string()),
        }
    }

    /// Returns `text` with its declared version replaced by `version`,
    /// leaving every other line untouched.
    pub fn write_version(self, text: &str, version: &str) -> Option<String> {
        match self {
            Package::Rust => replace_toml_key(text, "workspace.package", "version", version),
            Package::Python => replace_toml_key(text, "project", "version", version),
            Package::Cpp => {
                let (start, end) = cmake_version_span(text)?;
                Some(format!("{}{}{}", &text[..start], version, &text[end..]))
            }
        }
    }

    /// Name under which the package is published, if it has a registry.
    fn registry_name(self, manifest: &str) -> Option<String> {
        match self {
            Package::Rust => Some("dv-core".to_string()),
            Package::Python => {
                toml_string(manifest, &["project", "name"]).or_else(|| Some("dv".to_string()))
            }
            Package::Cpp => None,
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Package::Rust => "Rust",
            Package::Python => "Python",
            Package::Cpp => "C++",
        })
    }
}

fn toml_string(text: &str, path: &[&str]) -> Option<String> {
    let table: toml::Table = text.parse().ok()?;
    let (first, rest) = path.split_first()?;
    let mut value = table.get(*first)?;
    for key in rest {
        value = value.get(*key)?;
    }
    value.as_str().map(str::to_string)
}

/// Line-based rewrite of `key = "..."` inside `[section]`.
fn replace_toml_key(text: &str, section: &str, key: &str, value: &str) -> Option<String> {
    let mut current = String::new();
    let mut replaced = false;
    let mut out = Vec::new();

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && !trimmed.starts_with("[[") {
            current = trimmed.trim_matches(|c| c == '[' || c == ']').trim().to_string();
        }
        let is_target = !replaced
            && current == section
            && trimmed
                .strip_prefix(key)
                .map(|rest| rest.trim_start().starts_with('='))
                .unwrap_or(false);
        if is_target {
            let indent = &line[..line.len() - line.trim_start().len()];
            let newline = if line.ends_with("\r\n") {
                "\r\n"
            } else if line.ends_with('\n') {
                "\n"
            } else {
                ""
            };
            out.push(format!("{indent}{key} = \"{value}\"{newline}"));
            replaced = true;
        } else {
            out.push(line.to_string());
        }
    }

    replaced.then(|| out.concat())
}

/// Byte span of `x.y.z` in `project(<name> ... VERSION x.y.z ...)`.
/// CMake allows whitespace between a command name and its `(`.
fn cmake_version_span(text: &str) -> Option<(usize, usize)> {
    let lower = text.to_ascii_lowercase();
    let open = project_args_start(&lower)?;
    let close = open + lower[open..].find(')')?;
    let args = &text[open..close];

    let mut offset = 0;
    let mut tokens = args.split_whitespace().map(|tok| {
        let start = offset + args[offset..].find(tok).unwrap_or(0);
        offset = start + tok.len();
        (start, tok)
    });
    while let Some((_, tok)) = tokens.next() {
        if tok == "VERSION" {
            let (start, version) = tokens.next()?;
            if !version.chars().all(|c| c.is_ascii_digit() || c == '.') {
                return None;
            }
            return Some((open + start, open + start + version.len()));
        }
    }
    None
}

/// Offset just past the `(` of the first `project` command.
fn project_args_start(lower: &str) -> Option<usize> {
    lower.match_indices("project").find_map(|(at, word)| {
        let preceded = lower[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if preceded {
            return None;
        }
        let after = at + word.len();
        let rest = &lower[after..];
        let gap = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        rest[gap..].starts_with('(').then_some(after + gap + 1)
    })
}

/// Source of already-published versions.
pub trait Registry {
    /// Every version published under `name` for `package`. An unknown name
    /// yields an empty list.
    fn published_versions(&self, package: Package, name: &str) -> anyhow::Result<Vec<String>>;
}

/// Registry that never reports anything as published (`--offline`).
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineRegistry;

impl Registry for OfflineRegistry {
    fn published_versions(&self, _: Package, _: &str) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// crates.io and PyPI over HTTPS.
pub struct HttpRegistry {
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct CratesResponse {
    versions: Vec<CrateVersion>,
}

#[derive(Deserialize)]
struct CrateVersion {
    num: String,
}

#[derive(Deserialize)]
struct PypiResponse {
    releases: HashMap<String, IgnoredAny>,
}

impl HttpRegistry {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("dv-versions/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<Option<T>> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("requesting {url}"))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .with_context(|| format!("requesting {url}"))?;
        Ok(Some(
            response.json().with_context(|| format!("decoding {url}"))?,
        ))
    }
}

impl Registry for HttpRegistry {
    fn published_versions(&self, package: Package, name: &str) -> anyhow::Result<Vec<String>> {
        match package {
            Package::Rust => {
                let url = format!("https://crates.io/api/v1/crates/{name}");
                Ok(self
                    .fetch::<CratesResponse>(&url)?
                    .map(|r| r.versions.into_iter().map(|v| v.num).collect())
                    .unwrap_or_default())
            }
            Package::Python => {
                let url = format!("https://pypi.org/pypi/{name}/json");
                Ok(self
                    .fetch::<PypiResponse>(&url)?
                    .map(|r| r.releases.into_keys().collect())
                    .unwrap_or_default())
            }
            Package::Cpp => Ok(Vec::new()),
        }
    }
}

/// What [`check_package`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The manifest already declares the wanted version.
    Consistent,
    /// The manifest was rewritten.
    Updated { from: String },
    /// Dry run: the manifest differs and was left alone.
    Inconsistent,
    /// The manifest differs but the wanted version is already published.
    Blocked,
}

/// Result of checking one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub package: Package,
    pub current: String,
    pub wanted: String,
    pub published: bool,
    pub action: Action,
}

impl Report {
    /// `false` if the release must not go ahead.
    pub fn passed(&self) -> bool {
        !self.published && matches!(self.action, Action::Consistent | Action::Updated { .. })
    }

    fn log(&self) {
        info!("--- {} version check ---", self.package);
        if self.published {
            warn!("{} {} is already published", self.package, self.wanted);
        } else {
            info!("{} {} is not yet published", self.package, self.wanted);
        }
        match &self.action {
            Action::Consistent => info!("{} manifest is consistent", self.package),
            Action::Updated { from } => {
                warn!("Updated {} manifest from {} to {}", self.package, from, self.wanted)
            }
            Action::Inconsistent => warn!(
                "{} manifest is inconsistent: manifest {}, VERSION.toml {}",
                self.package, self.current, self.wanted
            ),
            Action::Blocked => warn!(
                "{} manifest cannot be updated: {} is already published",
                self.package, self.wanted
            ),
        }
    }
}

/// Checks (and unless `dry_run`, fixes) the manifest of `package` under `root`.
pub fn check_package(
    root: &Path,
    versions: &VersionFile,
    package: Package,
    dry_run: bool,
    registry: &dyn Registry,
) -> anyhow::Result<Report> {
    let wanted = versions.version_for(package)?;
    let path = root.join(package.manifest());
    let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let current = package
        .read_version(&text)
        .ok_or_else(|| VersionError::VersionNotFound {
            path: path.clone(),
            what: "read",
        })?;

    let published = match package.registry_name(&text) {
        Some(name) => registry
            .published_versions(package, &name)?
            .iter()
            .any(|v| *v == wanted),
        None => false,
    };

    let action = if current == wanted {
        Action::Consistent
    } else if dry_run {
        Action::Inconsistent
    } else if published {
        Action::Blocked
    } else {
        let updated = package
            .write_version(&text, &wanted)
            .ok_or_else(|| VersionError::VersionNotFound {
                path: path.clone(),
                what: "rewrite",
            })?;
        fs::write(&path, updated).with_context(|| format!("writing {}", path.display()))?;
        Action::Updated {
            from: current.clone(),
        }
    };

    let report = Report {
        package,
        current,
        wanted,
        published,
        action,
    };
    report.log();
    Ok(report)
}

/// Command-line options of `dv-versions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub dry_run: bool,
    pub offline: bool,
    pub packages: Vec<Package>,
    pub version_file: PathBuf,
    pub root: PathBuf,
}

impl Options {
    pub const USAGE: &'static str = "usage: dv-versions [--dry-run] [--offline] [--all | --rust | --python | --cpp]... [--version-file PATH] [--root DIR]";

    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Options {
            dry_run: false,
            offline: false,
            packages: Vec::new(),
            version_file: PathBuf::from("VERSION.toml"),
            root: PathBuf::from("."),
        };
        let mut all = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dry-run" | "--dryrun" => options.dry_run = true,
                "--offline" => options.offline = true,
                "--all" => all = true,
                "--rust" => options.packages.push(Package::Rust),
                "--python" => options.packages.push(Package::Python),
                "--cpp" => options.packages.push(Package::Cpp),
                "--version-file" | "--version_file" => {
                    let Some(path) = args.next() else {
                        bail!("--version-file needs a path\n{}", Self::USAGE);
                    };
                    options.version_file = PathBuf::from(path);
                }
                "--root" => {
                    let Some(dir) = args.next() else {
                        bail!("--root needs a directory\n{}", Self::USAGE);
                    };
                    options.root = PathBuf::from(dir);
                }
                other => bail!("unknown argument {other:?}\n{}", Self::USAGE),
            }
        }

        if all || options.packages.is_empty() {
            options.packages = Package::ALL.to_vec();
        }
        options.packages.dedup();
        Ok(options)
    }
}

/// Runs every selected check. Returns whether all of them passed.
pub fn run(options: &Options, registry: &dyn Registry) -> anyhow::Result<bool> {
    if options.dry_run {
        info!("Dry run: no files will be modified");
    }
    let version_path = if options.version_file.is_absolute() {
        options.version_file.clone()
    } else {
        options.root.join(&options.version_file)
    };
    let versions = VersionFile::load(&version_path)?;

    let mut all_passed = true;
    for package in &options.packages {
        let report = check_package(&options.root, &versions, *package, options.dry_run, registry)?;
        all_passed &= report.passed();
    }
    Ok(all_passed)
}
