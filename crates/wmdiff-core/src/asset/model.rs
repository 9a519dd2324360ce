//! Asset model types

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// Kind of asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Package,
    Service,
    Properties,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Package => "package",
            Self::Service => "service",
            Self::Properties => "properties",
        };
        write!(f, "{s}")
    }
}

/// Stable `kind:name` key matching the same asset across snapshots
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    #[must_use]
    pub fn new(kind: AssetKind, name: &str) -> Self {
        Self(format!("{kind}:{name}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deployment environment encoded in a property file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentPrefix {
    #[serde(rename = "DV")]
    Development,
    #[serde(rename = "IT")]
    Integration,
    #[serde(rename = "UA")]
    Acceptance,
    #[serde(rename = "PD")]
    Production,
}

impl EnvironmentPrefix {
    pub const ALL: [Self; 4] = [
        Self::Development,
        Self::Integration,
        Self::Acceptance,
        Self::Production,
    ];

    /// The token before the first `_` in a property file name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "DV",
            Self::Integration => "IT",
            Self::Acceptance => "UA",
            Self::Production => "PD",
        }
    }

    /// Parse from a token such as `DV`
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == token)
    }

    /// Derive the prefix from a file name, e.g. `PD_server.cnf`
    ///
    /// Only names of the form `<TOKEN>_...` with a recognized token match.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (token, _) = name.split_once('_')?;
        Self::from_token(token)
    }
}

impl fmt::Display for EnvironmentPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An IS flow service, identified by its dotted namespace path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    name: String,
    package_name: String,
    path: PathBuf,
    fingerprint: Option<Fingerprint>,
}

impl Service {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        path: impl Into<PathBuf>,
        fingerprint: Option<Fingerprint>,
    ) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            path: path.into(),
            fingerprint,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the package the service was found in
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }
}

/// An IS package and the services it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    name: String,
    path: PathBuf,
    fingerprint: Option<Fingerprint>,
    services: Vec<Service>,
}

impl Package {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        fingerprint: Option<Fingerprint>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            fingerprint,
            services: Vec::new(),
        }
    }

    /// Attach the services discovered under the package
    #[must_use]
    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }
}

/// An environment-specific property file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    name: String,
    path: PathBuf,
    fingerprint: Option<Fingerprint>,
    environment: EnvironmentPrefix,
}

impl Properties {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        fingerprint: Option<Fingerprint>,
        environment: EnvironmentPrefix,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            fingerprint,
            environment,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    #[must_use]
    pub fn environment(&self) -> EnvironmentPrefix {
        self.environment
    }
}

/// Any discoverable asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Asset {
    Package(Package),
    Service(Service),
    Properties(Properties),
}

impl Asset {
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Package(_) => AssetKind::Package,
            Self::Service(_) => AssetKind::Service,
            Self::Properties(_) => AssetKind::Properties,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Package(p) => p.name(),
            Self::Service(s) => s.name(),
            Self::Properties(p) => p.name(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Package(p) => p.path(),
            Self::Service(s) => s.path(),
            Self::Properties(p) => p.path(),
        }
    }

    /// Content fingerprint, `None` if the content could not be read
    #[must_use]
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        match self {
            Self::Package(p) => p.fingerprint(),
            Self::Service(s) => s.fingerprint(),
            Self::Properties(p) => p.fingerprint(),
        }
    }

    #[must_use]
    pub fn asset_id(&self) -> AssetId {
        AssetId::new(self.kind(), self.name())
    }

    /// Whether the content of `self` and `other` is known to be identical.
    ///
    /// Unknown fingerprints never match, not even each other.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        match (self.fingerprint(), other.fingerprint()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Package> for Asset {
    fn from(package: Package) -> Self {
        Self::Package(package)
    }
}

impl From<Service> for Asset {
    fn from(service: Service) -> Self {
        Self::Service(service)
    }
}

impl From<Properties> for Asset {
    fn from(properties: Properties) -> Self {
        Self::Properties(properties)
    }
}

/// Expand packages so each service is also a top-level entry.
///
/// Every package is followed by its services, in discovery order.
#[must_use]
pub fn flatten(assets: Vec<Asset>) -> Vec<Asset> {
    let mut flat = Vec::with_capacity(assets.len());
    for asset in assets {
        let services = match &asset {
            Asset::Package(package) => package.services().to_vec(),
            _ => Vec::new(),
        };
        flat.push(asset);
        flat.extend(services.into_iter().map(Asset::Service));
    }
    flat
}
