//! Registry of framework Rerrors and their prebuilt templates.
//!
//! Templates are rendered once, when the registry is built, and shared
//! read-only afterwards. The process-wide instance is created by
//! [`init`] during startup; [`global`] hands out the same instance.
//!
//! # Example
//!
//! ```
//! use tpwire::meta::Metadata;
//! use tpwire::rerror::{registry, Rerror};
//!
//! let reg = registry::init();
//!
//! let mut meta = Metadata::new();
//! reg.not_found().inject(&mut meta, Some("user.get"));
//!
//! let r = Rerror::from_meta(&meta).unwrap().unwrap();
//! assert_eq!(r.code(), 404);
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Result, WireError};

use super::{codes, MetaSetting, Rerror};

/// A Rerror paired with its template.
#[derive(Debug, Clone)]
struct Entry {
    rerror: Rerror,
    setting: MetaSetting,
}

impl Entry {
    fn new(rerror: Rerror) -> Self {
        let setting = MetaSetting::from_rerror(&rerror);
        Self { rerror, setting }
    }
}

/// Immutable set of Rerrors indexed by code.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<i32, Entry>,
    unknown: Entry,
}

impl Registry {
    /// Registry holding only the framework Rerrors.
    pub fn new() -> Self {
        let entries = Rerror::FRAMEWORK
            .iter()
            .map(|r| (r.code, Entry::new(r.clone())))
            .collect();
        Self {
            entries,
            unknown: Entry::new(Rerror::UNKNOWN_ERROR),
        }
    }

    /// Start building a registry with application-defined Rerrors.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Rerror for `code`, or the unknown-error singleton.
    pub fn rerror(&self, code: i32) -> &Rerror {
        &self.entry(code).rerror
    }

    /// Template for `code`, or the unknown-error template.
    pub fn meta_setting(&self, code: i32) -> &MetaSetting {
        &self.entry(code).setting
    }

    /// Check if `code` is registered.
    pub fn contains(&self, code: i32) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of registered Rerrors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no Rerrors are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered Rerrors ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = (&Rerror, &MetaSetting)> {
        self.entries.values().map(|e| (&e.rerror, &e.setting))
    }

    fn entry(&self, code: i32) -> &Entry {
        self.entries.get(&code).unwrap_or(&self.unknown)
    }

    /// Template for [`Rerror::UNKNOWN_ERROR`].
    pub fn unknown_error(&self) -> &MetaSetting {
        &self.unknown.setting
    }

    /// Template for [`Rerror::CONN_CLOSED`].
    pub fn conn_closed(&self) -> &MetaSetting {
        self.meta_setting(codes::CONN_CLOSED)
    }

    /// Template for [`Rerror::WRITE_FAILED`].
    pub fn write_failed(&self) -> &MetaSetting {
        self.meta_setting(codes::WRITE_FAILED)
    }

    /// Template for [`Rerror::DIAL_FAILED`].
    pub fn dial_failed(&self) -> &MetaSetting {
        self.meta_setting(codes::DIAL_FAILED)
    }

    /// Template for [`Rerror::BAD_PACKET`].
    pub fn bad_packet(&self) -> &MetaSetting {
        self.meta_setting(codes::BAD_PACKET)
    }

    /// Template for [`Rerror::NOT_FOUND`].
    pub fn not_found(&self) -> &MetaSetting {
        self.meta_setting(codes::NOT_FOUND)
    }

    /// Template for [`Rerror::NOT_IMPLEMENTED`].
    pub fn not_implemented(&self) -> &MetaSetting {
        self.meta_setting(codes::NOT_IMPLEMENTED)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`Registry`] with application-defined Rerrors.
///
/// # Example
///
/// ```
/// use tpwire::rerror::{Registry, Rerror};
///
/// let reg = Registry::builder()
///     .register(Rerror::from_static(1001, "Quota Exceeded"))
///     .unwrap()
///     .build();
///
/// assert_eq!(reg.rerror(1001).message(), "Quota Exceeded");
/// assert_eq!(reg.rerror(1002), &Rerror::UNKNOWN_ERROR);
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    custom: Vec<Rerror>,
}

impl RegistryBuilder {
    /// Create a builder. Framework Rerrors are always included.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an application-defined Rerror.
    ///
    /// # Errors
    ///
    /// - [`WireError::DuplicateCode`] if the code is already registered
    /// - [`WireError::InvalidTemplate`] if the Rerror carries a detail
    pub fn register(mut self, rerror: Rerror) -> Result<Self> {
        if Rerror::FRAMEWORK.iter().any(|r| r.code == rerror.code)
            || self.custom.iter().any(|r| r.code == rerror.code)
        {
            return Err(WireError::DuplicateCode(rerror.code));
        }
        if !rerror.detail().is_empty() {
            return Err(WireError::InvalidTemplate(format!(
                "Rerror {} must not carry a detail",
                rerror.code
            )));
        }
        self.custom.push(rerror);
        Ok(self)
    }

    /// Render every template and freeze the registry.
    pub fn build(self) -> Registry {
        let mut registry = Registry::new();
        for rerror in self.custom {
            tracing::debug!("Registered Rerror {} ({})", rerror.code, rerror.message);
            registry.entries.insert(rerror.code, Entry::new(rerror));
        }
        registry
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Build the process-wide registry.
///
/// Call once during startup. Later calls return the same instance.
pub fn init() -> &'static Registry {
    GLOBAL.get_or_init(|| {
        let registry = Registry::new();
        tracing::debug!("Rerror registry initialized with {} entries", registry.len());
        registry
    })
}

/// Install a custom registry as the process-wide instance.
///
/// Returns the registry back if one is already installed.
pub fn install(registry: Registry) -> std::result::Result<&'static Registry, Registry> {
    GLOBAL.set(registry)?;
    tracing::debug!("Custom Rerror registry installed");
    Ok(init())
}

/// The process-wide registry.
///
/// Startup code should call [`init`] (or [`install`]) first. If neither ran,
/// the default registry is built here and a warning is logged.
pub fn global() -> &'static Registry {
    if let Some(registry) = GLOBAL.get() {
        return registry;
    }
    tracing::warn!("Rerror registry accessed before init(), building default registry");
    init()
}
