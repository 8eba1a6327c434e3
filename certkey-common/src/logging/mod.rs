// Logging utilities for the certkey tools
//
// This module provides:
// - Component-based structured logging on top of the `log` facade
// - A context label carried through child loggers (file name, profile, ...)
// - A serializable logging configuration with per-component levels

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Arguments, Display, Formatter};

/// Predefined components for logging categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Keys,
    Certificates,
    Pkcs12,
    Cli,
    Custom(&'static str),
}

impl Component {
    /// Get the string representation of the component
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Keys => "Keys",
            Component::Certificates => "Certs",
            Component::Pkcs12 => "PKCS12",
            Component::Cli => "CLI",
            Component::Custom(name) => *name,
        }
    }

    /// `log` target used for records emitted by this component
    pub fn target(&self) -> &'static str {
        match self {
            Component::Keys => "certkey::keys",
            Component::Certificates => "certkey::certs",
            Component::Pkcs12 => "certkey::pkcs12",
            Component::Cli => "certkey::cli",
            Component::Custom(name) => *name,
        }
    }
}

struct ComponentPrefixDisplay {
    parent: Option<Component>,
    component: Component,
}

impl Display for ComponentPrefixDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) if parent != self.component => {
                write!(f, "{}.{}", parent.as_str(), self.component.as_str())
            }
            _ => write!(f, "{}", self.component.as_str()),
        }
    }
}

/// A helper for creating component-specific loggers with a context label
#[derive(Debug, Clone)]
pub struct Logger {
    /// Component this logger is for
    component: Component,
    /// Free-form context (process name, file being inspected, ...)
    context: String,
    /// Parent component for hierarchical logging (if any)
    parent_component: Option<Component>,
}

impl Logger {
    /// Create a new root logger for a specific component and context label
    pub fn new_root(component: Component, context: &str) -> Self {
        Self {
            component,
            context: context.to_string(),
            parent_component: None,
        }
    }

    /// Create a child logger with the same context but a different component
    pub fn with_component(&self, component: Component) -> Self {
        Self {
            component,
            context: self.context.clone(),
            parent_component: Some(self.component),
        }
    }

    /// Create a logger with the same component and a new context label
    pub fn with_context(&self, context: impl Into<String>) -> Self {
        Self {
            component: self.component,
            context: context.into(),
            parent_component: self.parent_component,
        }
    }

    /// Get the component of this logger
    pub fn component(&self) -> Component {
        self.component
    }

    /// Get a reference to the context label
    pub fn context(&self) -> &str {
        &self.context
    }

    fn prefix(&self) -> ComponentPrefixDisplay {
        ComponentPrefixDisplay {
            parent: self.parent_component,
            component: self.component,
        }
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Into<String>) {
        if log::log_enabled!(target: self.component.target(), log::Level::Debug) {
            debug!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                message.into()
            );
        }
    }

    /// Log a debug message using fmt::Arguments (avoids allocating message String)
    pub fn debug_args(&self, args: Arguments) {
        if log::log_enabled!(target: self.component.target(), log::Level::Debug) {
            debug!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                args
            );
        }
    }

    /// Log an info message
    pub fn info(&self, message: impl Into<String>) {
        if log::log_enabled!(target: self.component.target(), log::Level::Info) {
            info!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                message.into()
            );
        }
    }

    /// Log an info message using fmt::Arguments
    pub fn info_args(&self, args: Arguments) {
        if log::log_enabled!(target: self.component.target(), log::Level::Info) {
            info!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                args
            );
        }
    }

    /// Log a static info message without allocation
    pub fn info_static(&self, msg: &'static str) {
        if log::log_enabled!(target: self.component.target(), log::Level::Info) {
            info!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                msg
            );
        }
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Into<String>) {
        if log::log_enabled!(target: self.component.target(), log::Level::Warn) {
            warn!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                message.into()
            );
        }
    }

    /// Log a warning using fmt::Arguments
    pub fn warn_args(&self, args: Arguments) {
        if log::log_enabled!(target: self.component.target(), log::Level::Warn) {
            warn!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                args
            );
        }
    }

    /// Log an error message
    pub fn error(&self, message: impl Into<String>) {
        if log::log_enabled!(target: self.component.target(), log::Level::Error) {
            error!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                message.into()
            );
        }
    }

    /// Log an error using fmt::Arguments
    pub fn error_args(&self, args: Arguments) {
        if log::log_enabled!(target: self.component.target(), log::Level::Error) {
            error!(
                target: self.component.target(),
                "[{}][{}] {}",
                self.context,
                self.prefix(),
                args
            );
        }
    }
}

/// Log level used by [`LoggingConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Serializable key naming a component in a [`LoggingConfig`]
///
/// Serialized as a plain string (`"keys"`, `"pkcs12"`, ...) so it can be used
/// as a JSON map key; unknown names become [`ComponentKey::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKey {
    Keys,
    Certificates,
    Pkcs12,
    Cli,
    Custom(String),
}

impl ComponentKey {
    /// `log` target matching [`Component::target`]
    pub fn target(&self) -> &str {
        match self {
            ComponentKey::Keys => Component::Keys.target(),
            ComponentKey::Certificates => Component::Certificates.target(),
            ComponentKey::Pkcs12 => Component::Pkcs12.target(),
            ComponentKey::Cli => Component::Cli.target(),
            ComponentKey::Custom(name) => name,
        }
    }
}

impl From<String> for ComponentKey {
    fn from(name: String) -> Self {
        match name.as_str() {
            "keys" => ComponentKey::Keys,
            "certificates" => ComponentKey::Certificates,
            "pkcs12" => ComponentKey::Pkcs12,
            "cli" => ComponentKey::Cli,
            _ => ComponentKey::Custom(name),
        }
    }
}

impl From<ComponentKey> for String {
    fn from(key: ComponentKey) -> Self {
        match key {
            ComponentKey::Keys => "keys".to_string(),
            ComponentKey::Certificates => "certificates".to_string(),
            ComponentKey::Pkcs12 => "pkcs12".to_string(),
            ComponentKey::Cli => "cli".to_string(),
            ComponentKey::Custom(name) => name,
        }
    }
}

impl From<Component> for ComponentKey {
    fn from(component: Component) -> Self {
        match component {
            Component::Keys => ComponentKey::Keys,
            Component::Certificates => ComponentKey::Certificates,
            Component::Pkcs12 => ComponentKey::Pkcs12,
            Component::Cli => ComponentKey::Cli,
            Component::Custom(name) => ComponentKey::Custom(name.to_string()),
        }
    }
}

/// Logging configuration: a default level plus per-component overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub default_level: LogLevel,
    #[serde(default)]
    pub component_levels: HashMap<ComponentKey, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::default_info()
    }
}

impl LoggingConfig {
    /// Create a configuration that only reports warnings and errors
    pub fn new() -> Self {
        Self {
            default_level: LogLevel::Warn,
            component_levels: HashMap::new(),
        }
    }

    /// Info level everywhere
    pub fn default_info() -> Self {
        Self {
            default_level: LogLevel::Info,
            component_levels: HashMap::new(),
        }
    }

    pub fn with_default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_component_level(mut self, component: impl Into<ComponentKey>, level: LogLevel) -> Self {
        self.component_levels.insert(component.into(), level);
        self
    }

    /// Most verbose level requested anywhere in this configuration
    pub fn max_level(&self) -> LogLevel {
        self.component_levels
            .values()
            .copied()
            .fold(self.default_level, LogLevel::max)
    }

    /// Render as an `env_logger`/`RUST_LOG` style filter string
    pub fn filter_spec(&self) -> String {
        let mut overrides: Vec<String> = self
            .component_levels
            .iter()
            .map(|(key, level)| format!("{}={}", key.target(), level.as_str()))
            .collect();
        overrides.sort();

        let mut parts = vec![self.default_level.as_str().to_string()];
        parts.extend(overrides);
        parts.join(",")
    }
}
