use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    Provider,
    Publisher,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginKind::Provider => f.write_str("provider"),
            PluginKind::Publisher => f.write_str("publisher"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub class_identifier: String,
    pub display_name: String,
    pub kind: PluginKind,
}

impl PluginDescriptor {
    pub fn new(
        kind: PluginKind,
        class_identifier: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            class_identifier: class_identifier.into(),
            display_name: display_name.into(),
            kind,
        }
    }
}

/// Providers and publishers known to the backend, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginDirectory {
    providers: Vec<PluginDescriptor>,
    publishers: Vec<PluginDescriptor>,
}

impl PluginDirectory {
    /// Builds the directory, re-tagging each descriptor with the kind of the
    /// list it arrived in.
    pub fn new(providers: Vec<PluginDescriptor>, publishers: Vec<PluginDescriptor>) -> Self {
        let tag = |kind: PluginKind, list: Vec<PluginDescriptor>| {
            list.into_iter()
                .map(|descriptor| PluginDescriptor { kind, ..descriptor })
                .collect()
        };
        Self {
            providers: tag(PluginKind::Provider, providers),
            publishers: tag(PluginKind::Publisher, publishers),
        }
    }

    pub fn plugins(&self, kind: PluginKind) -> &[PluginDescriptor] {
        match kind {
            PluginKind::Provider => &self.providers,
            PluginKind::Publisher => &self.publishers,
        }
    }

    /// Linear scan; the first descriptor with a matching class wins.
    pub fn resolve(&self, kind: PluginKind, class_identifier: &str) -> Option<&PluginDescriptor> {
        self.plugins(kind)
            .iter()
            .find(|descriptor| descriptor.class_identifier == class_identifier)
    }
}

/// Display projection of a plugin reference on a job row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginName {
    Resolved(String),
    /// The job names a class the directory does not know.
    Unknown { class_identifier: String },
}

impl PluginName {
    pub fn lookup(directory: &PluginDirectory, kind: PluginKind, class_identifier: &str) -> Self {
        match directory.resolve(kind, class_identifier) {
            Some(descriptor) => PluginName::Resolved(descriptor.display_name.clone()),
            None => PluginName::Unknown {
                class_identifier: class_identifier.to_string(),
            },
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PluginName::Unknown { .. })
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginName::Resolved(name) => f.write_str(name),
            PluginName::Unknown { class_identifier } => {
                write!(f, "Unknown ({class_identifier})")
            }
        }
    }
}
