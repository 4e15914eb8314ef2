//! Which parts of a row are emitted after decoding.

use cellcodec_commons::IncludeConfig;

/// Field-inclusion policy.
///
/// Everything is included by default. `include_size` counts the included
/// cell parts (family, qualifier, timestamp, value) and decides the shape of
/// a decoded cell: exactly one part gives a scalar, anything else a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InclusionPolicy {
    include_key: bool,
    include_family: bool,
    include_qualifier: bool,
    include_timestamp: bool,
    include_value: bool,
    include_size: usize,
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self {
            include_key: true,
            include_family: true,
            include_qualifier: true,
            include_timestamp: true,
            include_value: true,
            include_size: 4,
        }
    }
}

impl InclusionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_key(&self) -> bool {
        self.include_key
    }

    pub fn include_family(&self) -> bool {
        self.include_family
    }

    pub fn include_qualifier(&self) -> bool {
        self.include_qualifier
    }

    pub fn include_timestamp(&self) -> bool {
        self.include_timestamp
    }

    pub fn include_value(&self) -> bool {
        self.include_value
    }

    pub fn include_size(&self) -> usize {
        self.include_size
    }

    pub fn set_include_key(&mut self, include: bool) {
        self.include_key = include;
    }

    pub fn set_include_family(&mut self, include: bool) {
        self.include_family = include;
        self.recompute_size();
    }

    pub fn set_include_qualifier(&mut self, include: bool) {
        self.include_qualifier = include;
        self.recompute_size();
    }

    pub fn set_include_timestamp(&mut self, include: bool) {
        self.include_timestamp = include;
        self.recompute_size();
    }

    pub fn set_include_value(&mut self, include: bool) {
        self.include_value = include;
        self.recompute_size();
    }

    fn recompute_size(&mut self) {
        self.include_size = [
            self.include_family,
            self.include_qualifier,
            self.include_timestamp,
            self.include_value,
        ]
        .into_iter()
        .filter(|included| *included)
        .count();
    }
}

impl From<&IncludeConfig> for InclusionPolicy {
    fn from(config: &IncludeConfig) -> Self {
        let mut policy = InclusionPolicy::default();
        policy.set_include_key(config.key);
        policy.set_include_family(config.family);
        policy.set_include_qualifier(config.qualifier);
        policy.set_include_timestamp(config.timestamp);
        policy.set_include_value(config.value);
        policy
    }
}
