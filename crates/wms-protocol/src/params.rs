//! Raw KVP parameter access.
//!
//! The HTTP layer hands over query parameters in whatever collection it uses;
//! validation only needs exact-key lookup where a missing key is distinguishable
//! from an empty value.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Parameter names read by GetMap validation.
pub mod keys {
    pub const VERSION: &str = "VERSION";
    pub const LAYERS: &str = "LAYERS";
    pub const STYLES: &str = "STYLES";
    pub const CRS: &str = "CRS";
    pub const BBOX: &str = "BBOX";
    pub const WIDTH: &str = "WIDTH";
    pub const HEIGHT: &str = "HEIGHT";
    pub const FORMAT: &str = "FORMAT";
    pub const CQL_FILTER: &str = "CQL_FILTER";
}

/// Read access to request parameters by exact key.
pub trait ParamSource {
    /// The raw value for `key`, `None` when the key was not sent.
    fn param(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> ParamSource for HashMap<String, String, S> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Ordered pairs, as produced by a query-string decoder. The first occurrence wins.
impl<K: AsRef<str>, V: AsRef<str>> ParamSource for [(K, V)] {
    fn param(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ParamSource for Vec<(K, V)> {
    fn param(&self, key: &str) -> Option<&str> {
        self.as_slice().param(key)
    }
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn param(&self, key: &str) -> Option<&str> {
        (**self).param(key)
    }
}
