//! Reference-system registry
//!
//! Keeps the ordered list of reference systems the widget offers, their
//! display names and any caller-registered projection definitions. The three
//! mandatory systems are always present regardless of configuration.

use crate::core::config::FinderConfig;
use crate::macros::gated_log;
use crate::prelude::HashMap;
use log::Level;
use once_cell::sync::Lazy;
use proj4rs::proj::Proj;

/// SWEREF 99 TM, the preferred default and the fixed secondary readout system
pub const SWEREF99_TM: &str = "EPSG:3006";
/// Web Mercator, the usual rendering target
pub const WEB_MERCATOR: &str = "EPSG:3857";
/// Geographic WGS 84
pub const WGS84: &str = "EPSG:4326";

/// Systems that are always offered, in presentation order
pub const REQUIRED_CRS: [&str; 3] = [SWEREF99_TM, WEB_MERCATOR, WGS84];

/// The fixed system used for the secondary label readout
pub const SECONDARY_CRS: &str = SWEREF99_TM;

static DEFAULT_CRS_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut names = HashMap::default();
    names.insert(WEB_MERCATOR, "Web Mercator");
    names.insert(WGS84, "WGS 84");
    names.insert(SWEREF99_TM, "SWEREF 99 TM");
    names
});

/// Registry of offered reference systems
#[derive(Debug, Clone)]
pub struct CrsRegistry {
    codes: Vec<String>,
    names: HashMap<String, String>,
    defs: HashMap<String, String>,
}

impl CrsRegistry {
    /// Builds the registry from widget configuration.
    ///
    /// The mandatory codes are prepended ahead of caller-supplied extras,
    /// deduplicated, preserving caller order among the rest. Projection
    /// definitions are validated by parsing; definitions that do not parse
    /// are logged and dropped.
    pub fn from_config(config: &FinderConfig) -> Self {
        let mut codes: Vec<String> = REQUIRED_CRS.iter().map(|code| code.to_string()).collect();
        for code in &config.extra_crs {
            if !codes.iter().any(|existing| existing == code) {
                codes.push(code.clone());
            }
        }

        let mut defs = HashMap::default();
        for (code, def) in &config.crs_defs {
            match Proj::from_proj_string(def) {
                Ok(_) => {
                    gated_log!(
                        config.log_level,
                        Level::Info,
                        "registered projection definition for {code}"
                    );
                    defs.insert(code.clone(), def.clone());
                }
                Err(e) => {
                    gated_log!(
                        config.log_level,
                        Level::Warn,
                        "projection definition for {code} rejected: {e}"
                    );
                }
            }
        }

        Self {
            codes,
            names: config.crs_names.clone(),
            defs,
        }
    }

    /// The effective ordered list of offered codes
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|existing| existing == code)
    }

    /// The initially active system: SWEREF 99 TM when offered, else the
    /// first entry
    pub fn default_crs(&self) -> &str {
        if self.contains(SWEREF99_TM) {
            SWEREF99_TM
        } else {
            self.codes
                .first()
                .map(String::as_str)
                .unwrap_or(WEB_MERCATOR)
        }
    }

    /// Human-readable name for a code, falling back to the code itself
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names
            .get(code)
            .map(String::as_str)
            .or_else(|| DEFAULT_CRS_NAMES.get(code).copied())
            .unwrap_or(code)
    }

    /// Registered projection definition for a code, if any
    pub fn definition(&self, code: &str) -> Option<&str> {
        self.defs.get(code).map(String::as_str)
    }

    /// Whether a code names a geographic (lat/lon) system.
    ///
    /// A registered definition is authoritative; otherwise the code and
    /// display name are sniffed the way web map configs usually spell
    /// geographic systems.
    pub fn is_geographic(&self, code: &str) -> bool {
        if let Some(def) = self.definition(code) {
            return def.contains("+proj=longlat") || def.contains("+proj=latlong");
        }
        let upper = code.to_ascii_uppercase();
        upper.contains("4326")
            || upper.contains("CRS:84")
            || self.display_name(code).to_ascii_uppercase().contains("WGS")
    }
}
