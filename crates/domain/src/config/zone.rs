use serde::{Deserialize, Serialize};

use crate::dns_record::{RecordClass, RecordType};

/// A record declared directly in the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticRecord {
    pub domain: String,

    pub record_type: String,

    #[serde(default)]
    pub class: Option<String>,

    /// RDATA in presentation form, e.g. `"10 mail.domain.com"` for MX.
    pub data: String,

    #[serde(default)]
    pub ttl: Option<u32>,
}

impl StaticRecord {
    pub fn parsed_type(&self) -> Result<RecordType, String> {
        self.record_type.parse()
    }

    pub fn parsed_class(&self) -> Result<RecordClass, String> {
        match self.class.as_deref() {
            None => Ok(RecordClass::IN),
            Some(class) => {
                let class: RecordClass = class.parse()?;
                if class.is_storable() {
                    Ok(class)
                } else {
                    Err(format!("Class {} cannot be stored", class))
                }
            }
        }
    }

    pub fn ttl_or(&self, default_ttl: u32) -> u32 {
        self.ttl.unwrap_or(default_ttl)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ZoneConfig {
    /// Master file loaded at startup.
    #[serde(default)]
    pub file: Option<String>,

    /// Origin in effect before the first `$ORIGIN` directive.
    #[serde(default)]
    pub origin: Option<String>,

    /// TTL in effect before the first `$TTL` directive.
    #[serde(default)]
    pub default_ttl: u32,

    #[serde(default)]
    pub records: Vec<StaticRecord>,
}
