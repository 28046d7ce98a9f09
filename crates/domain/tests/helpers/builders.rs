#![allow(dead_code)]
use emdns_domain::config::StaticRecord;

pub struct StaticRecordBuilder {
    domain: String,
    record_type: String,
    class: Option<String>,
    data: String,
    ttl: Option<u32>,
}

impl StaticRecordBuilder {
    pub fn new() -> Self {
        Self {
            domain: "domain.com".to_string(),
            record_type: "A".to_string(),
            class: None,
            data: "12.34.56.78".to_string(),
            ttl: None,
        }
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    pub fn record_type(mut self, record_type: &str) -> Self {
        self.record_type = record_type.to_string();
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn data(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn build(self) -> StaticRecord {
        StaticRecord {
            domain: self.domain,
            record_type: self.record_type,
            class: self.class,
            data: self.data,
            ttl: self.ttl,
        }
    }
}

impl Default for StaticRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
