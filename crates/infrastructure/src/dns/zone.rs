//! In-memory record store.
//!
//! Records are kept most-recent-first. Handles returned by [`Zone::find`]
//! are positions in that order and are only meaningful until the next
//! mutation.

use super::rdata::encode_rdata;
use super::wire::encode_name;
use emdns_domain::{AddError, DnsRecord, RecordClass, RecordType};
use std::collections::VecDeque;
use tracing::debug;

/// Position of a record inside a [`Zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHandle(usize);

impl RecordHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Zone {
    records: VecDeque<DnsRecord>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes and stores one record at the head of the zone.
    ///
    /// Duplicates are not rejected: several records under one key are how
    /// multiple answers (e.g. two MX hosts) are served.
    pub fn add(
        &mut self,
        domain: &str,
        record_type: RecordType,
        class: RecordClass,
        rdata_text: &str,
        ttl: u32,
    ) -> Result<(), AddError> {
        if !class.is_storable() {
            return Err(AddError::UnsupportedClass(class));
        }
        let wire_domain = encode_name(domain).map_err(AddError::InvalidName)?;
        let rdata = encode_rdata(record_type, rdata_text).map_err(AddError::MalformedRdata)?;

        self.records
            .try_reserve(1)
            .map_err(|_| AddError::OutOfMemory)?;
        self.records.push_front(DnsRecord::new(
            wire_domain,
            record_type,
            stored_class(class),
            ttl,
            rdata,
        ));

        debug!(
            domain = %domain,
            record_type = %record_type,
            class = %stored_class(class),
            ttl,
            "Record added"
        );
        Ok(())
    }

    /// Removes every record stored under the key and returns how many went.
    pub fn remove(&mut self, domain: &str, record_type: RecordType, class: RecordClass) -> u32 {
        let Ok(wire_domain) = encode_name(domain) else {
            debug!(domain = %domain, "Remove skipped: name cannot be encoded");
            return 0;
        };
        let class = stored_class(class);

        let before = self.records.len();
        self.records
            .retain(|record| !record.matches_key(&wire_domain, record_type, class));
        let removed = (before - self.records.len()) as u32;

        debug!(
            domain = %domain,
            record_type = %record_type,
            removed,
            "Records removed"
        );
        removed
    }

    /// Linear scan for the next record matching the key.
    ///
    /// The scan starts at the head, or just past `after` when given, so
    /// repeated calls walk every record sharing the key. `class` of `ANY`
    /// matches records of every class.
    pub fn find(
        &self,
        domain: &[u8],
        record_type: RecordType,
        class: RecordClass,
        after: Option<RecordHandle>,
    ) -> Option<RecordHandle> {
        let start = after.map_or(0, |handle| handle.0 + 1);
        self.records
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, record)| {
                record.record_type == record_type
                    && (class == RecordClass::ANY || record.class == class)
                    && record.domain == domain
            })
            .map(|(index, _)| RecordHandle(index))
    }

    pub fn get(&self, handle: RecordHandle) -> Option<&DnsRecord> {
        self.records.get(handle.0)
    }

    /// All records matching the key, in zone order.
    pub fn matching<'a>(
        &'a self,
        domain: &'a [u8],
        record_type: RecordType,
        class: RecordClass,
    ) -> impl Iterator<Item = &'a DnsRecord> + 'a {
        let mut cursor = None;
        std::iter::from_fn(move || {
            let handle = self.find(domain, record_type, class, cursor)?;
            cursor = Some(handle);
            self.get(handle)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DnsRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether records keep their own class or are all served as IN.
pub const fn class_support_enabled() -> bool {
    cfg!(feature = "all-classes")
}

fn stored_class(class: RecordClass) -> RecordClass {
    if class_support_enabled() {
        class
    } else {
        RecordClass::IN
    }
}
