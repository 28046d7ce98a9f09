use anyhow::Context;
use emdns_domain::config::ZoneConfig;
use emdns_domain::ZoneFileError;
use emdns_infrastructure::dns::{ReaderSource, Zone, ZoneFileParser};
use std::fs::File;
use std::io::BufReader;
use tracing::{error, info, warn};

/// The populated zone together with what went wrong while filling it.
#[derive(Debug)]
pub struct LoadedZone {
    pub zone: Zone,
    pub skipped_static: usize,
    pub file_error: Option<ZoneFileError>,
}

impl LoadedZone {
    /// Outcome reported by `--check`: any skipped record fails the check.
    pub fn check_result(&self) -> anyhow::Result<()> {
        info!(
            records = self.zone.len(),
            skipped_static = self.skipped_static,
            "Zone check finished"
        );
        if let Some(e) = &self.file_error {
            anyhow::bail!("zone file rejected at {}", e);
        }
        if self.skipped_static > 0 {
            anyhow::bail!("{} static records rejected", self.skipped_static);
        }
        Ok(())
    }
}

/// Builds the zone: static records first, then the master file.
///
/// A record that fails to load is logged and left out. A master file that
/// fails part way keeps the records committed before the failing line.
/// Only a master file that cannot be opened is fatal.
pub fn load_zone(config: &ZoneConfig) -> anyhow::Result<LoadedZone> {
    let mut zone = Zone::new();
    let skipped_static = add_static_records(&mut zone, config);

    let mut file_error = None;
    if let Some(path) = &config.file {
        let file = File::open(path).with_context(|| format!("Failed to open zone file {}", path))?;

        let parser = ZoneFileParser::new()
            .with_origin(config.origin.clone().unwrap_or_default())
            .with_default_ttl(config.default_ttl);

        match parser.parse(&mut zone, ReaderSource::new(BufReader::new(file))) {
            Ok(added) => info!(path = %path, records = added, "Zone file loaded"),
            Err(e) => {
                error!(
                    path = %path,
                    line = e.line,
                    records_added = e.records_added,
                    error = %e.error,
                    "Zone file parse failed, serving partial zone"
                );
                file_error = Some(e);
            }
        }
    }

    info!(records = zone.len(), "Zone ready");
    Ok(LoadedZone {
        zone,
        skipped_static,
        file_error,
    })
}

fn add_static_records(zone: &mut Zone, config: &ZoneConfig) -> usize {
    let mut skipped = 0;
    for record in &config.records {
        let result = record.parsed_type().and_then(|record_type| {
            let class = record.parsed_class()?;
            zone.add(
                &record.domain,
                record_type,
                class,
                &record.data,
                record.ttl_or(config.default_ttl),
            )
            .map_err(|e| e.to_string())
        });

        if let Err(e) = result {
            warn!(domain = %record.domain, error = %e, "Skipping static record");
            skipped += 1;
        }
    }
    skipped
}
