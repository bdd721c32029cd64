//! Hash-linked audit ledger
//!
//! Entries are linked in construction order (each `previous_hash` is the
//! prior entry's `current_hash`) and then re-sorted by timestamp for display.
//! The links are never recomputed after the sort, so the two orders differ and
//! chain checks must go through `sequence`, never through display position.
//!
//! Hash fields are random hex strings drawn from the stream, not digests of
//! the entry content.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::error::{GovError, Result};
use crate::core::random::RandomSource;
use crate::dataset::ward::Ward;

/// Only this many wards (in generation order) contribute ledger events
pub const LEDGER_WARD_LIMIT: usize = 20;

/// Each selected ward logs between 1 and this many events
pub const MAX_EVENTS_PER_WARD: usize = 3;

pub const HASH_LENGTH: usize = 64;

/// Alphabet hash characters are drawn from, by index
const HASH_ALPHABET: &[u8; 16] = b"abcdef0123456789";

/// Calendar year every synthetic event falls in
const LEDGER_YEAR: i32 = 2020;

/// Days drawn per month; keeps every month/day pair valid
const DAYS_PER_MONTH: usize = 28;

pub const ACTIONS: [&str; 5] = [
    "fund_allocated",
    "fund_disbursed",
    "utilization_updated",
    "audit_verified",
    "grievance_logged",
];

/// `previous_hash` of the first entry in construction order
pub fn genesis_hash() -> String {
    "0".repeat(HASH_LENGTH)
}

/// One synthetic audit event referencing a ward by id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    /// 1-based construction order; the link order of the chain
    pub sequence: u32,
    pub timestamp: DateTime<Utc>,
    pub ward_id: String,
    pub action: String,
    pub record_hash: String,
    pub previous_hash: String,
    pub current_hash: String,
}

impl LedgerEntry {
    /// `2020-03-07T14:05:00Z`
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("Entry {sequence} should have the genesis previous hash")]
    GenesisMismatch { sequence: u32 },

    #[error("Entry {sequence} links to {found}, expected {expected}")]
    BrokenLink {
        sequence: u32,
        expected: String,
        found: String,
    },

    #[error("Expected sequence {expected}, found {found}")]
    SequenceGap { expected: u32, found: u32 },
}

/// Check links over a slice exactly as ordered
///
/// Callers pass construction order to validate the chain; passing display
/// order generally fails, which is expected.
pub fn verify_links(entries: &[LedgerEntry]) -> std::result::Result<(), ChainError> {
    let mut expected_previous = genesis_hash();

    for (position, entry) in entries.iter().enumerate() {
        if entry.previous_hash != expected_previous {
            if position == 0 {
                return Err(ChainError::GenesisMismatch {
                    sequence: entry.sequence,
                });
            }
            return Err(ChainError::BrokenLink {
                sequence: entry.sequence,
                expected: expected_previous,
                found: entry.previous_hash.clone(),
            });
        }
        expected_previous = entry.current_hash.clone();
    }

    Ok(())
}

/// The ledger in display order (timestamp ascending)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLedger {
    entries: Vec<LedgerEntry>,
}

impl AuditLedger {
    /// Wrap entries given in construction order, sorting them for display
    pub fn from_construction_order(mut entries: Vec<LedgerEntry>) -> Self {
        // Stable: equal timestamps keep construction order
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries re-ordered by construction sequence
    pub fn construction_order(&self) -> Vec<&LedgerEntry> {
        let mut ordered: Vec<&LedgerEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|e| e.sequence);
        ordered
    }

    /// Validate the hash chain in construction order
    pub fn verify_chain(&self) -> std::result::Result<(), ChainError> {
        let ordered: Vec<LedgerEntry> = self.construction_order().into_iter().cloned().collect();

        for (index, entry) in ordered.iter().enumerate() {
            let expected = index as u32 + 1;
            if entry.sequence != expected {
                return Err(ChainError::SequenceGap {
                    expected,
                    found: entry.sequence,
                });
            }
        }

        verify_links(&ordered)
    }

    /// Number of distinct wards referenced
    pub fn ward_count(&self) -> usize {
        let mut ids: Vec<&str> = self.entries.iter().map(|e| e.ward_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    pub fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }
}

fn random_hash<R: RandomSource + ?Sized>(rng: &mut R) -> String {
    (0..HASH_LENGTH)
        .map(|_| HASH_ALPHABET[rng.pick_index(HASH_ALPHABET.len())] as char)
        .collect()
}

fn random_timestamp<R: RandomSource + ?Sized>(rng: &mut R) -> Result<DateTime<Utc>> {
    let day = rng.pick_index(DAYS_PER_MONTH) as u32 + 1;
    let month = rng.pick_index(12) as u32 + 1;
    let hour = rng.pick_index(24) as u32;
    let minute = rng.pick_index(60) as u32;

    Utc.with_ymd_and_hms(LEDGER_YEAR, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            GovError::InvalidTimestamp(format!(
                "{}-{:02}-{:02}T{:02}:{:02}:00Z",
                LEDGER_YEAR, month, day, hour, minute
            ))
        })
}

/// Build the ledger over the first `LEDGER_WARD_LIMIT` wards
///
/// Per entry draw order: record hash, current hash, day, month, hour,
/// minute, action.
pub fn build_ledger<R: RandomSource + ?Sized>(wards: &[Ward], rng: &mut R) -> Result<AuditLedger> {
    let mut entries: Vec<LedgerEntry> = Vec::new();
    let mut previous_hash = genesis_hash();

    for ward in wards.iter().take(LEDGER_WARD_LIMIT) {
        let event_count = 1 + rng.pick_index(MAX_EVENTS_PER_WARD);

        for _ in 0..event_count {
            let record_hash = random_hash(rng);
            let current_hash = random_hash(rng);
            let timestamp = random_timestamp(rng)?;
            let action = ACTIONS[rng.pick_index(ACTIONS.len())];
            let sequence = entries.len() as u32 + 1;

            entries.push(LedgerEntry {
                id: sequence.to_string(),
                sequence,
                timestamp,
                ward_id: ward.id.clone(),
                action: action.to_string(),
                record_hash,
                previous_hash: std::mem::replace(&mut previous_hash, current_hash.clone()),
                current_hash,
            });
        }
    }

    debug!(
        entries = entries.len(),
        wards = wards.len().min(LEDGER_WARD_LIMIT),
        "Built audit ledger"
    );

    Ok(AuditLedger::from_construction_order(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{ConstantRandom, LehmerRandom};
    use crate::core::types::RiskLevel;

    fn wards(count: usize) -> Vec<Ward> {
        (1..=count)
            .map(|i| Ward {
                id: format!("test-ward-{}", i),
                name: format!("Ward {}", i),
                district: "Test".into(),
                population: 1000,
                fund_allocated: 100,
                fund_utilized: 80,
                utilization_rate: 80,
                complaint_count: 20,
                resolution_rate: 70,
                sla_score: 70,
                governance_score: 74,
                risk_level: RiskLevel::Yellow,
                schemes: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_constant_draws_produce_known_entry() {
        let mut rng = ConstantRandom(0.5);
        let ledger = build_ledger(&wards(1), &mut rng).unwrap();

        // 1 + floor(0.5 * 3) = 2 events
        assert_eq!(ledger.len(), 2);
        let first = &ledger.construction_order()[0];
        assert_eq!(first.record_hash, "2".repeat(64));
        assert_eq!(first.previous_hash, genesis_hash());
        assert_eq!(first.timestamp_string(), "2020-07-15T12:30:00Z");
        assert_eq!(first.action, "utilization_updated");
        assert_eq!(first.id, "1");
    }

    #[test]
    fn test_chain_links_in_construction_order() {
        let mut rng = LehmerRandom::new(42).unwrap();
        let ledger = build_ledger(&wards(25), &mut rng).unwrap();

        assert!(ledger.verify_chain().is_ok());
        let ordered = ledger.construction_order();
        assert_eq!(ordered[0].previous_hash, genesis_hash());
        for pair in ordered.windows(2) {
            assert_eq!(pair[1].previous_hash, pair[0].current_hash);
        }
    }

    #[test]
    fn test_display_order_is_by_timestamp() {
        let mut rng = LehmerRandom::new(42).unwrap();
        let ledger = build_ledger(&wards(20), &mut rng).unwrap();

        for pair in ledger.entries().windows(2) {
            assert!(pair[0].timestamp_string() <= pair[1].timestamp_string());
        }
    }

    #[test]
    fn test_ward_limit_and_event_bounds() {
        let mut rng = LehmerRandom::new(9).unwrap();
        let ledger = build_ledger(&wards(40), &mut rng).unwrap();

        assert!(ledger.ward_count() <= LEDGER_WARD_LIMIT);
        assert!(ledger.len() >= LEDGER_WARD_LIMIT);
        assert!(ledger.len() <= LEDGER_WARD_LIMIT * MAX_EVENTS_PER_WARD);
        assert!(ledger
            .entries()
            .iter()
            .all(|e| e.ward_id != "test-ward-21"));
    }

    #[test]
    fn test_hashes_are_hex() {
        let mut rng = LehmerRandom::new(5).unwrap();
        let ledger = build_ledger(&wards(3), &mut rng).unwrap();

        for entry in ledger.entries() {
            for hash in [&entry.record_hash, &entry.current_hash, &entry.previous_hash] {
                assert_eq!(hash.len(), HASH_LENGTH);
                assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
            }
            assert!(ACTIONS.contains(&entry.action.as_str()));
        }
    }

    #[test]
    fn test_tampered_link_detected() {
        let mut rng = LehmerRandom::new(42).unwrap();
        let ledger = build_ledger(&wards(5), &mut rng).unwrap();
        let mut entries = ledger.into_entries();

        let target = entries.iter_mut().find(|e| e.sequence == 2).unwrap();
        target.previous_hash = "f".repeat(64);
        let tampered = AuditLedger::from_construction_order(entries);

        assert!(matches!(
            tampered.verify_chain(),
            Err(ChainError::BrokenLink { sequence: 2, .. })
        ));
    }

    #[test]
    fn test_missing_entry_detected() {
        let mut rng = LehmerRandom::new(42).unwrap();
        let ledger = build_ledger(&wards(5), &mut rng).unwrap();
        let entries: Vec<LedgerEntry> = ledger
            .into_entries()
            .into_iter()
            .filter(|e| e.sequence != 1)
            .collect();

        assert_eq!(
            AuditLedger::from_construction_order(entries).verify_chain(),
            Err(ChainError::SequenceGap {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_empty_ledger_verifies() {
        let mut rng = LehmerRandom::new(42).unwrap();
        let ledger = build_ledger(&[], &mut rng).unwrap();
        assert!(ledger.is_empty());
        assert!(ledger.verify_chain().is_ok());
        assert_eq!(rng.cursor(), 0);
    }

    #[test]
    fn test_entry_json_shape() {
        let mut rng = ConstantRandom(0.0);
        let ledger = build_ledger(&wards(1), &mut rng).unwrap();
        let json = serde_json::to_value(ledger.entries()).unwrap();

        assert_eq!(json[0]["timestamp"], "2020-01-01T00:00:00Z");
        assert_eq!(json[0]["wardId"], "test-ward-1");
        assert_eq!(json[0]["previousHash"], genesis_hash());
        assert_eq!(json[0]["recordHash"], "a".repeat(64));
    }
}
