//! Vendor device counting.
//!
//! A case tally counts the devices one case needs per vendor. The test-bed
//! tally keeps, per vendor, the largest count any single case needed, since
//! cases run one at a time on the same hardware.
use crate::topology::DevicePair;
use indexmap::IndexMap;
use serde::Serialize;

/// Total devices a test-bed holds; what known vendors don't use is `Any`.
pub const MAX_VENDOR_DEVICE: i64 = 32;

/// Placeholder vendor for generic capacity.
pub const ANY_VENDOR: &str = "Any";

/// Devices per vendor required by a single case, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CaseVendorTally(IndexMap<String, i64>);

impl CaseVendorTally {
    pub fn from_devices(devices: &[DevicePair]) -> Self {
        let mut counts: IndexMap<String, i64> = IndexMap::new();
        for pair in devices {
            *counts.entry(pair.vendor.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(vendor, count)| (vendor.as_str(), *count))
    }
}

/// Per-vendor maximum demand across every processed case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TestbedVendorTally(IndexMap<String, i64>);

impl TestbedVendorTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise each vendor to at least the case's count. Never lowers a value.
    pub fn fold(&mut self, case: &CaseVendorTally) {
        for (vendor, count) in case.iter() {
            let slot = self.0.entry(vendor.to_string()).or_insert(0);
            *slot = (*slot).max(count);
        }
    }

    /// Replace the `Any` count with the capacity left after known vendors.
    ///
    /// Only applies when `Any` was seen. The result may be negative when
    /// known vendors already exceed `MAX_VENDOR_DEVICE`; it is not clamped.
    pub fn finalize_any(&mut self) {
        let count_any = self
            .0
            .iter()
            .filter(|(vendor, _)| vendor.as_str() != ANY_VENDOR)
            .fold(MAX_VENDOR_DEVICE, |left, (_, count)| left - count);
        if let Some(slot) = self.0.get_mut(ANY_VENDOR) {
            *slot = count_any;
        }
    }

    pub fn get(&self, vendor: &str) -> Option<i64> {
        self.0.get(vendor).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(vendor, count)| (vendor.as_str(), *count))
    }
}
