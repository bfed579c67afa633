//! Product registry — exact-match lookup by serial number.
//!
//! `ProductLookup` is the single-method seam a real datastore client would
//! expose; `StaticRegistry` is the in-memory stand-in. The lookup is
//! synchronous and infallible: no network, no partial failure. Swapping in a
//! real store must not touch the resolution pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A resolved product.
///
/// `identifier` is always the serial number the record resolved under —
/// for AI-sourced records the pipeline sets it to the queried serial, never
/// to an identifier the model invented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub identifier: String,
    pub name: String,
    pub kind: String,
    pub manufacturer: String,
    pub description: String,
    pub image_url: String,
}

/// Lookup seam for the resolution pipeline.
pub trait ProductLookup: Send + Sync {
    /// Exact-match lookup; `None` is the not-found signal.
    fn find_by_serial(&self, serial_number: &str) -> Option<ProductRecord>;
}

/// In-memory registry keyed by serial number.
pub struct StaticRegistry {
    records: HashMap<String, ProductRecord>,
}

impl StaticRegistry {
    pub fn empty() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Register a product under its serial number. The record's identifier
    /// is normalized to the serial it is keyed by.
    pub fn insert(&mut self, serial_number: &str, mut record: ProductRecord) {
        record.identifier = serial_number.to_string();
        self.records.insert(serial_number.to_string(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registry seeded with the demo products used until a real product
    /// database is wired in.
    pub fn with_demo_products() -> Self {
        let mut registry = Self::empty();

        registry.insert(
            "SN12345XYZ",
            ProductRecord {
                identifier: String::new(),
                name: "QuantumCore X1 Motherboard".into(),
                kind: "ATX Motherboard".into(),
                manufacturer: "Innovatech Inc.".into(),
                description: "A high-performance motherboard for gaming and professional \
                              workstations, featuring the latest chipset and connectivity options."
                    .into(),
                image_url: crate::config::PLACEHOLDER_IMAGE_URL.into(),
            },
        );
        registry.insert(
            "MB67890ABC",
            ProductRecord {
                identifier: String::new(),
                name: "NanoWeave P5-Lite PCA".into(),
                kind: "Printed Circuit Assembly".into(),
                manufacturer: "Component Solutions".into(),
                description: "A compact and efficient PCBA designed for IoT devices and small \
                              form-factor electronics."
                    .into(),
                image_url: crate::config::PLACEHOLDER_IMAGE_URL.into(),
            },
        );
        registry.insert(
            "A7B8C9D0E1",
            ProductRecord {
                identifier: String::new(),
                name: "Hyperion Z-9 Chipset".into(),
                kind: "Processor Component".into(),
                manufacturer: "Silicon Dynasties".into(),
                description: "Next-generation processing unit for embedded systems, offering \
                              unparalleled speed and low power consumption."
                    .into(),
                image_url: crate::config::PLACEHOLDER_IMAGE_URL.into(),
            },
        );

        registry
    }
}

impl ProductLookup for StaticRegistry {
    fn find_by_serial(&self, serial_number: &str) -> Option<ProductRecord> {
        self.records.get(serial_number).cloned()
    }
}
