//! Shared in-memory tables backing the `InMemory*Repository` types.
//!
//! All tables sit behind one lock, so a guard check and the write it
//! protects happen under the same write guard.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::lookups::LookupKind;
use crate::{leases, maintenance, properties, tenants};

/// Lookup values every fresh store starts with.
pub const SEED_LOOKUPS: [(LookupKind, &[&str]); 4] = [
    (LookupKind::PropertyType, &["Residential", "Commercial"]),
    (LookupKind::PropertyStatus, &["Vacant", "Occupied"]),
    (LookupKind::PaymentStatus, &["Paid", "Pending", "Overdue"]),
    (
        LookupKind::MaintenanceStatus,
        &["Scheduled", "In Progress", "Completed"],
    ),
];

/// Rows keyed by a serial id; ids are never reused.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    /// Allocates the next id and stores the row built for it.
    pub fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }

    pub fn get(&self, id: i32) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn remove(&mut self, id: i32) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub property_types: Table<String>,
    pub property_statuses: Table<String>,
    pub payment_statuses: Table<String>,
    pub maintenance_statuses: Table<String>,
    pub properties: Table<properties::entity::Model>,
    pub tenants: Table<tenants::entity::Model>,
    pub leases: Table<leases::entity::Model>,
    pub maintenance: Table<maintenance::entity::Model>,
}

impl Tables {
    pub fn lookup(&self, kind: LookupKind) -> &Table<String> {
        match kind {
            LookupKind::PropertyType => &self.property_types,
            LookupKind::PropertyStatus => &self.property_statuses,
            LookupKind::PaymentStatus => &self.payment_statuses,
            LookupKind::MaintenanceStatus => &self.maintenance_statuses,
        }
    }

    pub fn lookup_mut(&mut self, kind: LookupKind) -> &mut Table<String> {
        match kind {
            LookupKind::PropertyType => &mut self.property_types,
            LookupKind::PropertyStatus => &mut self.property_statuses,
            LookupKind::PaymentStatus => &mut self.payment_statuses,
            LookupKind::MaintenanceStatus => &mut self.maintenance_statuses,
        }
    }

    /// Description of a lookup value, empty if the id is unknown.
    pub fn describe(&self, kind: LookupKind, id: i32) -> String {
        self.lookup(kind).get(id).cloned().unwrap_or_default()
    }

    /// Number of rows pointing at lookup value `id`.
    pub fn lookup_references(&self, kind: LookupKind, id: i32) -> u64 {
        let count = match kind {
            LookupKind::PropertyType => self
                .properties
                .values()
                .filter(|p| p.property_type_id == id)
                .count(),
            LookupKind::PropertyStatus => self
                .properties
                .values()
                .filter(|p| p.property_status_id == id)
                .count(),
            LookupKind::PaymentStatus => self
                .leases
                .values()
                .filter(|l| l.payment_status_id == id)
                .count(),
            LookupKind::MaintenanceStatus => self
                .maintenance
                .values()
                .filter(|m| m.maintenance_status_id == id)
                .count(),
        };
        count as u64
    }
}

/// Handle to the shared tables; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Store pre-filled with [`SEED_LOOKUPS`].
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for (kind, values) in SEED_LOOKUPS {
            let table = tables.lookup_mut(kind);
            for value in values {
                table.insert_with(|_| value.to_string());
            }
        }

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Store with no rows at all, lookups included.
    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
