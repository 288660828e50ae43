//! In-Memory Store
//!
//! Implements all four repository gateways over `RwLock`ed maps. Each
//! subnet's pool is a `BTreeMap` keyed by the address as a `u32`, so
//! ascending iteration yields addresses in numeric order and the
//! lowest-free lookup is a single ordered scan.
//!
//! Guards are acquired per call and released before the future returns, so
//! readers always observe fully committed state. Serialization of competing
//! writers is the coordinator's job, not the store's.

use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::gateways::{
    DeviceRepository, IpAddressRepository, NamespaceRepository, SubnetRepository,
};
use crate::domain::models::device::{Device, DeviceId};
use crate::domain::models::ip_address::{IpAddress, IpAddressId, IpStatus, PoolCounts};
use crate::domain::models::namespace::{Namespace, NamespaceId};
use crate::domain::models::subnet::{Subnet, SubnetId};
use crate::shared::errors::RepositoryError;

#[derive(Default)]
struct StoreInner {
    namespaces: HashMap<NamespaceId, Namespace>,
    subnets: HashMap<SubnetId, Subnet>,
    /// per-subnet pool, ordered by address
    pools: HashMap<SubnetId, BTreeMap<u32, IpAddress>>,
    /// record id -> (subnet, address) for O(1) release lookups
    ip_index: HashMap<IpAddressId, (SubnetId, u32)>,
    devices: HashMap<DeviceId, Device>,
    device_names: HashMap<String, DeviceId>,
}

/// In-memory implementation of every repository gateway
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>, RepositoryError> {
        self.inner
            .read()
            .map_err(|e| RepositoryError::Storage(format!("store lock poisoned: {e}")))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>, RepositoryError> {
        self.inner
            .write()
            .map_err(|e| RepositoryError::Storage(format!("store lock poisoned: {e}")))
    }
}

#[async_trait]
impl NamespaceRepository for InMemoryStore {
    async fn find_by_id(&self, id: &NamespaceId) -> Result<Option<Namespace>, RepositoryError> {
        Ok(self.read()?.namespaces.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Namespace>, RepositoryError> {
        Ok(self
            .read()?
            .namespaces
            .values()
            .find(|ns| ns.name() == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Namespace>, RepositoryError> {
        let mut namespaces: Vec<Namespace> = self.read()?.namespaces.values().cloned().collect();
        namespaces.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(namespaces)
    }

    async fn create(&self, namespace: &Namespace) -> Result<Namespace, RepositoryError> {
        self.write()?
            .namespaces
            .insert(*namespace.id(), namespace.clone());
        Ok(namespace.clone())
    }
}

#[async_trait]
impl SubnetRepository for InMemoryStore {
    async fn find_by_id(&self, id: &SubnetId) -> Result<Option<Subnet>, RepositoryError> {
        Ok(self.read()?.subnets.get(id).cloned())
    }

    async fn find_by_namespace(
        &self,
        namespace_id: &NamespaceId,
    ) -> Result<Vec<Subnet>, RepositoryError> {
        let mut subnets: Vec<Subnet> = self
            .read()?
            .subnets
            .values()
            .filter(|s| s.namespace_id() == namespace_id)
            .cloned()
            .collect();
        subnets.sort_by_key(|s| u32::from(s.cidr().network()));
        Ok(subnets)
    }

    async fn find_all(&self) -> Result<Vec<Subnet>, RepositoryError> {
        let mut subnets: Vec<Subnet> = self.read()?.subnets.values().cloned().collect();
        subnets.sort_by_key(|s| u32::from(s.cidr().network()));
        Ok(subnets)
    }

    async fn create(&self, subnet: &Subnet) -> Result<Subnet, RepositoryError> {
        let mut inner = self.write()?;
        inner.subnets.insert(*subnet.id(), subnet.clone());
        inner.pools.entry(*subnet.id()).or_default();
        Ok(subnet.clone())
    }
}

#[async_trait]
impl IpAddressRepository for InMemoryStore {
    async fn create_pool(&self, entries: Vec<IpAddress>) -> Result<(), RepositoryError> {
        let mut inner = self.write()?;
        for entry in entries {
            let subnet_id = *entry.subnet_id();
            let key = u32::from(entry.address());
            inner.ip_index.insert(*entry.id(), (subnet_id, key));
            inner.pools.entry(subnet_id).or_default().insert(key, entry);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &IpAddressId) -> Result<Option<IpAddress>, RepositoryError> {
        let inner = self.read()?;
        let Some((subnet_id, key)) = inner.ip_index.get(id) else {
            return Ok(None);
        };
        Ok(inner
            .pools
            .get(subnet_id)
            .and_then(|pool| pool.get(key))
            .cloned())
    }

    async fn find_by_address(
        &self,
        subnet_id: &SubnetId,
        address: Ipv4Addr,
    ) -> Result<Option<IpAddress>, RepositoryError> {
        Ok(self
            .read()?
            .pools
            .get(subnet_id)
            .and_then(|pool| pool.get(&u32::from(address)))
            .cloned())
    }

    async fn find_lowest_free(
        &self,
        subnet_id: &SubnetId,
    ) -> Result<Option<IpAddress>, RepositoryError> {
        Ok(self.read()?.pools.get(subnet_id).and_then(|pool| {
            pool.values()
                .find(|ip| ip.status() == IpStatus::Free)
                .cloned()
        }))
    }

    async fn find_by_subnet(
        &self,
        subnet_id: &SubnetId,
        status: Option<IpStatus>,
    ) -> Result<Vec<IpAddress>, RepositoryError> {
        Ok(self
            .read()?
            .pools
            .get(subnet_id)
            .map(|pool| {
                pool.values()
                    .filter(|ip| status.is_none_or(|s| ip.status() == s))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, ip: &IpAddress) -> Result<IpAddress, RepositoryError> {
        let mut inner = self.write()?;
        let pool = inner
            .pools
            .get_mut(ip.subnet_id())
            .ok_or_else(|| RepositoryError::NotFound(format!("subnet {}", ip.subnet_id())))?;
        let slot = pool
            .get_mut(&u32::from(ip.address()))
            .ok_or_else(|| RepositoryError::NotFound(format!("address {}", ip.address())))?;
        *slot = ip.clone();
        Ok(ip.clone())
    }

    async fn count_by_status(&self, subnet_id: &SubnetId) -> Result<PoolCounts, RepositoryError> {
        let inner = self.read()?;
        let mut counts = PoolCounts::default();
        if let Some(pool) = inner.pools.get(subnet_id) {
            for ip in pool.values() {
                match ip.status() {
                    IpStatus::Free => counts.free += 1,
                    IpStatus::Active => counts.active += 1,
                    IpStatus::Reserved => counts.reserved += 1,
                }
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl DeviceRepository for InMemoryStore {
    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, RepositoryError> {
        Ok(self.read()?.devices.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Device>, RepositoryError> {
        let inner = self.read()?;
        Ok(inner
            .device_names
            .get(name)
            .and_then(|id| inner.devices.get(id))
            .cloned())
    }

    async fn upsert_by_name(&self, name: &str) -> Result<Device, RepositoryError> {
        let mut inner = self.write()?;
        if let Some(existing) = inner
            .device_names
            .get(name)
            .and_then(|id| inner.devices.get(id))
        {
            return Ok(existing.clone());
        }
        let device = Device::new(name.to_string());
        inner.device_names.insert(name.to_string(), *device.id());
        inner.devices.insert(*device.id(), device.clone());
        Ok(device)
    }
}
