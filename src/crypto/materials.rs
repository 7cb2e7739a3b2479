//! Collection of security materials (keys and their derived AIDs) the access
//! layer consults when it stamps a security descriptor onto an outgoing PDU.
use crate::address::UnicastAddress;
use crate::crypto::key::{AppKey, DevKey};
use crate::crypto::{AppKeyIndex, AID};
use alloc::collections::btree_map;

/// An application key together with its `k4`-derived AID. The AID is computed
/// once at insert time, not per message.
pub struct ApplicationSecurityMaterials {
    pub app_key: AppKey,
    pub aid: AID,
}
impl ApplicationSecurityMaterials {
    #[must_use]
    pub fn new(app_key: AppKey) -> Self {
        Self {
            app_key,
            aid: app_key.aid(),
        }
    }
}
#[derive(Default)]
pub struct AppKeyMap {
    map: btree_map::BTreeMap<AppKeyIndex, ApplicationSecurityMaterials>,
}
impl AppKeyMap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: btree_map::BTreeMap::new(),
        }
    }
    pub fn insert(&mut self, index: AppKeyIndex, app_key: AppKey) {
        self.map
            .insert(index, ApplicationSecurityMaterials::new(app_key));
    }
    #[must_use]
    pub fn get_key(&self, index: AppKeyIndex) -> Option<&ApplicationSecurityMaterials> {
        self.map.get(&index)
    }
    pub fn get_key_mut(&mut self, index: AppKeyIndex) -> Option<&mut ApplicationSecurityMaterials> {
        self.map.get_mut(&index)
    }
    pub fn remove_key(&mut self, index: AppKeyIndex) -> Option<ApplicationSecurityMaterials> {
        self.map.remove(&index)
    }
}

/// Device keys per remote node. Configuration messages are secured with the
/// target node's device key rather than an application key.
#[derive(Default)]
pub struct DevKeyMap {
    map: btree_map::BTreeMap<UnicastAddress, DevKey>,
}
impl DevKeyMap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: btree_map::BTreeMap::new(),
        }
    }
    pub fn insert(&mut self, primary_address: UnicastAddress, dev_key: DevKey) {
        self.map.insert(primary_address, dev_key);
    }
    #[must_use]
    pub fn get_key(&self, primary_address: UnicastAddress) -> Option<&DevKey> {
        self.map.get(&primary_address)
    }
    pub fn remove_key(&mut self, primary_address: UnicastAddress) -> Option<DevKey> {
        self.map.remove(&primary_address)
    }
}

#[derive(Default)]
pub struct SecurityMaterials {
    pub dev_key_map: DevKeyMap,
    pub app_key_map: AppKeyMap,
}
impl SecurityMaterials {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dev_key_map: DevKeyMap::new(),
            app_key_map: AppKeyMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_key_map_derives_aid() {
        let mut map = AppKeyMap::new();
        let index = AppKeyIndex::new(0);
        let key = AppKey::from_hex("3216d1509884b533248541792b877f98").unwrap();
        map.insert(index, key);
        let materials = map.get_key(index).unwrap();
        assert_eq!(materials.aid, AID::new(0x38));
        assert!(map.get_key(AppKeyIndex::new(1)).is_none());
    }
}
