//! Chain metadata introspection.
//!
//! [`ChainMetadata`] is a read-only tree built once from the raw metadata
//! blob a node returns: named pallets, each owning its storage items,
//! callables and event kinds. The tree is immutable after construction and
//! safe to share between concurrent readers. Lookups are total functions —
//! a missing pallet or item is an expected audit outcome, returned as
//! `None`/empty rather than raised as an error.

mod convert;

use crate::error::MetadataError;
use frame_metadata::RuntimeMetadataPrefixed;
use parity_scale_codec::Decode;
use serde::Serialize;

// ─── Tree ────────────────────────────────────────────────────────────────────

/// The introspectable surface of a chain, keyed by pallet name.
#[derive(Debug, Clone, Serialize)]
pub struct ChainMetadata {
    pallets: Vec<PalletInfo>,
}

/// One pallet: its storage items, callables and event kinds, in declaration
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct PalletInfo {
    pub name: String,
    pub index: u8,
    pub storage: Vec<StorageItemInfo>,
    pub callables: Vec<CallableInfo>,
    pub events: Vec<EventInfo>,
}

/// A named on-chain value slot and a rendered descriptor of its value type.
#[derive(Debug, Clone, Serialize)]
pub struct StorageItemInfo {
    pub name: String,
    pub ty: String,
}

/// A named invocable operation and its argument descriptors.
#[derive(Debug, Clone, Serialize)]
pub struct CallableInfo {
    pub name: String,
    pub args: Vec<CallableArg>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallableArg {
    pub name: String,
    pub ty: String,
}

/// A named event kind and its payload type descriptors.
#[derive(Debug, Clone, Serialize)]
pub struct EventInfo {
    pub name: String,
    pub payload: Vec<String>,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

impl ChainMetadata {
    /// Build the tree from a raw `state_getMetadata` blob.
    ///
    /// Fails with [`MetadataError`] when the blob does not decode or carries
    /// an unhandled metadata version; the caller re-fetches, nothing is
    /// retried here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetadataError> {
        let prefixed =
            RuntimeMetadataPrefixed::decode(&mut &bytes[..]).map_err(MetadataError::Codec)?;
        convert::from_prefixed(prefixed)
    }

    /// All pallets, in declaration order.
    pub fn pallets(&self) -> &[PalletInfo] {
        &self.pallets
    }

    /// Case-sensitive exact-name lookup.
    pub fn pallet(&self, name: &str) -> Option<&PalletInfo> {
        self.pallets.iter().find(|p| p.name == name)
    }

    /// Case-insensitive substring scan over pallet names.
    pub fn search(&self, needle: &str) -> Vec<&str> {
        let needle = needle.to_lowercase();
        self.pallets
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .map(|p| p.name.as_str())
            .collect()
    }

    /// The callable names a pallet exposes, ordered by call index.
    /// `None` when the pallet itself is absent.
    pub fn callables(&self, pallet: &str) -> Option<Vec<&str>> {
        self.pallet(pallet)
            .map(|p| p.callables.iter().map(|c| c.name.as_str()).collect())
    }
}

impl PalletInfo {
    /// Case-sensitive exact-name lookup of a storage item.
    pub fn storage_item(&self, name: &str) -> Option<&StorageItemInfo> {
        self.storage.iter().find(|s| s.name == name)
    }

    pub fn has_storage_item(&self, name: &str) -> bool {
        self.storage_item(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_metadata::v14::{
        ExtrinsicMetadata, PalletCallMetadata, PalletEventMetadata, PalletMetadata,
        PalletStorageMetadata, RuntimeMetadataV14, StorageEntryMetadata, StorageEntryModifier,
        StorageEntryType, StorageHasher,
    };
    use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed};
    use parity_scale_codec::Encode;
    use scale_info::meta_type;

    #[allow(non_camel_case_types, dead_code)]
    #[derive(scale_info::TypeInfo)]
    enum BridgeCall {
        set_operator { operator: [u8; 32] },
        pause,
        resume,
    }

    #[allow(non_camel_case_types, dead_code)]
    #[derive(scale_info::TypeInfo)]
    enum BridgeEvent {
        OperatorChanged { new_operator: [u8; 32] },
        Paused,
    }

    /// A two-pallet runtime: a bridge with the full surface, and a bare
    /// system pallet with storage only.
    fn sample_metadata_bytes() -> Vec<u8> {
        let bridge = PalletMetadata {
            name: "EthereumBridge",
            storage: Some(PalletStorageMetadata {
                prefix: "EthereumBridge",
                entries: vec![
                    StorageEntryMetadata {
                        name: "BridgeOperator",
                        modifier: StorageEntryModifier::Optional,
                        ty: StorageEntryType::Plain(meta_type::<[u8; 32]>()),
                        default: vec![],
                        docs: vec![],
                    },
                    StorageEntryMetadata {
                        name: "Deposits",
                        modifier: StorageEntryModifier::Optional,
                        ty: StorageEntryType::Map {
                            hashers: vec![StorageHasher::Blake2_128Concat],
                            key: meta_type::<[u8; 32]>(),
                            value: meta_type::<u128>(),
                        },
                        default: vec![],
                        docs: vec![],
                    },
                ],
            }),
            calls: Some(PalletCallMetadata {
                ty: meta_type::<BridgeCall>(),
            }),
            event: Some(PalletEventMetadata {
                ty: meta_type::<BridgeEvent>(),
            }),
            constants: vec![],
            error: None,
            index: 42,
        };
        let system = PalletMetadata {
            name: "System",
            storage: Some(PalletStorageMetadata {
                prefix: "System",
                entries: vec![StorageEntryMetadata {
                    name: "Number",
                    modifier: StorageEntryModifier::Default,
                    ty: StorageEntryType::Plain(meta_type::<u32>()),
                    default: vec![0; 4],
                    docs: vec![],
                }],
            }),
            calls: None,
            event: None,
            constants: vec![],
            error: None,
            index: 0,
        };

        let extrinsic = ExtrinsicMetadata {
            ty: meta_type::<()>(),
            version: 4,
            signed_extensions: vec![],
        };
        let metadata = RuntimeMetadataV14::new(vec![bridge, system], extrinsic, meta_type::<()>());
        RuntimeMetadataPrefixed::from(metadata).encode()
    }

    #[test]
    fn test_pallet_lookup_is_exact_and_case_sensitive() {
        let meta = ChainMetadata::from_bytes(&sample_metadata_bytes()).unwrap();
        assert!(meta.pallet("EthereumBridge").is_some());
        assert!(meta.pallet("ethereumbridge").is_none());
        assert!(meta.pallet("TokenBridge").is_none());
    }

    #[test]
    fn test_storage_items_present() {
        let meta = ChainMetadata::from_bytes(&sample_metadata_bytes()).unwrap();
        let bridge = meta.pallet("EthereumBridge").unwrap();
        assert!(bridge.has_storage_item("BridgeOperator"));
        let operator = bridge.storage_item("BridgeOperator").unwrap();
        assert_eq!(operator.ty, "plain([u8; 32])");
        let deposits = bridge.storage_item("Deposits").unwrap();
        assert_eq!(deposits.ty, "map([u8; 32] -> u128)");
    }

    #[test]
    fn test_callables_ordered_by_call_index() {
        let meta = ChainMetadata::from_bytes(&sample_metadata_bytes()).unwrap();
        let names = meta.callables("EthereumBridge").unwrap();
        assert_eq!(names, vec!["set_operator", "pause", "resume"]);
    }

    #[test]
    fn test_callable_args_resolved() {
        let meta = ChainMetadata::from_bytes(&sample_metadata_bytes()).unwrap();
        let bridge = meta.pallet("EthereumBridge").unwrap();
        let set_operator = &bridge.callables[0];
        assert_eq!(set_operator.args.len(), 1);
        assert_eq!(set_operator.args[0].name, "operator");
    }

    #[test]
    fn test_events_listed() {
        let meta = ChainMetadata::from_bytes(&sample_metadata_bytes()).unwrap();
        let bridge = meta.pallet("EthereumBridge").unwrap();
        let names: Vec<_> = bridge.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["OperatorChanged", "Paused"]);
    }

    #[test]
    fn test_pallet_without_calls_has_empty_callables() {
        let meta = ChainMetadata::from_bytes(&sample_metadata_bytes()).unwrap();
        assert_eq!(meta.callables("System").unwrap().len(), 0);
        assert_eq!(meta.callables("NoSuchPallet"), None);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let meta = ChainMetadata::from_bytes(&sample_metadata_bytes()).unwrap();
        assert_eq!(meta.search("bridge"), vec!["EthereumBridge"]);
        assert_eq!(meta.search("SYST"), vec!["System"]);
        assert!(meta.search("xyz").is_empty());
    }

    #[test]
    fn test_garbage_blob_is_malformed() {
        assert!(matches!(
            ChainMetadata::from_bytes(&[1, 2, 3]),
            Err(MetadataError::Codec(_))
        ));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let extrinsic = ExtrinsicMetadata {
            ty: meta_type::<()>(),
            version: 4,
            signed_extensions: vec![],
        };
        let metadata = RuntimeMetadataV14::new(vec![], extrinsic, meta_type::<()>());
        let bytes = RuntimeMetadataPrefixed(0xdead_beef, RuntimeMetadata::V14(metadata)).encode();
        assert!(matches!(
            ChainMetadata::from_bytes(&bytes),
            Err(MetadataError::BadMagic)
        ));
    }
}
