//! Conversion from decoded runtime metadata into the introspection tree.
//!
//! V15 re-exports the V14 storage structures, so the per-pallet walk is
//! shared; only the top-level dispatch differs per version.

use super::{CallableArg, CallableInfo, ChainMetadata, EventInfo, PalletInfo, StorageItemInfo};
use crate::error::MetadataError;
use frame_metadata::v14::{StorageEntryMetadata, StorageEntryType};
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed, META_RESERVED};
use scale_info::form::PortableForm;
use scale_info::{PortableRegistry, TypeDef, TypeDefPrimitive, Variant};

pub(super) fn from_prefixed(prefixed: RuntimeMetadataPrefixed) -> Result<ChainMetadata, MetadataError> {
    if prefixed.0 != META_RESERVED {
        return Err(MetadataError::BadMagic);
    }
    match prefixed.1 {
        RuntimeMetadata::V14(md) => Ok(ChainMetadata {
            pallets: md
                .pallets
                .iter()
                .map(|p| {
                    pallet_info(
                        &md.types,
                        &p.name,
                        p.index,
                        p.storage.as_ref().map(|s| s.entries.as_slice()),
                        p.calls.as_ref().map(|c| c.ty.id),
                        p.event.as_ref().map(|e| e.ty.id),
                    )
                })
                .collect(),
        }),
        RuntimeMetadata::V15(md) => Ok(ChainMetadata {
            pallets: md
                .pallets
                .iter()
                .map(|p| {
                    pallet_info(
                        &md.types,
                        &p.name,
                        p.index,
                        p.storage.as_ref().map(|s| s.entries.as_slice()),
                        p.calls.as_ref().map(|c| c.ty.id),
                        p.event.as_ref().map(|e| e.ty.id),
                    )
                })
                .collect(),
        }),
        _ => Err(MetadataError::UnsupportedVersion),
    }
}

fn pallet_info(
    registry: &PortableRegistry,
    name: &str,
    index: u8,
    entries: Option<&[StorageEntryMetadata<PortableForm>]>,
    call_ty: Option<u32>,
    event_ty: Option<u32>,
) -> PalletInfo {
    PalletInfo {
        name: name.to_string(),
        index,
        storage: entries
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| StorageItemInfo {
                        name: e.name.clone(),
                        ty: render_entry_type(registry, &e.ty),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        callables: call_ty.map(|id| callables_of(registry, id)).unwrap_or_default(),
        events: event_ty.map(|id| events_of(registry, id)).unwrap_or_default(),
    }
}

fn render_entry_type(registry: &PortableRegistry, ty: &StorageEntryType<PortableForm>) -> String {
    match ty {
        StorageEntryType::Plain(value) => format!("plain({})", type_name(registry, value.id)),
        StorageEntryType::Map { key, value, .. } => format!(
            "map({} -> {})",
            type_name(registry, key.id),
            type_name(registry, value.id)
        ),
    }
}

fn callables_of(registry: &PortableRegistry, id: u32) -> Vec<CallableInfo> {
    enum_variants(registry, id)
        .into_iter()
        .map(|v| CallableInfo {
            name: v.name.clone(),
            args: v
                .fields
                .iter()
                .map(|f| CallableArg {
                    name: f.name.clone().unwrap_or_default(),
                    ty: f
                        .type_name
                        .clone()
                        .unwrap_or_else(|| type_name(registry, f.ty.id)),
                })
                .collect(),
        })
        .collect()
}

fn events_of(registry: &PortableRegistry, id: u32) -> Vec<EventInfo> {
    enum_variants(registry, id)
        .into_iter()
        .map(|v| EventInfo {
            name: v.name.clone(),
            payload: v
                .fields
                .iter()
                .map(|f| {
                    f.type_name
                        .clone()
                        .unwrap_or_else(|| type_name(registry, f.ty.id))
                })
                .collect(),
        })
        .collect()
}

/// The variants of an enum type, ordered by variant index. Non-enum or
/// unresolvable ids yield an empty list rather than an error — the pallet
/// then simply introspects as having no callables/events.
fn enum_variants(registry: &PortableRegistry, id: u32) -> Vec<&Variant<PortableForm>> {
    let Some(ty) = registry.resolve(id) else {
        return Vec::new();
    };
    let TypeDef::Variant(def) = &ty.type_def else {
        return Vec::new();
    };
    let mut variants: Vec<_> = def.variants.iter().collect();
    variants.sort_by_key(|v| v.index);
    variants
}

/// A short human-readable name for a registry type.
fn type_name(registry: &PortableRegistry, id: u32) -> String {
    let Some(ty) = registry.resolve(id) else {
        return format!("#{id}");
    };
    if let Some(segment) = ty.path.segments.last() {
        return segment.clone();
    }
    match &ty.type_def {
        TypeDef::Primitive(p) => primitive_name(p).to_string(),
        TypeDef::Array(a) => format!("[{}; {}]", type_name(registry, a.type_param.id), a.len),
        TypeDef::Sequence(s) => format!("Vec<{}>", type_name(registry, s.type_param.id)),
        TypeDef::Compact(c) => format!("Compact<{}>", type_name(registry, c.type_param.id)),
        TypeDef::Tuple(t) => format!(
            "({})",
            t.fields
                .iter()
                .map(|f| type_name(registry, f.id))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        _ => format!("#{id}"),
    }
}

fn primitive_name(p: &TypeDefPrimitive) -> &'static str {
    match p {
        TypeDefPrimitive::Bool => "bool",
        TypeDefPrimitive::Char => "char",
        TypeDefPrimitive::Str => "str",
        TypeDefPrimitive::U8 => "u8",
        TypeDefPrimitive::U16 => "u16",
        TypeDefPrimitive::U32 => "u32",
        TypeDefPrimitive::U64 => "u64",
        TypeDefPrimitive::U128 => "u128",
        TypeDefPrimitive::U256 => "u256",
        TypeDefPrimitive::I8 => "i8",
        TypeDefPrimitive::I16 => "i16",
        TypeDefPrimitive::I32 => "i32",
        TypeDefPrimitive::I64 => "i64",
        TypeDefPrimitive::I128 => "i128",
        TypeDefPrimitive::I256 => "i256",
    }
}
