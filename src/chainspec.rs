//! Genesis chain-spec patching.
//!
//! A chain spec is a JSON document with a nested runtime-genesis section
//! (conceptually `genesis.runtimeGenesis.<field>`). Patching copies one
//! field subtree from a source document into a target document under the
//! preferred (camel-case) field name and removes any differently-cased
//! legacy alias, so the target never carries both spellings. Field order is
//! preserved on re-serialization.

use crate::error::SpecPatchError;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// The conventional location of runtime genesis fields.
pub const RUNTIME_GENESIS_PATH: &[&str] = &["genesis", "runtimeGenesis"];

/// Replace `target`'s subtree at `path` + `preferred_key` with the matching
/// subtree from `source`, deleting any `legacy_key` sibling in the target.
///
/// The source field is read under `preferred_key`, falling back to
/// `legacy_key` when the source still uses the old casing. Every
/// intermediate `path` segment must exist as an object in both documents;
/// a missing segment (or a missing source field under either name) is
/// [`SpecPatchError::PathNotFound`]. Applying the same patch twice yields a
/// document identical to applying it once.
pub fn patch_genesis_field(
    target: &mut Value,
    source: &Value,
    path: &[&str],
    preferred_key: &str,
    legacy_key: &str,
) -> Result<(), SpecPatchError> {
    let source_parent = walk(source, path)?;
    let subtree = source_parent
        .get(preferred_key)
        .or_else(|| source_parent.get(legacy_key))
        .cloned()
        .ok_or_else(|| SpecPatchError::PathNotFound {
            parent: path.join("."),
            segment: preferred_key.to_string(),
        })?;

    let target_parent = walk_mut(target, path)?;
    let fields = target_parent
        .as_object_mut()
        .ok_or_else(|| SpecPatchError::NotAnObject(path.join(".")))?;
    fields.insert(preferred_key.to_string(), subtree);
    fields.remove(legacy_key);
    Ok(())
}

/// Patch `target_path` on disk from `source_path`.
///
/// The re-serialized document is written to a temporary sibling file,
/// flushed, and renamed over the target, so a partially written document is
/// never visible as success.
pub fn patch_spec_file(
    target_path: &Path,
    source_path: &Path,
    path: &[&str],
    preferred_key: &str,
    legacy_key: &str,
) -> Result<(), SpecPatchError> {
    let mut target: Value = serde_json::from_slice(&fs::read(target_path)?)?;
    let source: Value = serde_json::from_slice(&fs::read(source_path)?)?;

    patch_genesis_field(&mut target, &source, path, preferred_key, legacy_key)?;

    let tmp_path = target_path.with_extension("json.tmp");
    {
        let mut tmp = fs::File::create(&tmp_path)?;
        serde_json::to_writer_pretty(&mut tmp, &target)?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.sync_all()?;
    }
    fs::rename(&tmp_path, target_path)?;
    debug!(target = %target_path.display(), field = preferred_key, "patched chain spec");
    Ok(())
}

fn walk<'a>(doc: &'a Value, path: &[&str]) -> Result<&'a Value, SpecPatchError> {
    let mut node = doc;
    let mut parent = String::from("$");
    for segment in path {
        node = node.get(segment).ok_or_else(|| SpecPatchError::PathNotFound {
            parent: parent.clone(),
            segment: segment.to_string(),
        })?;
        parent = format!("{parent}.{segment}");
    }
    Ok(node)
}

fn walk_mut<'a>(doc: &'a mut Value, path: &[&str]) -> Result<&'a mut Value, SpecPatchError> {
    let mut node = doc;
    let mut parent = String::from("$");
    for segment in path {
        node = node
            .get_mut(segment)
            .ok_or_else(|| SpecPatchError::PathNotFound {
                parent: parent.clone(),
                segment: segment.to_string(),
            })?;
        parent = format!("{parent}.{segment}");
    }
    Ok(node)
}
