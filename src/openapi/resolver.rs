//! Local `$ref` resolution and cycle tracking

use crate::error::{Result, ScoutError};
use serde_json::Value;
use tracing::trace;

/// Resolves `#/...` JSON pointers against a document root
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    root: &'a Value,
}

impl<'a> RefResolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Walk `pointer` from the document root.
    ///
    /// Only same-document pointers are supported. Segments are unescaped
    /// (`~1` is `/`, `~0` is `~`) and index arrays numerically.
    pub fn resolve(&self, pointer: &str) -> Result<&'a Value> {
        let path = match pointer.strip_prefix('#') {
            Some(path) => path,
            None => {
                return Err(ScoutError::reference(
                    pointer,
                    "",
                    "only local references starting with '#/' are supported",
                ))
            }
        };

        if path.is_empty() {
            return Ok(self.root);
        }

        let path = match path.strip_prefix('/') {
            Some(path) => path,
            None => {
                return Err(ScoutError::reference(
                    pointer,
                    "#",
                    "pointer must start with '#/'",
                ))
            }
        };

        let mut current = self.root;
        let mut resolved = String::from("#");

        for raw_segment in path.split('/') {
            let segment = unescape_segment(raw_segment);
            let next = match current {
                Value::Object(map) => map.get(&segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };

            match next {
                Some(value) => {
                    current = value;
                    resolved.push('/');
                    resolved.push_str(raw_segment);
                }
                None => {
                    return Err(ScoutError::reference(
                        pointer.to_string(),
                        resolved,
                        format!("segment '{}' not found", segment),
                    ))
                }
            }
        }

        trace!("Resolved reference {}", pointer);
        Ok(current)
    }
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Trailing segment of a pointer, used as a display name
pub fn short_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// The `$ref` string of a schema, if it is a reference
pub fn ref_pointer(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// Pointers currently being expanded by one describe or synthesize call.
///
/// Entering a pointer already on the trail is a cycle. Leaving removes it,
/// so siblings that reuse a component are not cycles.
#[derive(Debug, Default)]
pub struct ResolutionTrail {
    active: Vec<String>,
}

impl ResolutionTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, pointer: &str) -> Result<()> {
        if self.contains(pointer) {
            let mut chain = self.active.clone();
            chain.push(pointer.to_string());
            return Err(ScoutError::cyclic_reference(chain.join(" -> ")));
        }
        self.active.push(pointer.to_string());
        Ok(())
    }

    pub fn leave(&mut self, pointer: &str) {
        if let Some(index) = self.active.iter().rposition(|p| p == pointer) {
            self.active.remove(index);
        }
    }

    pub fn contains(&self, pointer: &str) -> bool {
        self.active.iter().any(|p| p == pointer)
    }
}

/// Follow a chain of `$ref`s until a non-reference node is reached
pub fn resolve_chain<'a>(resolver: &RefResolver<'a>, value: &'a Value) -> Result<&'a Value> {
    let mut trail = ResolutionTrail::new();
    let mut current = value;
    while let Some(pointer) = ref_pointer(current) {
        trail.enter(pointer)?;
        current = resolver.resolve(pointer)?;
    }
    Ok(current)
}
