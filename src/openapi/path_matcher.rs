//! Concrete path to path-template matching

use crate::error::{Result, ScoutError};
use serde_json::{Map, Value};
use tracing::debug;

/// Find the template under `paths` that matches `concrete`.
///
/// Exact keys win; otherwise the first template in declared order whose
/// segments line up is returned. No specificity scoring.
pub fn match_path<'a>(paths: &'a Map<String, Value>, concrete: &str) -> Result<&'a str> {
    if let Some((key, _)) = paths.get_key_value(concrete) {
        debug!("Exact path match: {}", key);
        return Ok(key.as_str());
    }

    let matched = paths
        .keys()
        .find(|template| template_matches(template, concrete))
        .map(String::as_str);

    match matched {
        Some(template) => {
            debug!("Matched path {} to template {}", concrete, template);
            Ok(template)
        }
        None => Err(ScoutError::path_not_found(concrete)),
    }
}

/// Segment-wise comparison; `{name}` segments match any non-empty literal
pub fn template_matches(template: &str, concrete: &str) -> bool {
    let template_segments: Vec<&str> = template.split('/').collect();
    let concrete_segments: Vec<&str> = concrete.split('/').collect();

    if template_segments.len() != concrete_segments.len() {
        return false;
    }

    template_segments
        .iter()
        .zip(concrete_segments.iter())
        .all(|(pattern, literal)| {
            if is_parameter_segment(pattern) {
                !literal.is_empty()
            } else {
                pattern == literal
            }
        })
}

fn is_parameter_segment(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}
