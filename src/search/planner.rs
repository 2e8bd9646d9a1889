//! Resolves user-registered paths (file, directory, or glob) to concrete
//! files, applying log-rotation pruning.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Matches any logrotate series member: `NAME.log`, `NAME.log.N`,
/// `NAME.log.N.gz`.
static SERIES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\S+)\.log\S*$").unwrap());

/// Matches a rotated sibling specifically (not the unrotated head),
/// capturing the rotation integer.
static ROTATED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\S+)\.log\.(\d+)(\.gz)?$").unwrap());

/// Expands one user path into the concrete list of files to scan.
///
/// - A literal file resolves to itself.
/// - A directory resolves to its immediate file children.
/// - Anything else is treated as a glob pattern and expanded.
///
/// The result is then pruned per `max_logrotate_depth`: files are
/// partitioned into logrotate series keyed by their `NAME` component;
/// within each series, rotated siblings are sorted ascending by rotation
/// integer (the unrotated head sorts first, non-matching names sort to
/// the end) and the series is capped to `max_logrotate_depth` entries,
/// head included. Files that don't match the logrotate naming convention
/// pass through unpruned.
#[must_use]
pub fn resolve(user_path: &str, max_logrotate_depth: u32) -> Vec<PathBuf> {
    let candidates = expand(user_path);
    prune_logrotate(candidates, max_logrotate_depth)
}

fn expand(user_path: &str) -> Vec<PathBuf> {
    let path = Path::new(user_path);

    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    if path.is_dir() {
        return std::fs::read_dir(path)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect();
    }

    glob::glob(user_path)
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect()
}

fn prune_logrotate(files: Vec<PathBuf>, max_depth: u32) -> Vec<PathBuf> {
    let mut series: std::collections::HashMap<String, Vec<PathBuf>> = std::collections::HashMap::new();
    let mut unpruned = Vec::new();

    for file in files {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            unpruned.push(file);
            continue;
        };

        match SERIES_RE.captures(name) {
            Some(caps) => {
                let base = caps.get(1).map_or(name, |m| m.as_str()).to_string();
                series.entry(base).or_default().push(file);
            }
            None => unpruned.push(file),
        }
    }

    let mut out = unpruned;
    for mut members in series.into_values() {
        members.sort_by_key(|p| rotation_key(p));
        members.truncate(max_depth.max(1) as usize);
        out.extend(members);
    }

    out
}

/// Sort key for one series member: the rotation integer for a rotated
/// sibling, `0` for the literal unrotated head (`base.log`), `u64::MAX`
/// for anything else in the series (pushed to the back — e.g. a
/// `base.log.bar` file that matches the series but not the rotation
/// shape must not be mistaken for the head).
fn rotation_key(path: &Path) -> u64 {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return u64::MAX;
    };

    if let Some(caps) = ROTATED_RE.captures(name) {
        return caps.get(2).and_then(|m| m.as_str().parse::<u64>().ok()).unwrap_or(u64::MAX);
    }

    if let Some(caps) = SERIES_RE.captures(name) {
        let base = caps.get(1).map_or(name, |m| m.as_str());
        if name == format!("{base}.log") {
            return 0;
        }
    }

    u64::MAX
}
