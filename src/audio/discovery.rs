use std::fmt::Write as _;
use std::path::Path;

use crate::foundation::error::{RelicError, RelicResult};

pub const MANIFEST_FILE: &str = "tracks.json";

/// A playable entry: display name plus a source locator handed to the player.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub name: String,
    pub src: String,
}

impl Track {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
        }
    }
}

pub const FALLBACK_TRACKS: [&str; 7] = ["7.7.7", "6.6.6", "5.5.5", "4.4.4", "3.3.3", "2.2.2", "1.1.1"];

pub fn fallback_tracks(src_prefix: &str) -> Vec<Track> {
    FALLBACK_TRACKS
        .iter()
        .map(|n| Track::new(*n, format!("{}/{n}.mp3", src_prefix.trim_end_matches('/'))))
        .collect()
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ManifestDoc {
    List(Vec<ManifestEntry>),
    Wrapped { tracks: Vec<ManifestEntry> },
}

#[derive(Debug, serde::Deserialize)]
struct ManifestEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    src: Option<String>,
}

/// Parse a `tracks.json` document: a bare array or `{ "tracks": [...] }`.
/// Entries without `src` are dropped; a missing name falls back to the file stem.
pub fn parse_manifest(json: &str) -> RelicResult<Vec<Track>> {
    let doc: ManifestDoc =
        serde_json::from_str(json).map_err(|e| RelicError::serde(format!("tracks manifest: {e}")))?;
    let entries = match doc {
        ManifestDoc::List(v) => v,
        ManifestDoc::Wrapped { tracks } => tracks,
    };
    Ok(entries
        .into_iter()
        .filter_map(|e| {
            let src = e.src.filter(|s| !s.is_empty())?;
            let name = e
                .name
                .filter(|n| !n.is_empty())
                .or_else(|| file_stem(&src))
                .unwrap_or_else(|| "track".to_string());
            Some(Track { name, src })
        })
        .collect())
}

fn file_stem(src: &str) -> Option<String> {
    let file = src.rsplit('/').next()?;
    let stem = match file.rfind('.') {
        Some(0) | None => file,
        Some(dot) => &file[..dot],
    };
    (!stem.is_empty()).then(|| stem.to_string())
}

fn is_audio_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".mp3") || lower.ends_with(".wav")
}

/// Audio files found directly in `dir`, sorted by name (case-insensitive).
pub fn list_audio_files(dir: &Path, src_prefix: &str) -> RelicResult<Vec<Track>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        RelicError::assets(format!("failed to list '{}': {e}", dir.display()))
    })?;

    let prefix = src_prefix.trim_end_matches('/');
    let mut tracks = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| RelicError::assets(format!("failed to list '{}': {e}", dir.display())))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(file) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if file.contains("..") || !is_audio_file(&file) {
            continue;
        }
        let name = file_stem(&file).unwrap_or_else(|| file.clone());
        tracks.push(Track::new(name, format!("{prefix}/{}", encode_component(&file))));
    }
    tracks.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(tracks)
}

/// Percent-encode a file name for use as one path segment. Leaves the same
/// characters untouched as a browser's `encodeURIComponent`.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' => out.push(c),
            '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')' => out.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "%{byte:02X}");
                }
            }
        }
    }
    out
}

/// Resolve the playlist for `dir`: manifest first, then a directory listing,
/// then the built-in fallback list. Never fails and never returns an empty list.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn discover_tracks(dir: &Path, src_prefix: &str) -> Vec<Track> {
    let tracks = match try_discover(dir, src_prefix) {
        Ok(t) if !t.is_empty() => t,
        Ok(_) => {
            tracing::info!("no audio files found, using fallback tracks");
            fallback_tracks(src_prefix)
        }
        Err(err) => {
            tracing::warn!(%err, "track discovery failed, using fallback tracks");
            fallback_tracks(src_prefix)
        }
    };
    tracing::info!(count = tracks.len(), names = ?tracks.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), "discovered tracks");
    tracks
}

fn try_discover(dir: &Path, src_prefix: &str) -> RelicResult<Vec<Track>> {
    let manifest = dir.join(MANIFEST_FILE);
    if manifest.is_file() {
        let json = std::fs::read_to_string(&manifest).map_err(|e| {
            RelicError::assets(format!("failed to read '{}': {e}", manifest.display()))
        })?;
        let tracks = parse_manifest(&json)?;
        if !tracks.is_empty() {
            tracing::debug!("tracks from manifest");
            return Ok(tracks);
        }
    }
    list_audio_files(dir, src_prefix)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/discovery.rs"]
mod tests;
