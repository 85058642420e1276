use std::{fs, path::PathBuf};

use tracing::debug;

const DEFAULT_PROFILE: &str = "default";

/// Profile names from the shared AWS config and credentials files, `default` first.
pub fn discover_profiles() -> Vec<String> {
    let Some(aws_dir) = dirs::home_dir().map(|home| home.join(".aws")) else {
        return Vec::new();
    };

    let config = read(aws_dir.join("config"));
    let credentials = read(aws_dir.join("credentials"));
    let profiles = profiles_from(&config, &credentials);

    debug!(count = profiles.len(), "discovered AWS profiles");
    profiles
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path).unwrap_or_else(|err| {
        debug!(path = %path.display(), %err, "skipping AWS file");
        String::new()
    })
}

pub fn profiles_from(config: &str, credentials: &str) -> Vec<String> {
    let config = sections(config).filter_map(|section| match section {
        DEFAULT_PROFILE => Some(section),
        _ => section.strip_prefix("profile ").map(str::trim),
    });

    let mut profiles: Vec<String> = Vec::new();
    for name in config.chain(sections(credentials)) {
        if !name.is_empty() && !profiles.iter().any(|p| p == name) {
            profiles.push(name.to_string());
        }
    }

    if let Some(index) = profiles.iter().position(|p| p == DEFAULT_PROFILE) {
        let default = profiles.remove(index);
        profiles.insert(0, default);
    }
    profiles
}

fn sections(content: &str) -> impl Iterator<Item = &str> {
    content.lines().filter_map(|line| {
        line.trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::trim)
    })
}
