use crate::config::AppInfo;

/// Read-only `(label, value)` rows describing the installed app.
pub fn rows(info: &AppInfo) -> Vec<(&'static str, String)> {
    vec![
        ("Display name:", info.display_name.clone()),
        ("Bundle name:", info.bundle_name.clone()),
        ("Bundle identifier:", info.bundle_identifier.clone()),
        ("Bundle version:", info.bundle_version.clone()),
        ("Executable name:", info.executable_name.clone()),
        ("Minimum OS version:", info.minimum_os_version.clone()),
        ("URL:", info.url.clone()),
        ("Is Game:", if info.is_game { "Yes" } else { "No" }.to_string()),
    ]
}
