use clap::Parser;
use std::path::PathBuf;

use crate::config::{default_data_dir, DATA_DIR_ENV};

/// Per-app settings for apps installed through PlayCover.
#[derive(Debug, Parser)]
#[command(name = "playcover-settings", version, about)]
pub struct Cli {
    /// Bundle identifier of the installed app, e.g. `com.example.game`.
    pub bundle_id: String,

    /// Directory holding `App Settings/` and `Apps/`.
    #[arg(long, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Screen width in pixels used by the Auto resolution.
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    pub screen_width: Option<i32>,

    /// Print the stored settings as JSON and exit.
    #[arg(long)]
    pub print: bool,
}

impl Cli {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bundle_and_flags() {
        let cli = Cli::try_parse_from([
            "playcover-settings",
            "com.example.game",
            "--data-dir",
            "/tmp/pc",
            "--screen-width",
            "3024",
            "--print",
        ])
        .unwrap();
        assert_eq!(cli.bundle_id, "com.example.game");
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/pc"));
        assert_eq!(cli.screen_width, Some(3024));
        assert!(cli.print);
    }

    #[test]
    fn rejects_non_positive_screen_width() {
        assert!(
            Cli::try_parse_from(["playcover-settings", "a.b", "--screen-width", "0"]).is_err()
        );
    }

    #[test]
    fn bundle_id_is_required() {
        assert!(Cli::try_parse_from(["playcover-settings"]).is_err());
    }
}
