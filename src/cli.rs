use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "esevai", version, about = "E-sevai services in the terminal")]
pub struct Args {
    /// Path to the config file (defaults to <config dir>/esevai/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Theme name (e.g., "E-sevai", "Catppuccin Mocha")
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Frames per second used to render and advance animations
    #[arg(short, long)]
    pub frame_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::parse_from(["esevai", "--theme", "Catppuccin Latte", "--frame-rate", "30"]);
        assert_eq!(args.theme.as_deref(), Some("Catppuccin Latte"));
        assert_eq!(args.frame_rate, Some(30.0));
        assert!(args.config.is_none());
    }
}
