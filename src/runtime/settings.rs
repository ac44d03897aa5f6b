use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("mixtape: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("mixtape: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Command line arguments understood by the binary.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Print the effective settings as TOML and exit.
    pub print_config: bool,
    /// Server base URL overriding `server.base_url`.
    pub base_url: Option<String>,
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> CliArgs {
    let mut cli = CliArgs::default();
    for arg in args {
        if arg == "--print-config" {
            cli.print_config = true;
        } else if !arg.starts_with("--") && cli.base_url.is_none() {
            cli.base_url = Some(arg);
        }
    }
    cli
}

/// Apply command line overrides on top of loaded settings.
pub fn apply_args(settings: &mut config::Settings, cli: &CliArgs) -> Result<(), String> {
    if let Some(url) = &cli.base_url {
        settings.server.base_url = url.clone();
        settings.validate()?;
    }
    Ok(())
}
