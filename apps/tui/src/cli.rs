use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "theft_dashboard", version, about = "Vehicle theft analysis dashboard")]
pub struct CliArgs {
    /// Dashboard document to load: a file path or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    pub source: Option<String>,

    /// Print stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Number formatting locale (en, de, fr, ch)
    #[arg(long, value_name = "TAG")]
    pub locale: Option<String>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(source) = &self.source {
            std::env::set_var("DASHBOARD_SOURCE", source);
        }
        if let Some(locale) = &self.locale {
            std::env::set_var("DASHBOARD_LOCALE", locale);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("DASHBOARD_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "theft_dashboard",
            "--source",
            "http://localhost:5173/dashboard_data.json",
            "--headless",
            "--json",
            "--locale",
            "fr",
            "--log-file",
            "dash.log",
        ])?;

        assert_eq!(
            args.source.as_deref(),
            Some("http://localhost:5173/dashboard_data.json")
        );
        assert!(args.headless);
        assert!(args.json);
        assert!(!args.debug);
        assert_eq!(args.locale.as_deref(), Some("fr"));
        assert_eq!(args.log_file.as_deref(), Some("dash.log"));
        Ok(())
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn flags_are_optional() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from(["theft_dashboard"])?;
        assert!(args.source.is_none());
        assert!(!args.headless);
        Ok(())
    }
}
