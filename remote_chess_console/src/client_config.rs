use anyhow::Context;
use remote_chess::config::ClientOptions;
use url::Url;


pub fn parse_options(yaml: &str) -> anyhow::Result<ClientOptions> {
    Ok(serde_yaml::from_str(yaml)?)
}

// Command line arguments take precedence over the config file.
pub fn load_options(
    config_file: Option<&str>, base_url: Option<&str>, poll_interval: Option<&str>,
) -> anyhow::Result<ClientOptions> {
    let mut options = match config_file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file '{path}'."))?;
            parse_options(&contents).with_context(|| format!("Failed to parse config file '{path}'."))?
        }
        None => ClientOptions::default(),
    };
    if let Some(base_url) = base_url {
        options.base_url = parse_base_url(base_url)?;
    }
    if let Some(poll_interval) = poll_interval {
        options.poll_interval = humantime::parse_duration(poll_interval)
            .with_context(|| format!("Invalid poll interval '{poll_interval}'."))?;
    }
    Ok(options)
}

pub fn parse_base_url(s: &str) -> anyhow::Result<Url> {
    let url = Url::parse(s).with_context(|| format!("Invalid base URL '{s}'."))?;
    anyhow::ensure!(!url.cannot_be_a_base(), "Base URL '{s}' cannot have a path.");
    Ok(url)
}
