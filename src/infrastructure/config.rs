use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub server: ServerSettings,
    pub fetch: FetchSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchSettings {
    /// Cap on in-flight month fetches per report, to stay polite to the
    /// upstream API.
    pub concurrency: usize,
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", "https://api.playhive.com/v0")?
        .set_default("api.timeout_secs", 10)?
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("fetch.concurrency", 4)?
        .add_source(config::File::with_name("config/app").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
