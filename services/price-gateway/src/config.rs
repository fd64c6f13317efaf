/// Gateway configuration loaded from environment
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub source: SourceKind,
    pub api_key: Option<String>,
}

/// Which price source variant to run with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Mock,
    Live,
}

pub fn load_config() -> anyhow::Result<GatewayConfig> {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let api_key = std::env::var("METALS_API_KEY")
        .ok()
        .filter(|k| !k.is_empty());

    // Default to mock so the stack runs without a credential. A missing key
    // under "live" is not a startup error: it surfaces at fetch time
    // through the same path as any other fetch failure.
    let source = match std::env::var("PRICE_SOURCE") {
        Ok(v) if v == "live" => SourceKind::Live,
        Ok(v) if v == "mock" => SourceKind::Mock,
        Ok(other) => return Err(anyhow::anyhow!("Invalid PRICE_SOURCE: {}", other)),
        Err(_) => SourceKind::Mock,
    };

    Ok(GatewayConfig {
        port,
        source,
        api_key,
    })
}
