// [libs/infra/fetch/src/headers.rs]
//! =================================================================
//! APARATO: BROWSER CAMOUFLAGE HEADER SET (V1.0)
//! RESPONSABILIDAD: SIMULACIÓN DE TRÁFICO HUMANO DE NAVEGADOR
//!
//! Un GET con únicamente un User-Agent es en sí mismo una señal de bloqueo
//! para sitios que hacen fingerprinting de tráfico (§4.2).
//! =================================================================

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue};

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Construye un juego de cabeceras de navegador real, rotando el User-Agent.
pub fn browser_like_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let chosen_agent = USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0]);

    let agent_value = HeaderValue::from_str(chosen_agent).unwrap_or_else(|_| HeaderValue::from_static(USER_AGENTS[0]));
    headers.insert("User-Agent", agent_value);
    headers.insert(
        "Accept",
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    );
    headers.insert("Accept-Language", HeaderValue::from_static("sv-SE,sv;q=0.9,en-US;q=0.8,en;q=0.7"));
    headers.insert("Accept-Encoding", HeaderValue::from_static("gzip, deflate, br"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert("Connection", HeaderValue::from_static("keep-alive"));
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("document"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("navigate"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("none"));
    headers.insert("Sec-Fetch-User", HeaderValue::from_static("?1"));
    headers.insert("Cache-Control", HeaderValue::from_static("max-age=0"));
    headers
}
