//! Cookie transport for [`Flash`] payloads.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use metrics::counter;
use tracing::{debug, warn};

use crate::application::flash::Flash;

/// Reads and writes the one-shot flash cookie.
#[derive(Debug, Clone)]
pub struct FlashCookie {
    name: Arc<str>,
}

impl FlashCookie {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
        }
    }

    /// Remove the flash cookie from `jar`, returning its decoded payload.
    ///
    /// A missing or undecodable cookie yields an empty [`Flash`]; the cookie is cleared either way.
    pub fn take(&self, jar: CookieJar) -> (CookieJar, Flash) {
        let Some(raw) = jar.get(&self.name).map(|cookie| cookie.value().to_string()) else {
            return (jar, Flash::default());
        };

        let flash = match decode(&raw) {
            Some(flash) => flash,
            None => {
                debug!(
                    target = "postboard::http::flash",
                    cookie = %self.name,
                    "discarding malformed flash cookie"
                );
                Flash::default()
            }
        };

        if !flash.is_empty() {
            counter!("postboard_flash_consumed_total").increment(1);
        }

        let jar = jar.remove(Cookie::build((self.name.to_string(), "")).path("/"));
        (jar, flash)
    }

    /// Store `flash` for the next rendered screen.
    pub fn put(&self, jar: CookieJar, flash: &Flash) -> CookieJar {
        let value = match serde_json::to_vec(flash) {
            Ok(bytes) => URL_SAFE_NO_PAD.encode(bytes),
            Err(err) => {
                warn!(
                    target = "postboard::http::flash",
                    error = %err,
                    "failed to encode flash payload"
                );
                return jar;
            }
        };

        jar.add(
            Cookie::build((self.name.to_string(), value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        )
    }
}

fn decode(raw: &str) -> Option<Flash> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_take_consumes_the_payload() {
        let flash_cookie = FlashCookie::new("postboard_flash");
        let jar = flash_cookie.put(CookieJar::new(), &Flash::success("Saved"));
        let value = jar.get("postboard_flash").expect("cookie set");
        assert!(value.http_only().unwrap_or(false));

        let (jar, flash) = flash_cookie.take(jar);
        assert_eq!(flash, Flash::success("Saved"));
        assert!(jar.get("postboard_flash").is_none());
    }

    #[test]
    fn malformed_cookie_yields_empty_flash() {
        let flash_cookie = FlashCookie::new("postboard_flash");
        let jar = CookieJar::new().add(Cookie::new("postboard_flash", "%%%not-base64"));

        let (jar, flash) = flash_cookie.take(jar);
        assert!(flash.is_empty());
        assert!(jar.get("postboard_flash").is_none());
    }

    #[test]
    fn absent_cookie_is_a_no_op() {
        let flash_cookie = FlashCookie::new("postboard_flash");
        let (_, flash) = flash_cookie.take(CookieJar::new());
        assert!(flash.is_empty());
    }
}
