//! Static files compiled into the binary.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::Mime;

use crate::application::error::ErrorReport;

const SOURCE: &str = "infra::assets::serve_static_asset";

static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Serve the embedded stylesheet and any other file under `static/`.
pub async fn serve_static_asset(path: Option<Path<String>>) -> Response {
    match resolve_asset(path.map(|Path(value)| value)) {
        Ok(Some(asset)) => asset.into_response(),
        Ok(None) => asset_error(StatusCode::NOT_FOUND, "Static asset not found"),
        Err(status) => asset_error(status, "Static asset request rejected"),
    }
}

fn asset_error(status: StatusCode, detail: &'static str) -> Response {
    let mut response = status.into_response();
    ErrorReport::from_message(SOURCE, status, detail).attach(&mut response);
    response
}

struct Asset {
    contents: &'static [u8],
    mime: Mime,
}

fn resolve_asset(path: Option<String>) -> Result<Option<Asset>, StatusCode> {
    let path = path.unwrap_or_default();
    let candidate = path.trim_start_matches('/');

    if candidate.contains("..") {
        return Err(StatusCode::BAD_REQUEST);
    }
    if candidate.is_empty() || candidate.ends_with('/') {
        // No directory listings.
        return Ok(None);
    }

    Ok(STATIC_ASSETS.get_file(candidate).map(|file| Asset {
        contents: file.contents(),
        mime: mime_guess::from_path(candidate).first_or_octet_stream(),
    }))
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        let len = self.contents.len();
        let mut response = Response::new(Body::from(Bytes::from_static(self.contents)));

        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(self.mime.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );

        response
    }
}
