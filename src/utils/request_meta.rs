//! Request metadata extraction from HTTP headers.

use crate::domain::resolution::{GeoInfo, RequestMeta};
use axum::http::{HeaderMap, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";
const GEO_CITY: &str = "x-vercel-ip-city";
const GEO_REGION: &str = "x-vercel-ip-country-region";
const GEO_COUNTRY: &str = "x-vercel-ip-country";
const CF_COUNTRY: &str = "cf-ipcountry";

/// Builds [`RequestMeta`] from request headers.
///
/// - Origin: `X-Forwarded-Proto` (default `http`) and `X-Forwarded-Host`
///   or `Host` (default `localhost`)
/// - Geo: Vercel edge headers, with `CF-IPCountry` as a country fallback
///
/// Missing or non-UTF-8 headers are treated as absent.
pub fn extract_request_meta(headers: &HeaderMap) -> RequestMeta {
    let proto = first_value(header_str(headers, FORWARDED_PROTO)).unwrap_or("http");
    let host = first_value(header_str(headers, FORWARDED_HOST))
        .or_else(|| header_str(headers, header::HOST.as_str()))
        .unwrap_or("localhost");

    let geo = GeoInfo {
        // Vercel percent-encodes city names
        city: header_str(headers, GEO_CITY).map(|c| {
            urlencoding::decode(c)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| c.to_string())
        }),
        region: header_str(headers, GEO_REGION).map(str::to_string),
        country: header_str(headers, GEO_COUNTRY)
            .or_else(|| header_str(headers, CF_COUNTRY))
            .map(str::to_string),
    };

    RequestMeta {
        origin: format!("{}://{}", proto, host),
        geo,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Proxies append to forwarding headers; the first entry is the client-facing one.
fn first_value(value: Option<&str>) -> Option<&str> {
    value
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
