//! Dashboard page and referral attribution capture.
//!
//! Every page load re-derives attribution from the query string and writes
//! it back through the browser cookie jar, so the most recent referral link
//! wins and a direct visit clears prior attribution. The router fallback
//! serves the same page because any entry URL may carry the referral
//! parameters.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use vatrack_core::attribution;

use crate::cookies::BrowserCookies;

/// `GET /` (and the single-page fallback).
pub async fn dashboard(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let state = attribution::capture(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let mut jar = BrowserCookies::from_request(&headers);
    attribution::apply(&state, &mut jar);

    let mut response = Html(dashboard_page(state.affiliate_id.as_deref())).into_response();
    jar.write_to(response.headers_mut());
    response
}

/// Generate the dashboard shell page.
fn dashboard_page(affiliate_id: Option<&str>) -> String {
    // The affiliate id comes straight from the query string; escape it.
    let affiliate_badge = affiliate_id.map_or_else(String::new, |id| {
        format!(
            r#"<span class="badge">Affiliate: {}</span>"#,
            escape_html(id)
        )
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>VA Referral Tracker</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         color: #e0e0e0; background: #0d1117; line-height: 1.6; }}
  .container {{ max-width: 720px; margin: 0 auto; padding: 2rem 1rem; }}
  h1 {{ font-size: 2rem; margin-bottom: 0.5rem; color: #f0f0f0; }}
  h2 {{ font-size: 1.2rem; margin: 2rem 0 0.75rem; color: #c0c0c0; }}
  p {{ margin-bottom: 1rem; color: #a0a0a0; }}
  code {{ background: #161b22; padding: 0.15em 0.4em; border-radius: 4px; font-size: 0.9em; }}
  .badge {{ display: inline-block; background: #1f6feb33; color: #58a6ff;
            border-radius: 999px; padding: 0.1rem 0.75rem; font-size: 0.85em; }}
  table {{ width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; }}
  th, td {{ padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid #21262d; }}
  th {{ color: #8b949e; font-weight: 600; font-size: 0.85em; text-transform: uppercase; }}
</style>
</head>
<body>
<div class="container">
  <h1>VA Referral Tracker</h1>
  <p>Track affiliate referrals and manage payouts. {affiliate_badge}</p>

  <h2>API</h2>
  <table>
    <thead><tr><th>Endpoint</th><th>Purpose</th></tr></thead>
    <tbody>
      <tr><td><code>POST /api/clients</code></td><td>Register a new VA client</td></tr>
      <tr><td><code>GET /api/clients</code></td><td>List clients with payout status (admin)</td></tr>
      <tr><td><code>POST /api/clients/&#123;id&#125;/hire</code></td><td>Confirm a hire (admin)</td></tr>
      <tr><td><code>POST /api/clients/&#123;id&#125;/payout</code></td><td>Trigger the affiliate payout (admin)</td></tr>
      <tr><td><code>POST /api/ghl-webhook</code></td><td>CRM webhook pass-through</td></tr>
    </tbody>
  </table>
</div>
</body>
</html>"#
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_escapes_markup_in_affiliate_id() {
        let page = dashboard_page(Some("<script>alert(1)</script>"));
        assert!(!page.contains("<script>alert(1)"));
        assert!(page.contains("Affiliate: &lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn badge_is_omitted_without_attribution() {
        let page = dashboard_page(None);
        assert!(!page.contains("Affiliate:"));
    }
}
