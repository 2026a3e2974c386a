use http_client::Request;

/// Desktop browser user agent sent with every page request.
///
/// At least one site serves degraded markup to unknown agents.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:49.0) Gecko/20100101 Firefox/49.0";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Add the browser headers used for album page requests
pub fn add_page_headers(request: &mut Request, user_agent: &str) {
    let _ = request.insert_header("User-Agent", user_agent);
    let _ = request.insert_header("Accept", ACCEPT_HTML);
    let _ = request.insert_header("Accept-Language", "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7");
    let _ = request.insert_header("DNT", "1");
    let _ = request.insert_header("Connection", "keep-alive");
    let _ = request.insert_header("Upgrade-Insecure-Requests", "1");
}

/// Add headers for cover image downloads, sending the album page as referer
/// since image CDNs commonly reject hotlinks without one.
pub fn add_image_headers(request: &mut Request, user_agent: &str, referer_url: Option<&str>) {
    let _ = request.insert_header("User-Agent", user_agent);
    let _ = request.insert_header("Accept", "image/webp,image/*,*/*;q=0.8");

    if let Some(referer) = referer_url {
        let _ = request.insert_header("Referer", referer);
    }
}
