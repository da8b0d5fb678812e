//! Request interception.
//!
//! PDF documents cannot be shown by the embedded renderer, so requests for
//! them are answered with a small HTML page that frames an external viewer.
//! Everything else passes through untouched.

use url::Url;

/// Prefix of the external PDF viewer; the requested URL is appended
/// percent-encoded.
pub const PDF_VIEWER_PREFIX: &str = "https://docs.google.com/gview?embedded=true&url=";

/// A synthetic response handed back to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedResponse {
    pub content_type: String,
    pub encoding: String,
    pub body: Vec<u8>,
}

/// Whether the request path names a PDF document.
///
/// Only the path counts, so query strings and fragments do not hide the
/// extension. Unparseable URLs fall back to stripping `?` and `#` by hand.
pub fn is_pdf_request(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    };
    path.to_ascii_lowercase().ends_with(".pdf")
}

/// Viewer URL for a PDF at `url`.
pub fn pdf_viewer_url(url: &str) -> String {
    format!("{PDF_VIEWER_PREFIX}{}", urlencoding::encode(url))
}

/// Answer `url` synchronously if the shell handles it, else `None`.
pub fn intercept_request(url: &str) -> Option<InterceptedResponse> {
    if !is_pdf_request(url) {
        return None;
    }
    let viewer = pdf_viewer_url(url);
    log::debug!("Redirecting PDF {url} to external viewer");
    let html = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <style>html,body{{margin:0;height:100%;}}</style></head><body>\
         <iframe src=\"{viewer}\" width=\"100%\" height=\"100%\" style=\"border: none;\"></iframe>\
         </body></html>"
    );
    Some(InterceptedResponse {
        content_type: "text/html".to_string(),
        encoding: "UTF-8".to_string(),
        body: html.into_bytes(),
    })
}
