//! Image mirroring for normalized documents.
//!
//! Each qualifying image reference is resolved against the page URL,
//! downloaded under `images/<doc-fingerprint>/`, and replaced by a
//! document-relative path. A failed download leaves the original (absolute)
//! reference in place and never fails the document.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};
use url::Url;

use super::client::{HttpClient, content_type_of, stream_to_file};
use super::error::FetchError;
use crate::fingerprint::image_fingerprint;
use crate::store::DocumentStore;

/// Extension used when neither the content type nor the URL gives one.
pub const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";

/// Extensions accepted from the image URL's path.
const URL_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp"];

/// Result of mirroring a document's images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirroredImages {
    /// One replacement per input reference, in the same order.
    pub replacements: Vec<String>,
    /// References rewritten to a local path (repeats included).
    pub mirrored: usize,
}

/// Maps an image MIME type to a file extension.
///
/// Parameters after `;` are ignored. Unknown types give `None`.
#[must_use]
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        "image/svg+xml" => Some(".svg"),
        "image/bmp" => Some(".bmp"),
        _ => None,
    }
}

/// Returns the URL path's extension if it is a known image extension.
#[must_use]
pub fn extension_from_url(url: &Url) -> Option<String> {
    let file = url.path().rsplit('/').next()?;
    let dot = file.rfind('.')?;
    let ext = file[dot..].to_ascii_lowercase();
    URL_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Picks an extension: content type, then URL path, then [`DEFAULT_IMAGE_EXTENSION`].
#[must_use]
pub fn resolve_extension(content_type: Option<&str>, url: &Url) -> String {
    content_type
        .and_then(extension_for_content_type)
        .map(ToString::to_string)
        .or_else(|| extension_from_url(url))
        .unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string())
}

/// Mirrors every reference in `sources` for the document `doc_fingerprint`.
///
/// Each distinct absolute URL is downloaded at most once; repeats reuse the
/// first outcome.
pub async fn mirror_images(
    client: &HttpClient,
    docs: &DocumentStore,
    page_url: &Url,
    doc_fingerprint: &str,
    sources: &[String],
) -> MirroredImages {
    let dir = docs.image_dir(doc_fingerprint);
    let mut seen: HashMap<String, Option<String>> = HashMap::new();
    let mut result = MirroredImages::default();

    for source in sources {
        let Ok(absolute) = page_url.join(source) else {
            warn!(src = %source, "unresolvable image reference");
            result.replacements.push(source.clone());
            continue;
        };

        let cached = seen.get(absolute.as_str()).cloned();
        let local = match cached {
            Some(outcome) => outcome,
            None => {
                let outcome = match download_image(client, &absolute, &dir).await {
                    Ok(file_name) => Some(DocumentStore::image_reference(doc_fingerprint, &file_name)),
                    Err(e) => {
                        warn!(url = %absolute, error = %e, "image download failed");
                        None
                    }
                };
                seen.insert(absolute.to_string(), outcome.clone());
                outcome
            }
        };

        match local {
            Some(reference) => {
                result.mirrored += 1;
                result.replacements.push(reference);
            }
            None => result.replacements.push(absolute.to_string()),
        }
    }

    debug!(
        references = sources.len(),
        distinct = seen.len(),
        mirrored = result.mirrored,
        "image mirroring complete"
    );
    result
}

/// Downloads one image into `dir`, returning the stored file name.
///
/// # Errors
///
/// Returns [`FetchError`] if the request fails, the status is not a success,
/// or the file cannot be written. No partial file is left behind.
pub async fn download_image(client: &HttpClient, url: &Url, dir: &Path) -> Result<String, FetchError> {
    let response = client.send_get(url).await?;
    let extension = resolve_extension(content_type_of(&response).as_deref(), url);
    let file_name = format!("{}{extension}", image_fingerprint(url.as_str()));

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| FetchError::io(dir, e))?;

    let path = dir.join(&file_name);
    let bytes = stream_to_file(response, url.as_str(), &path).await?;
    debug!(url = %url, path = %path.display(), bytes, "image saved");
    Ok(file_name)
}
