use std::path::Path;

use jita_core::{Error, Result};
use url::Url;

use crate::fetch::Fetcher;

const DEFAULT_EXTENSION: &str = "jpg";

/// `<slug>.<ext>`, extension taken from the URL path
pub fn image_file_name(slug: &str, image_url: &str) -> String {
    let extension = Url::parse(image_url)
        .ok()
        .and_then(|url| {
            let path = url.path().to_string();
            let file = path.rsplit('/').next()?.to_string();
            let (_, ext) = file.rsplit_once('.')?;
            Some(ext.to_ascii_lowercase())
        })
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    format!("{slug}.{extension}")
}

/// Download into `images_dir` unless the file is already there.
/// Returns the record path, `images/<file>`.
pub async fn download_image(
    fetcher: &dyn Fetcher,
    image_url: &str,
    slug: &str,
    images_dir: &Path,
) -> Result<String> {
    let file_name = image_file_name(slug, image_url);
    let target = images_dir.join(&file_name);
    let relative = format!("images/{file_name}");

    let exists = tokio::fs::try_exists(&target)
        .await
        .map_err(|e| Error::file_io(&target, e))?;
    if exists {
        tracing::debug!("Image already present: {}", target.display());
        return Ok(relative);
    }

    let bytes = fetcher.fetch_bytes(image_url).await?;
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|e| Error::file_io(&target, e))?;
    tracing::info!("Saved image {} ({} bytes)", file_name, bytes.len());

    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_url_extension() {
        assert_eq!(
            image_file_name("開く_開ける", "https://livedoor.blogimg.jp/x/imgs/a/b/abcd.PNG"),
            "開く_開ける.png"
        );
    }

    #[test]
    fn defaults_to_jpg() {
        assert_eq!(
            image_file_name("a_b", "https://resize.blogsys.jp/abc/crop1/300x300/img"),
            "a_b.jpg"
        );
        assert_eq!(image_file_name("a_b", "not a url"), "a_b.jpg");
    }
}
