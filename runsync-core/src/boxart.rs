use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tokio::sync::OnceCell;

use crate::config::BoxartConfig;
use crate::config::PlaceholderConfig;
use crate::error::Error;

pub(crate) const DEFAULT_FALLBACK_IMAGE: &[u8] =
    include_bytes!("../resources/default_boxart.png");

#[async_trait]
pub trait LoadImage: Send + Sync {
    async fn load(&self, url: &str) -> Result<Bytes, Error>;
}

/// Builds boxart URLs from a `{name}`/`{width}`/`{height}` template.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxartTemplate {
    template: String,
    width: u32,
    height: u32,
}

impl BoxartTemplate {
    pub fn new(config: &BoxartConfig) -> Self {
        Self::with_template(config, &config.url_template)
    }

    fn with_template(config: &BoxartConfig, template: &str) -> Self {
        BoxartTemplate {
            template: template.to_string(),
            width: config.width,
            height: config.height(),
        }
    }

    pub fn url_of(&self, name: &str) -> String {
        self.template
            .replace("{name}", name)
            .replace("{width}", &self.width.to_string())
            .replace("{height}", &self.height.to_string())
    }
}

/// Resolves boxart URLs into base64-encoded images.
///
/// When the fetched image is the image provider's generic "no art" image,
/// the fallback image is returned instead.
pub struct BoxartResolver<L> {
    config: Arc<BoxartConfig>,
    loader: L,
    placeholder: OnceCell<String>,
    fallback: String,
}

impl<L> BoxartResolver<L>
where
    L: LoadImage,
{
    pub fn new(config: Arc<BoxartConfig>, loader: L) -> Result<Self, Error> {
        let fallback = match config.fallback_path {
            Some(ref path) => STANDARD.encode(std::fs::read(path)?),
            None => STANDARD.encode(DEFAULT_FALLBACK_IMAGE),
        };
        Ok(BoxartResolver {
            config,
            loader,
            placeholder: OnceCell::new(),
            fallback,
        })
    }

    pub async fn resolve(&self, url: &str) -> Result<String, Error> {
        let image = STANDARD.encode(self.loader.load(url).await?);
        match self.placeholder().await {
            Some(placeholder) if *placeholder == image => {
                tracing::debug!(url, "Replaced the placeholder image with the fallback image");
                Ok(self.fallback.clone())
            }
            _ => Ok(image),
        }
    }

    // The placeholder is loaded at most once.  A failed attempt is retried on
    // the next resolution.
    async fn placeholder(&self) -> Option<&String> {
        let config = self.config.placeholder.as_ref()?;
        let result = self
            .placeholder
            .get_or_try_init(|| async {
                let image = match config {
                    PlaceholderConfig::Url(template) => {
                        let url = BoxartTemplate::with_template(&self.config, template).url_of("");
                        self.loader.load(&url).await?
                    }
                    PlaceholderConfig::Path(path) => Bytes::from(tokio::fs::read(path).await?),
                };
                Ok::<_, Error>(STANDARD.encode(image))
            })
            .await;
        match result {
            Ok(placeholder) => Some(placeholder),
            Err(err) => {
                tracing::warn!(%err, "Failed to load the placeholder image");
                None
            }
        }
    }
}

// loader

pub struct HttpImageLoader {
    client: reqwest::Client,
}

impl HttpImageLoader {
    pub fn new() -> Self {
        HttpImageLoader {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoadImage for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<Bytes, Error> {
        let load = async {
            self.client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await
        };
        load.await
            .map_err(|err| Error::AssetFailure(format!("{url}: {err}")))
    }
}

// <coverage:exclude>
#[cfg(test)]
mod tests {
    use super::*;
    use super::stub::ImageLoaderStub;
    use crate::test_util::spawn_server;
    use assert_matches::assert_matches;
    use axum::Router;
    use axum::routing;
    use maplit::hashmap;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_log::test;

    fn config(placeholder: Option<PlaceholderConfig>) -> Arc<BoxartConfig> {
        Arc::new(BoxartConfig {
            url_template: "http://cdn.test/ttv-boxart/{name}-{width}x{height}.jpg".to_string(),
            placeholder,
            ..Default::default()
        })
    }

    #[test]
    fn test_url_of() {
        let template = BoxartTemplate::new(&config(None));
        assert_eq!(
            template.url_of("Game A"),
            "http://cdn.test/ttv-boxart/Game A-469x655.jpg"
        );
    }

    #[test(tokio::test)]
    async fn test_resolve() {
        let loader = ImageLoaderStub::new(hashmap! {
            "http://cdn.test/a.jpg" => &b"image-a"[..],
        });
        let resolver = BoxartResolver::new(config(None), loader).unwrap();
        let result = resolver.resolve("http://cdn.test/a.jpg").await;
        assert_matches!(result, Ok(image) => {
            assert_eq!(image, STANDARD.encode(b"image-a"));
        });
    }

    #[test(tokio::test)]
    async fn test_resolve_placeholder() {
        let loader = ImageLoaderStub::new(hashmap! {
            "http://cdn.test/a.jpg" => &b"image-a"[..],
            "http://cdn.test/none.jpg" => &b"no-boxart"[..],
            "http://cdn.test/404_boxart-469x655.jpg" => &b"no-boxart"[..],
        });
        let resolver = BoxartResolver::new(
            config(Some(PlaceholderConfig::Url(
                "http://cdn.test/404_boxart-{width}x{height}.jpg".to_string(),
            ))),
            loader,
        )
        .unwrap();

        let result = resolver.resolve("http://cdn.test/none.jpg").await;
        assert_matches!(result, Ok(image) => {
            assert_eq!(image, STANDARD.encode(DEFAULT_FALLBACK_IMAGE));
            assert_ne!(image, STANDARD.encode(b"no-boxart"));
        });

        let result = resolver.resolve("http://cdn.test/a.jpg").await;
        assert_matches!(result, Ok(image) => {
            assert_eq!(image, STANDARD.encode(b"image-a"));
        });
    }

    #[test(tokio::test)]
    async fn test_resolve_default_placeholder() {
        let config = Arc::new(BoxartConfig::default());
        let url = BoxartTemplate::new(&config).url_of("Game Z");
        let loader = ImageLoaderStub::new(hashmap! {
            "https://static-cdn.jtvnw.net/ttv-static/404_boxart-469x655.jpg" => &b"no-boxart"[..],
        });
        loader.insert(&url, &b"no-boxart"[..]);
        let resolver = BoxartResolver::new(config, loader).unwrap();

        let result = resolver.resolve(&url).await;
        assert_matches!(result, Ok(image) => {
            assert_eq!(image, STANDARD.encode(DEFAULT_FALLBACK_IMAGE));
        });
    }

    #[test(tokio::test)]
    async fn test_resolve_placeholder_file() {
        let mut placeholder = NamedTempFile::new().unwrap();
        placeholder.write_all(b"no-boxart").unwrap();
        let mut fallback = NamedTempFile::new().unwrap();
        fallback.write_all(b"local-default").unwrap();

        let loader = ImageLoaderStub::new(hashmap! {
            "http://cdn.test/none.jpg" => &b"no-boxart"[..],
        });
        let config = Arc::new(BoxartConfig {
            placeholder: Some(PlaceholderConfig::Path(
                placeholder.path().to_str().unwrap().to_string(),
            )),
            fallback_path: Some(fallback.path().to_str().unwrap().to_string()),
            ..Default::default()
        });
        let resolver = BoxartResolver::new(config, loader).unwrap();

        let result = resolver.resolve("http://cdn.test/none.jpg").await;
        assert_matches!(result, Ok(image) => {
            assert_eq!(image, STANDARD.encode(b"local-default"));
        });
    }

    #[test(tokio::test)]
    async fn test_resolve_placeholder_unavailable() {
        let loader = ImageLoaderStub::new(hashmap! {
            "http://cdn.test/none.jpg" => &b"no-boxart"[..],
        });
        let resolver = BoxartResolver::new(
            config(Some(PlaceholderConfig::Url(
                "http://cdn.test/404_boxart.jpg".to_string(),
            ))),
            loader.clone(),
        )
        .unwrap();

        // Resolution proceeds without substitution.
        let result = resolver.resolve("http://cdn.test/none.jpg").await;
        assert_matches!(result, Ok(image) => {
            assert_eq!(image, STANDARD.encode(b"no-boxart"));
        });

        // The placeholder is loaded again on the next resolution.
        loader.insert("http://cdn.test/404_boxart.jpg", &b"no-boxart"[..]);
        let result = resolver.resolve("http://cdn.test/none.jpg").await;
        assert_matches!(result, Ok(image) => {
            assert_eq!(image, STANDARD.encode(DEFAULT_FALLBACK_IMAGE));
        });
    }

    #[test(tokio::test)]
    async fn test_resolve_failure() {
        let resolver = BoxartResolver::new(config(None), ImageLoaderStub::default()).unwrap();
        let result = resolver.resolve("http://cdn.test/missing.jpg").await;
        assert_matches!(result, Err(Error::AssetFailure(_)));
    }

    #[test(tokio::test)]
    async fn test_http_image_loader() {
        let router = Router::new().route(
            "/ttv-boxart/{file}",
            routing::get(|| async { &b"\x89PNG"[..] }),
        );
        let addr = spawn_server(router).await;
        let loader = HttpImageLoader::new();

        let result = loader.load(&format!("http://{addr}/ttv-boxart/Game A-469x655.jpg")).await;
        assert_matches!(result, Ok(bytes) => {
            assert_eq!(&bytes[..], b"\x89PNG");
        });

        let result = loader.load(&format!("http://{addr}/unknown.jpg")).await;
        assert_matches!(result, Err(Error::AssetFailure(_)));
    }
}
// </coverage:exclude>
