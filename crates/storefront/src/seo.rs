//! Store page metadata
//!
//! Builds the title, description, Open Graph and Twitter card data for a
//! tenant storefront from the store profile the backend returns.

use serde::Serialize;
use tokoku_shared::{first_non_empty, StoreData};

use crate::config::Config;

/// Site title when neither the theme settings nor the store carry one
pub const DEFAULT_SITE_TITLE: &str = "AiDareU Store";

/// Open Graph image size advertised to crawlers
const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;

/// Base URLs needed to build absolute links in metadata
#[derive(Debug, Clone)]
pub struct SiteUrls {
    /// Public frontend origin, no trailing slash
    pub frontend_url: String,
    /// Origin serving `/storage/*` assets, no trailing slash
    pub storage_base: String,
    pub tenant_path_prefix: String,
}

impl SiteUrls {
    pub fn from_config(config: &Config) -> Self {
        Self {
            frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
            storage_base: config.backend_url.as_str().trim_end_matches('/').to_string(),
            tenant_path_prefix: config.tenant_path_prefix.clone(),
        }
    }

    /// Canonical public URL of a tenant store
    pub fn store_url(&self, subdomain: &str) -> String {
        format!(
            "{}{}/{}",
            self.frontend_url, self.tenant_path_prefix, subdomain
        )
    }
}

/// Resolve an uploaded asset path to an absolute URL.
///
/// Absolute URLs are returned unchanged. Relative paths are served from
/// `{base}/storage/`, whether or not they already start with `storage/`.
pub fn storage_url(base: &str, path: Option<&str>) -> String {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return String::new();
    };

    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    let clean = path.strip_prefix('/').unwrap_or(path);

    if clean.starts_with("storage/") {
        format!("{}/{}", base, clean)
    } else {
        format!("{}/storage/{}", base, clean)
    }
}

// =============================================================================
// Metadata
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<Robots>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Icons>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<TwitterCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternates: Option<Alternates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    pub google_bot: GoogleBot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleBot {
    pub index: bool,
    pub follow: bool,
    #[serde(rename = "max-video-preview")]
    pub max_video_preview: i32,
    #[serde(rename = "max-image-preview")]
    pub max_image_preview: String,
    #[serde(rename = "max-snippet")]
    pub max_snippet: i32,
}

impl Robots {
    /// Index everything, no preview limits
    fn allow_all() -> Self {
        Self {
            index: true,
            follow: true,
            google_bot: GoogleBot {
                index: true,
                follow: true,
                max_video_preview: -1,
                max_image_preview: "large".to_string(),
                max_snippet: -1,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icons {
    pub icon: String,
    pub shortcut: String,
    pub apple: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: String,
    pub locale: String,
    pub url: String,
    pub site_name: String,
    pub title: String,
    pub description: String,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternates {
    pub canonical: String,
}

impl StoreMetadata {
    /// Metadata for a subdomain with no store behind it
    pub fn not_found() -> Self {
        Self {
            title: "Store Not Found".to_string(),
            description: "The requested store could not be found.".to_string(),
            keywords: None,
            authors: Vec::new(),
            creator: None,
            publisher: None,
            robots: None,
            icons: None,
            open_graph: None,
            twitter: None,
            alternates: None,
        }
    }
}

/// Build page metadata for the store served at `subdomain`
pub fn build_metadata(subdomain: &str, data: &StoreData, urls: &SiteUrls) -> StoreMetadata {
    let seo = &data.seo;
    let settings = &data.settings;

    let site_title = first_non_empty(&[
        settings.site_title.as_deref(),
        data.store.name.as_deref(),
    ])
    .unwrap_or(DEFAULT_SITE_TITLE)
    .to_string();

    let title = match (
        first_non_empty(&[seo.meta_title.as_deref()]),
        first_non_empty(&[settings.site_tagline.as_deref()]),
    ) {
        (Some(meta_title), _) => meta_title.to_string(),
        (None, Some(tagline)) => format!("{} - {}", site_title, tagline),
        (None, None) => site_title.clone(),
    };

    let description = first_non_empty(&[seo.deskripsi.as_deref()])
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "Discover amazing products at {}. Quality items with great prices.",
                site_title
            )
        });

    let keywords = first_non_empty(&[seo.keyword.as_deref()])
        .unwrap_or_default()
        .to_string();

    let og_title = first_non_empty(&[seo.og_title.as_deref()])
        .map(str::to_string)
        .unwrap_or_else(|| title.clone());
    let og_description = first_non_empty(&[seo.og_deskripsi.as_deref()])
        .map(str::to_string)
        .unwrap_or_else(|| description.clone());

    let og_image = first_non_empty(&[seo.og_image.as_deref(), settings.logo.as_deref()])
        .map(|path| storage_url(&urls.storage_base, Some(path)));

    let icons = first_non_empty(&[settings.favicon.as_deref()]).map(|path| {
        let favicon = storage_url(&urls.storage_base, Some(path));
        Icons {
            icon: favicon.clone(),
            shortcut: favicon.clone(),
            apple: favicon,
        }
    });

    let canonical = urls.store_url(subdomain);

    let og_images = og_image
        .iter()
        .map(|url| OgImage {
            url: url.clone(),
            width: OG_IMAGE_WIDTH,
            height: OG_IMAGE_HEIGHT,
            alt: og_title.clone(),
        })
        .collect();

    StoreMetadata {
        keywords: Some(keywords),
        authors: vec![Author {
            name: site_title.clone(),
        }],
        creator: Some(site_title.clone()),
        publisher: Some(site_title.clone()),
        robots: Some(Robots::allow_all()),
        icons,
        open_graph: Some(OpenGraph {
            og_type: "website".to_string(),
            locale: "id_ID".to_string(),
            url: canonical.clone(),
            site_name: site_title,
            title: og_title.clone(),
            description: og_description.clone(),
            images: og_images,
        }),
        twitter: Some(TwitterCard {
            card: "summary_large_image".to_string(),
            title: og_title,
            description: og_description,
            images: og_image.into_iter().collect(),
        }),
        alternates: Some(Alternates { canonical }),
        title,
        description,
    }
}
