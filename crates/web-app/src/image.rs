use strum::{Display, EnumIter};

/// Processed renditions served from the CDN.
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, EnumIter)]
pub enum ImageSize {
    #[strum(serialize = "sm")]
    Sm,
    #[strum(serialize = "md")]
    Md,
    #[strum(serialize = "lg")]
    Lg,
}

impl ImageSize {
    #[must_use]
    pub fn width(self) -> u32 {
        match self {
            ImageSize::Sm => 320,
            ImageSize::Md => 768,
            ImageSize::Lg => 1280,
        }
    }
}

/// URL of one processed rendition of an uploaded image. The CDN stores
/// renditions as JPEG under the original object key's base name.
#[must_use]
pub fn image_url(cdn_base: &str, key: &str, size: ImageSize) -> String {
    format!(
        "{}/processed/{size}/{}.jpg",
        cdn_base.trim_end_matches('/'),
        base_name(key)
    )
}

/// `srcset` value covering all renditions.
#[must_use]
pub fn image_src_set(cdn_base: &str, key: &str) -> String {
    [ImageSize::Sm, ImageSize::Md, ImageSize::Lg]
        .into_iter()
        .map(|size| format!("{} {}w", image_url(cdn_base, key, size), size.width()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn base_name(key: &str) -> &str {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("uploads/abc123.png", ImageSize::Sm, "https://cdn.example.com/processed/sm/abc123.jpg")]
    #[case("uploads/abc123.png", ImageSize::Lg, "https://cdn.example.com/processed/lg/abc123.jpg")]
    #[case("abc123", ImageSize::Md, "https://cdn.example.com/processed/md/abc123.jpg")]
    fn test_image_url(#[case] key: &str, #[case] size: ImageSize, #[case] expected: &str) {
        assert_eq!(image_url("https://cdn.example.com", key, size), expected);
    }

    #[test]
    fn test_image_url_trailing_slash() {
        assert_eq!(
            image_url("https://cdn.example.com/", "uploads/x.jpg", ImageSize::Sm),
            "https://cdn.example.com/processed/sm/x.jpg"
        );
    }

    #[test]
    fn test_image_src_set() {
        assert_eq!(
            image_src_set("https://cdn.example.com", "uploads/abc.png"),
            "https://cdn.example.com/processed/sm/abc.jpg 320w, \
             https://cdn.example.com/processed/md/abc.jpg 768w, \
             https://cdn.example.com/processed/lg/abc.jpg 1280w"
        );
    }
}
