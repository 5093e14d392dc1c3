//! Photo URLs for result cards.

/// Shown when a card has no usable keyword or its photo fails to load.
pub const FALLBACK_PHOTO_URL: &str =
    "https://images.unsplash.com/photo-1549247796-5d8f09e9034b?auto=format&fit=crop&q=80&w=800";

/// Keyword-based photo lookup; `index` pins a stable image per card slot.
pub fn photo_url(image_keyword: &str, index: usize) -> String {
    let keyword = image_keyword.trim();
    if keyword.is_empty() {
        return FALLBACK_PHOTO_URL.to_string();
    }
    format!(
        "https://loremflickr.com/800/1000/taiwan,{}/all?lock={index}",
        urlencoding::encode(keyword)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_keyword_and_lock() {
        assert_eq!(
            photo_url("Shilin Night Market", 2),
            "https://loremflickr.com/800/1000/taiwan,Shilin%20Night%20Market/all?lock=2"
        );
    }

    #[test]
    fn blank_keyword_uses_fallback() {
        assert_eq!(photo_url("  ", 0), FALLBACK_PHOTO_URL);
    }
}
