//! Homepage section content model.
//!
//! Homepage sections are JSON-configured content blocks stored as flexible
//! payloads. The section type determines which fields the payload must carry;
//! everything else (copy, colors, layout hints) passes through untouched so
//! the content team can extend a block without a schema change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors returned when a section payload fails structural validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SectionPayloadError {
    /// The payload is not a JSON object.
    #[error("payload must be a JSON object")]
    NotAnObject,
    /// A required field is missing or has the wrong type.
    #[error("payload field `{field}`: {reason}")]
    Field {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// The kinds of homepage section elements.
///
/// HERO, CATEGORY, and PROMO are the legacy block types; the rest were added
/// as the homepage grew. Both generations share one enum so the editor and
/// the storefront render path accept the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.section_type", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionType {
    Hero,
    Category,
    NewArrivals,
    Promo,
    Trending,
    VideoBanner,
    CollectionStrip,
    Editorial,
}

impl SectionType {
    /// Validate the shape of a payload for this section type.
    ///
    /// Only structure is checked (required fields present, right JSON type,
    /// non-empty arrays); unknown extra fields are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`SectionPayloadError`] naming the first offending field.
    pub fn validate_payload(self, payload: &Value) -> Result<(), SectionPayloadError> {
        let obj = payload.as_object().ok_or(SectionPayloadError::NotAnObject)?;

        match self {
            Self::Hero => {
                let slides = obj
                    .get("slides")
                    .and_then(Value::as_array)
                    .ok_or(SectionPayloadError::Field {
                        field: "slides",
                        reason: "required array",
                    })?;
                if slides.is_empty() {
                    return Err(SectionPayloadError::Field {
                        field: "slides",
                        reason: "must not be empty",
                    });
                }
                for slide in slides {
                    require_string(slide, "image_url", "slides[].image_url")?;
                }
                Ok(())
            }
            Self::Category => {
                let tiles = obj
                    .get("categories")
                    .and_then(Value::as_array)
                    .ok_or(SectionPayloadError::Field {
                        field: "categories",
                        reason: "required array",
                    })?;
                if tiles.is_empty() {
                    return Err(SectionPayloadError::Field {
                        field: "categories",
                        reason: "must not be empty",
                    });
                }
                for tile in tiles {
                    require_string(tile, "image_url", "categories[].image_url")?;
                    require_string(tile, "collection_slug", "categories[].collection_slug")?;
                }
                Ok(())
            }
            Self::NewArrivals | Self::Trending => {
                // Product rails render from live catalog queries; the payload
                // only needs a title and an optional item limit.
                require_top_level_string(obj, "title")?;
                if let Some(limit) = obj.get("limit")
                    && !limit.is_u64()
                {
                    return Err(SectionPayloadError::Field {
                        field: "limit",
                        reason: "must be a non-negative integer",
                    });
                }
                Ok(())
            }
            Self::Promo => {
                require_top_level_string(obj, "image_url")?;
                require_top_level_string(obj, "link_url")?;
                Ok(())
            }
            Self::VideoBanner => {
                require_top_level_string(obj, "video_url")?;
                Ok(())
            }
            Self::CollectionStrip => {
                require_top_level_string(obj, "collection_slug")?;
                Ok(())
            }
            Self::Editorial => {
                require_top_level_string(obj, "title")?;
                require_top_level_string(obj, "body")?;
                Ok(())
            }
        }
    }
}

fn require_top_level_string(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<(), SectionPayloadError> {
    match obj.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        Some(Value::String(_)) => Err(SectionPayloadError::Field {
            field,
            reason: "must not be empty",
        }),
        _ => Err(SectionPayloadError::Field {
            field,
            reason: "required string",
        }),
    }
}

fn require_string(
    value: &Value,
    key: &str,
    field: &'static str,
) -> Result<(), SectionPayloadError> {
    match value.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        _ => Err(SectionPayloadError::Field {
            field,
            reason: "required string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hero_requires_slides_with_images() {
        let ok = json!({ "slides": [{ "image_url": "https://cdn/x.jpg", "headline": "Sale" }] });
        assert!(SectionType::Hero.validate_payload(&ok).is_ok());

        let empty = json!({ "slides": [] });
        assert!(SectionType::Hero.validate_payload(&empty).is_err());

        let missing_image = json!({ "slides": [{ "headline": "Sale" }] });
        assert!(SectionType::Hero.validate_payload(&missing_image).is_err());
    }

    #[test]
    fn test_video_banner_requires_video_url() {
        let ok = json!({ "video_url": "https://cdn/v.mp4", "autoplay": true });
        assert!(SectionType::VideoBanner.validate_payload(&ok).is_ok());
        assert!(
            SectionType::VideoBanner
                .validate_payload(&json!({ "autoplay": true }))
                .is_err()
        );
    }

    #[test]
    fn test_category_requires_slug_per_tile() {
        let bad = json!({ "categories": [{ "image_url": "https://cdn/c.jpg" }] });
        let err = SectionType::Category
            .validate_payload(&bad)
            .expect_err("missing slug");
        assert!(err.to_string().contains("collection_slug"));
    }

    #[test]
    fn test_product_rail_limit_must_be_integer() {
        let bad = json!({ "title": "Trending now", "limit": "ten" });
        assert!(SectionType::Trending.validate_payload(&bad).is_err());
        let ok = json!({ "title": "Trending now", "limit": 8 });
        assert!(SectionType::Trending.validate_payload(&ok).is_ok());
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert!(matches!(
            SectionType::Promo.validate_payload(&json!([1, 2])),
            Err(SectionPayloadError::NotAnObject)
        ));
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let ok = json!({
            "image_url": "https://cdn/p.jpg",
            "link_url": "/collections/summer",
            "theme": "dark",
            "countdown_ends_at": "2026-09-01T00:00:00Z"
        });
        assert!(SectionType::Promo.validate_payload(&ok).is_ok());
    }

    #[test]
    fn test_serde_names_match_content_schema() {
        assert_eq!(
            serde_json::to_string(&SectionType::VideoBanner).expect("serialize"),
            "\"VIDEO_BANNER\""
        );
        let parsed: SectionType = serde_json::from_str("\"NEW_ARRIVALS\"").expect("deserialize");
        assert_eq!(parsed, SectionType::NewArrivals);
    }
}
