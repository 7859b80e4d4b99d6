#[cfg(test)]
mod tests {
    use super::super::*;
    use assets_sdk::models::{Asset, ImageUrls};
    use chrono::{NaiveDate, Utc};
    use sea_orm::ActiveValue;
    use uuid::Uuid;

    fn model(image_url: Option<&str>, image_urls_json: &str) -> entity::Model {
        let now = Utc::now();
        entity::Model {
            id: Uuid::new_v4(),
            household_id: "house-1".to_owned(),
            make: "Sony".to_owned(),
            model: "Bravia".to_owned(),
            serial_number: Some("SN-42".to_owned()),
            description: None,
            category: Some("Electronics".to_owned()),
            value: 1299.5,
            purchase_date: NaiveDate::from_ymd_opt(2023, 11, 24),
            image_url: image_url.map(str::to_owned),
            image_urls_json: image_urls_json.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_entity_to_asset_conversion() {
        let entity = model(
            Some("http://h/blobs/a-high.jpg"),
            r#"[{"high":"http://h/blobs/a-high.jpg","low":"http://h/blobs/a-low.jpg"}]"#,
        );
        let id = entity.id;

        let asset = Asset::try_from(entity).unwrap();

        assert_eq!(asset.id, id);
        assert_eq!(asset.household_id, "house-1");
        assert_eq!(asset.serial_number.as_deref(), Some("SN-42"));
        assert_eq!(
            asset.image_urls,
            vec![ImageUrls {
                high: "http://h/blobs/a-high.jpg".to_owned(),
                low: "http://h/blobs/a-low.jpg".to_owned(),
            }]
        );
    }

    #[test]
    fn test_legacy_row_gets_single_image() {
        let asset = Asset::try_from(model(Some("https://cdn.example.com/x.jpg"), "")).unwrap();
        assert_eq!(
            asset.image_urls,
            vec![ImageUrls::single("https://cdn.example.com/x.jpg")]
        );

        let bare = Asset::try_from(model(None, "[]")).unwrap();
        assert!(bare.image_urls.is_empty());
    }

    #[test]
    fn test_corrupt_image_list_is_an_error() {
        assert!(Asset::try_from(model(None, "{not json")).is_err());
    }

    #[test]
    fn test_active_model_carries_every_field() {
        let asset = Asset::try_from(model(
            None,
            r#"[{"high":"u1","low":"u2"},{"high":"u3","low":"u3"}]"#,
        ))
        .unwrap();

        let active = mapper::to_active_model(&asset).unwrap();

        assert_eq!(active.id, ActiveValue::Set(asset.id));
        assert_eq!(active.value, ActiveValue::Set(1299.5));
        let ActiveValue::Set(json) = active.image_urls_json else {
            panic!("image list not set");
        };
        let reparsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed[1]["high"], "u3");
        assert_eq!(reparsed.as_array().unwrap().len(), 2);
    }
}
