#[cfg(test)]
mod tests {
    use super::super::dto::*;
    use crate::domain::error::DomainError;
    use assets_sdk::models::{AssetPatch, NewAsset};
    use chrono::NaiveDate;

    #[test]
    fn test_purchase_date_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_purchase_date(Some("2024-03-15")).unwrap(), date);
        assert_eq!(
            parse_purchase_date(Some("2024-03-15T23:30:00Z")).unwrap(),
            date
        );
        assert_eq!(parse_purchase_date(Some("")).unwrap(), None);
        assert_eq!(parse_purchase_date(Some("   ")).unwrap(), None);
        assert_eq!(parse_purchase_date(None).unwrap(), None);

        let err = parse_purchase_date(Some("15/03/2024")).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "purchaseDate"));
    }

    #[test]
    fn test_create_request_ignores_server_assigned_fields() {
        let json = r#"{
            "id": "4b9a6f0e-0000-4000-8000-000000000000",
            "householdId": "someone-else",
            "make": "Sony",
            "model": "A7",
            "value": 1999.99,
            "purchaseDate": "2023-06-01",
            "imageUrls": [{"high": "h", "low": "l"}]
        }"#;
        let req: CreateAssetRequest = serde_json::from_str(json).unwrap();
        let new_asset = NewAsset::try_from(req).unwrap();

        assert_eq!(new_asset.make, "Sony");
        assert_eq!(new_asset.purchase_date, NaiveDate::from_ymd_opt(2023, 6, 1));
        assert_eq!(new_asset.image_urls.unwrap()[0].low, "l");
        assert!(new_asset.image_url.is_none());
    }

    #[test]
    fn test_create_request_requires_value() {
        let req: CreateAssetRequest =
            serde_json::from_str(r#"{"make": "Sony", "model": "A7"}"#).unwrap();
        let err = NewAsset::try_from(req).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "value"));

        let req: CreateAssetRequest =
            serde_json::from_str(r#"{"make": "Sony", "model": "A7", "value": 0}"#).unwrap();
        assert!(NewAsset::try_from(req).unwrap().value.abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let json = r#"{"serialNumber": null, "category": "Tools", "purchaseDate": ""}"#;
        let req: UpdateAssetRequest = serde_json::from_str(json).unwrap();
        let patch = AssetPatch::try_from(req).unwrap();

        assert_eq!(patch.serial_number, Some(None));
        assert_eq!(patch.category, Some(Some("Tools".to_owned())));
        assert_eq!(patch.description, None);
        assert_eq!(patch.purchase_date, Some(None));
        assert_eq!(patch.make, None);
        assert_eq!(patch.image_urls, None);
    }

    #[test]
    fn test_asset_dto_serializes_camel_case() {
        let mut asset = crate::test_support::asset("house-1", "LG", 1500.0);
        asset.purchase_date = NaiveDate::from_ymd_opt(2022, 12, 24);
        let json = serde_json::to_value(AssetDto::from(asset)).unwrap();

        assert_eq!(json["householdId"], "house-1");
        assert_eq!(json["purchaseDate"], "2022-12-24");
        assert!(json["imageUrls"].as_array().unwrap().is_empty());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("household_id").is_none());
    }

    #[test]
    fn test_upload_response_shape() {
        let json = serde_json::to_value(UploadResponse::from(
            assets_sdk::models::ImageUrls {
                high: "H".to_owned(),
                low: "L".to_owned(),
            },
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"imageUrl": "H", "imageUrls": {"high": "H", "low": "L"}})
        );
    }
}
