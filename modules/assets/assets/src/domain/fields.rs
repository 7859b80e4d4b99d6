/// Wire names of asset fields, used in validation errors.
pub struct AssetFields;

impl AssetFields {
    pub const MAKE: &'static str = "make";
    pub const MODEL: &'static str = "model";
    pub const SERIAL_NUMBER: &'static str = "serialNumber";
    pub const DESCRIPTION: &'static str = "description";
    pub const CATEGORY: &'static str = "category";
    pub const VALUE: &'static str = "value";
    pub const PURCHASE_DATE: &'static str = "purchaseDate";
    pub const IMAGE_URL: &'static str = "imageUrl";
    pub const IMAGE_URLS: &'static str = "imageUrls";
    pub const IMAGE: &'static str = "image";
    pub const URL: &'static str = "url";
}
