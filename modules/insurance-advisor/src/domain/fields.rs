/// Wire names of chat request fields, used in validation errors.
pub struct ChatFields;

impl ChatFields {
    pub const MESSAGE: &'static str = "message";
}
